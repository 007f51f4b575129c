use async_trait::async_trait;
use dns_sieve_domain::DomainError;

/// Supplies the raw lines of a filter list, in source order.
#[async_trait]
pub trait FilterSourcePort: Send + Sync {
    async fn read_lines(&self) -> Result<Vec<String>, DomainError>;

    fn describe(&self) -> String;
}
