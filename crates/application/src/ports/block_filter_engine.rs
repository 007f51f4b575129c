use dns_sieve_domain::FilterLoadReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterDecision {
    Block,
    Allow,
}

/// Read-mostly view of the blocked-domain set.
///
/// `check` runs on every query and must not block; `reload` builds a complete new
/// snapshot before publishing it, so concurrent readers see either the old set or
/// the new one, never a partial one.
pub trait BlockFilterPort: Send + Sync {
    fn check(&self, domain: &str) -> FilterDecision;
    fn rule_count(&self) -> usize;
    fn reload(&self, lines: &[String]) -> FilterLoadReport;
}
