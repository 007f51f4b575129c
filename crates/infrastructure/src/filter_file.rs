use async_trait::async_trait;
use dns_sieve_application::ports::FilterSourcePort;
use dns_sieve_domain::DomainError;
use std::path::PathBuf;

/// Filter list read from a plain-text file, one entry per line.
///
/// Invalid UTF-8 is replaced rather than rejected so a single bad byte only
/// costs the line it sits on.
pub struct FileFilterSource {
    path: PathBuf,
}

impl FileFilterSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl FilterSourcePort for FileFilterSource {
    async fn read_lines(&self) -> Result<Vec<String>, DomainError> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            DomainError::IoError(format!("{}: {}", self.path.display(), e))
        })?;

        Ok(String::from_utf8_lossy(&bytes)
            .lines()
            .map(str::to_owned)
            .collect())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
