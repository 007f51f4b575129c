use crate::ports::{BlockFilterPort, FilterSourcePort};
use dns_sieve_domain::{DomainError, FilterLoadReport};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Reads the filter source and publishes a fresh snapshot.
///
/// A source that cannot be read leaves the current snapshot untouched.
pub struct ReloadFilterUseCase {
    engine: Arc<dyn BlockFilterPort>,
    source: Arc<dyn FilterSourcePort>,
}

impl ReloadFilterUseCase {
    pub fn new(engine: Arc<dyn BlockFilterPort>, source: Arc<dyn FilterSourcePort>) -> Self {
        Self { engine, source }
    }

    pub async fn execute(&self) -> Result<FilterLoadReport, DomainError> {
        let lines = self.source.read_lines().await.map_err(|e| {
            warn!(source = %self.source.describe(), error = %e, "Failed to read filter source");
            e
        })?;

        let report = self.engine.reload(&lines);

        // Callers print the per-entry WARNING lines from the report.
        for warning in &report.warnings {
            debug!(
                source = %self.source.describe(),
                line = warning.line_number,
                reason = %warning.reason,
                "Filter entry rejected"
            );
        }

        info!(
            source = %self.source.describe(),
            loaded = report.loaded,
            rejected = report.rejected(),
            "Filter rules loaded"
        );

        Ok(report)
    }
}
