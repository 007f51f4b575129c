use crate::domain_name::RejectionReason;

/// One rejected, non-comment line from a filter list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterWarning {
    /// 1-based position of the line in its source.
    pub line_number: usize,
    pub line: String,
    pub reason: RejectionReason,
}

impl std::fmt::Display for FilterWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} on line {}: '{}'",
            self.reason, self.line_number, self.line
        )
    }
}

/// Outcome of compiling a filter list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterLoadReport {
    /// Distinct rules actually stored, after deduplication.
    pub loaded: usize,
    pub skipped: usize,
    pub warnings: Vec<FilterWarning>,
}

impl FilterLoadReport {
    pub fn rejected(&self) -> usize {
        self.warnings.len()
    }
}
