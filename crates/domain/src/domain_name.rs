//! Filter-list line validation.
//!
//! Every line of a filter list maps to exactly one [`FilterLine`]: a comment or
//! blank line is skipped, a syntactically valid hostname becomes a
//! [`FilterRule`], anything else is rejected with a [`RejectionReason`] that the
//! loader reports as a warning.

use compact_str::CompactString;
use std::fmt;
use std::net::IpAddr;
use thiserror::Error;

pub const MAX_DOMAIN_LEN: usize = 253;
pub const MAX_LABEL_LEN: usize = 63;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RejectionReason {
    #[error("URL schemes are not allowed")]
    UrlScheme,

    #[error("Wildcards are not allowed")]
    Wildcard,

    #[error("Paths and query strings are not allowed")]
    PathOrQuery,

    #[error("IP addresses are not allowed")]
    IpLiteral,

    #[error("Domain exceeds {max} bytes ({len})", max = MAX_DOMAIN_LEN)]
    TooLong { len: usize },

    #[error("Empty label")]
    EmptyLabel,

    #[error("Label '{label}' exceeds {max} bytes", max = MAX_LABEL_LEN)]
    LabelTooLong { label: String },

    #[error("Invalid character {0:?}")]
    InvalidCharacter(char),

    #[error("Label '{label}' starts or ends with a hyphen")]
    HyphenAtLabelEdge { label: String },
}

/// A normalized blocked domain: lowercase, no trailing dot, RFC 1035 label syntax.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FilterRule(CompactString);

impl FilterRule {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Labels from the TLD inwards, the order the suffix index consumes them.
    pub fn labels_reversed(&self) -> impl Iterator<Item = &str> {
        self.0.split('.').rev()
    }
}

impl fmt::Display for FilterRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for FilterRule {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterLine {
    /// Blank line or `#` comment; not counted as a warning.
    Skip,
    Rule(FilterRule),
    Rejected(RejectionReason),
}

pub fn validate_filter_line(line: &str) -> FilterLine {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return FilterLine::Skip;
    }
    match validate_domain(trimmed) {
        Ok(rule) => FilterLine::Rule(rule),
        Err(reason) => FilterLine::Rejected(reason),
    }
}

fn validate_domain(candidate: &str) -> Result<FilterRule, RejectionReason> {
    if candidate.contains("://") {
        return Err(RejectionReason::UrlScheme);
    }
    if candidate.contains('*') {
        return Err(RejectionReason::Wildcard);
    }
    if candidate.contains(['/', '?']) {
        return Err(RejectionReason::PathOrQuery);
    }
    if candidate.parse::<IpAddr>().is_ok() {
        return Err(RejectionReason::IpLiteral);
    }

    let domain = candidate.strip_suffix('.').unwrap_or(candidate);
    if domain.len() > MAX_DOMAIN_LEN {
        return Err(RejectionReason::TooLong { len: domain.len() });
    }

    let mut normalized = CompactString::with_capacity(domain.len());
    for (i, label) in domain.split('.').enumerate() {
        validate_label(label)?;
        if i > 0 {
            normalized.push('.');
        }
        normalized.push_str(&label.to_ascii_lowercase());
    }

    Ok(FilterRule(normalized))
}

fn validate_label(label: &str) -> Result<(), RejectionReason> {
    if label.is_empty() {
        return Err(RejectionReason::EmptyLabel);
    }
    if label.len() > MAX_LABEL_LEN {
        return Err(RejectionReason::LabelTooLong {
            label: label.to_string(),
        });
    }
    if let Some(bad) = label
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-'))
    {
        return Err(RejectionReason::InvalidCharacter(bad));
    }
    if label.starts_with('-') || label.ends_with('-') {
        return Err(RejectionReason::HyphenAtLabelEdge {
            label: label.to_string(),
        });
    }
    Ok(())
}

/// Lowercases a query name and drops the root dot so `Example.COM.` and
/// `example.com` look up identically.
pub fn normalize_query_name(name: &str) -> CompactString {
    let name = name.strip_suffix('.').unwrap_or(name);
    let mut normalized = CompactString::with_capacity(name.len());
    for c in name.chars() {
        normalized.push(c.to_ascii_lowercase());
    }
    normalized
}
