//! dns-sieve domain layer
pub mod blocklist;
pub mod config;
pub mod dns_query;
pub mod dns_record;
pub mod dns_request;
pub mod domain_name;
pub mod errors;

pub use blocklist::{FilterLoadReport, FilterWarning};
pub use config::{CliOverrides, Config, ConfigError, UpstreamAddr};
pub use dns_query::DnsQuery;
pub use dns_record::{QueryClass, RecordType, ResponseCode};
pub use dns_request::DnsRequest;
pub use domain_name::{normalize_query_name, validate_filter_line, FilterLine, FilterRule, RejectionReason};
pub use errors::DomainError;
