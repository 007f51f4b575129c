use super::{QueryClass, RecordType};
use std::sync::Arc;

/// The single question of a well-formed query, with its name already normalized.
#[derive(Debug, Clone)]
pub struct DnsQuery {
    pub id: u16,
    pub domain: Arc<str>,
    pub record_type: RecordType,
    pub query_class: QueryClass,
}

impl DnsQuery {
    pub fn new(
        id: u16,
        domain: impl Into<Arc<str>>,
        record_type: RecordType,
        query_class: QueryClass,
    ) -> Self {
        Self {
            id,
            domain: domain.into(),
            record_type,
            query_class,
        }
    }
}
