use crate::ports::{BlockFilterPort, FilterDecision, UpstreamPort};
use dns_sieve_domain::{DnsQuery, DnsRequest, DomainError, QueryClass, RecordType};
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Why a well-formed query was answered locally instead of forwarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefusalReason {
    Blocked,
    UnsupportedType(RecordType),
    UnsupportedClass(QueryClass),
}

impl fmt::Display for RefusalReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefusalReason::Blocked => f.write_str("blocked by filter"),
            RefusalReason::UnsupportedType(rt) => write!(f, "unsupported type {}", rt),
            RefusalReason::UnsupportedClass(class) => write!(f, "unsupported class {}", class),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    /// Answer locally with REFUSED; the upstream is never contacted.
    Refused(RefusalReason),
    /// Upstream reply, already carrying the client's transaction id.
    Relayed(Vec<u8>),
}

pub struct HandleDnsQueryUseCase {
    filter: Arc<dyn BlockFilterPort>,
    upstream: Arc<dyn UpstreamPort>,
}

impl HandleDnsQueryUseCase {
    pub fn new(filter: Arc<dyn BlockFilterPort>, upstream: Arc<dyn UpstreamPort>) -> Self {
        Self { filter, upstream }
    }

    /// Policy check only: `None` means the query may be forwarded.
    pub fn classify(&self, query: &DnsQuery) -> Option<RefusalReason> {
        if query.query_class != QueryClass::IN {
            return Some(RefusalReason::UnsupportedClass(query.query_class));
        }
        if query.record_type != RecordType::A {
            return Some(RefusalReason::UnsupportedType(query.record_type));
        }
        match self.filter.check(&query.domain) {
            FilterDecision::Block => Some(RefusalReason::Blocked),
            FilterDecision::Allow => None,
        }
    }

    pub async fn execute(&self, request: &DnsRequest) -> Result<QueryOutcome, DomainError> {
        let query = &request.query;

        if let Some(reason) = self.classify(query) {
            debug!(
                id = query.id,
                domain = %query.domain,
                record_type = %query.record_type,
                client = %request.client,
                reason = %reason,
                "Query refused"
            );
            return Ok(QueryOutcome::Refused(reason));
        }

        let start = Instant::now();
        let reply = self.upstream.exchange(request).await?;

        debug!(
            id = query.id,
            domain = %query.domain,
            client = %request.client,
            upstream = %self.upstream.server_addr(),
            bytes = reply.len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "Query relayed"
        );

        Ok(QueryOutcome::Relayed(reply))
    }
}
