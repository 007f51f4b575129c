#![allow(dead_code)]

use async_trait::async_trait;
use dns_sieve_application::ports::{
    BlockFilterPort, FilterDecision, FilterSourcePort, UpstreamPort,
};
use dns_sieve_domain::{
    validate_filter_line, DnsQuery, DnsRequest, DomainError, FilterLine, FilterLoadReport,
    FilterWarning, QueryClass, RecordType,
};
use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

/// Exact + label-suffix matching over a plain set; enough to drive the use cases.
pub struct MockBlockFilter {
    rules: RwLock<HashSet<String>>,
    checks: AtomicUsize,
}

impl MockBlockFilter {
    pub fn new() -> Self {
        Self {
            rules: RwLock::new(HashSet::new()),
            checks: AtomicUsize::new(0),
        }
    }

    pub fn with_rules(rules: &[&str]) -> Self {
        let filter = Self::new();
        {
            let mut set = filter.rules.write().unwrap();
            for rule in rules {
                set.insert(rule.to_string());
            }
        }
        filter
    }

    pub fn check_count(&self) -> usize {
        self.checks.load(Ordering::SeqCst)
    }
}

impl BlockFilterPort for MockBlockFilter {
    fn check(&self, domain: &str) -> FilterDecision {
        self.checks.fetch_add(1, Ordering::SeqCst);
        let rules = self.rules.read().unwrap();
        let blocked = rules
            .iter()
            .any(|r| domain == r || domain.ends_with(&format!(".{}", r)));
        if blocked {
            FilterDecision::Block
        } else {
            FilterDecision::Allow
        }
    }

    fn rule_count(&self) -> usize {
        self.rules.read().unwrap().len()
    }

    fn reload(&self, lines: &[String]) -> FilterLoadReport {
        let mut set = HashSet::new();
        let mut report = FilterLoadReport::default();
        for (i, line) in lines.iter().enumerate() {
            match validate_filter_line(line) {
                FilterLine::Skip => report.skipped += 1,
                FilterLine::Rule(rule) => {
                    set.insert(rule.as_str().to_string());
                }
                FilterLine::Rejected(reason) => report.warnings.push(FilterWarning {
                    line_number: i + 1,
                    line: line.clone(),
                    reason,
                }),
            }
        }
        report.loaded = set.len();
        *self.rules.write().unwrap() = set;
        report
    }
}

/// Upstream double that records every packet it is asked to forward.
pub struct MockUpstream {
    reply: RwLock<Result<Vec<u8>, DomainError>>,
    sent: RwLock<Vec<Vec<u8>>>,
}

impl MockUpstream {
    pub fn answering(reply: Vec<u8>) -> Self {
        Self {
            reply: RwLock::new(Ok(reply)),
            sent: RwLock::new(Vec::new()),
        }
    }

    pub fn failing(error: DomainError) -> Self {
        Self {
            reply: RwLock::new(Err(error)),
            sent: RwLock::new(Vec::new()),
        }
    }

    pub fn sent_packets(&self) -> Vec<Vec<u8>> {
        self.sent.read().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.sent.read().unwrap().len()
    }
}

#[async_trait]
impl UpstreamPort for MockUpstream {
    async fn exchange(&self, request: &DnsRequest) -> Result<Vec<u8>, DomainError> {
        self.sent.write().unwrap().push(request.packet.to_vec());
        self.reply.read().unwrap().clone()
    }

    fn server_addr(&self) -> SocketAddr {
        "192.0.2.53:53".parse().unwrap()
    }
}

pub struct MockFilterSource {
    lines: RwLock<Result<Vec<String>, DomainError>>,
}

impl MockFilterSource {
    pub fn with_lines(lines: &[&str]) -> Self {
        Self {
            lines: RwLock::new(Ok(lines.iter().map(|l| l.to_string()).collect())),
        }
    }

    pub fn failing() -> Self {
        Self {
            lines: RwLock::new(Err(DomainError::IoError("permission denied".to_string()))),
        }
    }

    pub fn set_lines(&self, lines: &[&str]) {
        *self.lines.write().unwrap() = Ok(lines.iter().map(|l| l.to_string()).collect());
    }

    pub fn set_failing(&self) {
        *self.lines.write().unwrap() =
            Err(DomainError::IoError("permission denied".to_string()));
    }
}

#[async_trait]
impl FilterSourcePort for MockFilterSource {
    async fn read_lines(&self) -> Result<Vec<String>, DomainError> {
        self.lines.read().unwrap().clone()
    }

    fn describe(&self) -> String {
        "mock".to_string()
    }
}

pub fn client() -> SocketAddr {
    "192.168.1.100:40000".parse().unwrap()
}

pub fn request(domain: &str, record_type: RecordType) -> DnsRequest {
    request_with_class(domain, record_type, QueryClass::IN)
}

pub fn request_with_class(
    domain: &str,
    record_type: RecordType,
    query_class: QueryClass,
) -> DnsRequest {
    let query = DnsQuery::new(0x1234, domain, record_type, query_class);
    let packet: Arc<[u8]> = Arc::from(vec![0x12, 0x34, 0x01, 0x00].as_slice());
    DnsRequest::new(query, client(), packet)
}
