#![allow(dead_code)]

use async_trait::async_trait;
use dns_sieve_application::ports::{
    BlockFilterPort, FilterDecision, FilterSourcePort, PendingExchangePort,
};
use dns_sieve_domain::{DomainError, FilterLoadReport};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Instant;

/// Deadlines only; enough to observe what the sweep evicts.
pub struct MockPendingExchanges {
    deadlines: Mutex<Vec<Instant>>,
    sweeps: AtomicUsize,
}

impl MockPendingExchanges {
    pub fn new() -> Self {
        Self {
            deadlines: Mutex::new(Vec::new()),
            sweeps: AtomicUsize::new(0),
        }
    }

    pub fn add(&self, deadline: Instant) {
        self.deadlines.lock().unwrap().push(deadline);
    }

    pub fn sweep_count(&self) -> usize {
        self.sweeps.load(Ordering::SeqCst)
    }
}

impl PendingExchangePort for MockPendingExchanges {
    fn sweep_expired(&self, now: Instant) -> usize {
        self.sweeps.fetch_add(1, Ordering::SeqCst);
        let mut deadlines = self.deadlines.lock().unwrap();
        let before = deadlines.len();
        deadlines.retain(|d| *d > now);
        before - deadlines.len()
    }

    fn pending_count(&self) -> usize {
        self.deadlines.lock().unwrap().len()
    }
}

/// Stores the raw lines it was last reloaded with.
pub struct MockBlockFilter {
    lines: Mutex<Vec<String>>,
    reloads: AtomicUsize,
}

impl MockBlockFilter {
    pub fn new() -> Self {
        Self {
            lines: Mutex::new(Vec::new()),
            reloads: AtomicUsize::new(0),
        }
    }

    pub fn reload_count(&self) -> usize {
        self.reloads.load(Ordering::SeqCst)
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

impl BlockFilterPort for MockBlockFilter {
    fn check(&self, domain: &str) -> FilterDecision {
        if self.lines.lock().unwrap().iter().any(|l| l == domain) {
            FilterDecision::Block
        } else {
            FilterDecision::Allow
        }
    }

    fn rule_count(&self) -> usize {
        self.lines.lock().unwrap().len()
    }

    fn reload(&self, lines: &[String]) -> FilterLoadReport {
        self.reloads.fetch_add(1, Ordering::SeqCst);
        *self.lines.lock().unwrap() = lines.to_vec();
        FilterLoadReport {
            loaded: lines.len(),
            ..Default::default()
        }
    }
}

pub struct MockFilterSource {
    lines: Vec<String>,
    fail: AtomicBool,
    reads: AtomicUsize,
}

impl MockFilterSource {
    pub fn new(lines: &[&str]) -> Self {
        Self {
            lines: lines.iter().map(|l| l.to_string()).collect(),
            fail: AtomicBool::new(false),
            reads: AtomicUsize::new(0),
        }
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FilterSourcePort for MockFilterSource {
    async fn read_lines(&self) -> Result<Vec<String>, DomainError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(DomainError::IoError("mock read failure".to_string()));
        }
        Ok(self.lines.clone())
    }

    fn describe(&self) -> String {
        "mock".to_string()
    }
}
