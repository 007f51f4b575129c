use super::block_index::BlockIndex;
use super::compiler::compile_block_index;
use arc_swap::ArcSwap;
use dns_sieve_application::ports::{BlockFilterPort, FilterDecision};
use dns_sieve_domain::FilterLoadReport;
use std::sync::Arc;
use tracing::info;

/// Filter store shared by every query task.
///
/// Readers take a lock-free snapshot per lookup; `reload` compiles a new index
/// off to the side and publishes it with a single pointer swap, so the live
/// index is never mutated.
pub struct BlockFilterEngine {
    index: ArcSwap<BlockIndex>,
}

impl BlockFilterEngine {
    pub fn empty() -> Self {
        Self {
            index: ArcSwap::from_pointee(BlockIndex::empty()),
        }
    }

    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> (Self, FilterLoadReport) {
        let (index, report) = compile_block_index(lines);
        (
            Self {
                index: ArcSwap::from_pointee(index),
            },
            report,
        )
    }

    pub fn snapshot(&self) -> Arc<BlockIndex> {
        self.index.load_full()
    }
}

impl Default for BlockFilterEngine {
    fn default() -> Self {
        Self::empty()
    }
}

impl BlockFilterPort for BlockFilterEngine {
    #[inline]
    fn check(&self, domain: &str) -> FilterDecision {
        if self.index.load().is_blocked(domain) {
            FilterDecision::Block
        } else {
            FilterDecision::Allow
        }
    }

    fn rule_count(&self) -> usize {
        self.index.load().total_blocked_domains
    }

    fn reload(&self, lines: &[String]) -> FilterLoadReport {
        let (index, report) = compile_block_index(lines);
        let previous = self.index.swap(Arc::new(index));

        info!(
            previous = previous.total_blocked_domains,
            current = report.loaded,
            "Block filter snapshot swapped"
        );

        report
    }
}
