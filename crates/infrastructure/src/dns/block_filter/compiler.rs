use super::block_index::BlockIndex;
use super::suffix_trie::SuffixTrie;
use dns_sieve_domain::{validate_filter_line, FilterLine, FilterLoadReport, FilterWarning};
use std::time::Instant;
use tracing::debug;

/// Validates every line and builds a fresh index from the accepted ones.
///
/// Duplicates collapse, so `report.loaded` counts distinct rules. Warnings keep
/// the input order.
pub fn compile_block_index<S: AsRef<str>>(lines: &[S]) -> (BlockIndex, FilterLoadReport) {
    let start = Instant::now();
    let mut trie = SuffixTrie::new();
    let mut report = FilterLoadReport::default();
    let mut duplicates = 0usize;

    for (i, raw) in lines.iter().enumerate() {
        let raw = raw.as_ref();
        match validate_filter_line(raw) {
            FilterLine::Skip => report.skipped += 1,
            FilterLine::Rule(rule) => {
                if !trie.insert(&rule) {
                    duplicates += 1;
                }
            }
            FilterLine::Rejected(reason) => report.warnings.push(FilterWarning {
                line_number: i + 1,
                line: raw.trim().to_string(),
                reason,
            }),
        }
    }

    report.loaded = trie.len();

    debug!(
        lines = lines.len(),
        loaded = report.loaded,
        duplicates,
        rejected = report.rejected(),
        elapsed_us = start.elapsed().as_micros() as u64,
        "Block index compiled"
    );

    (BlockIndex::new(trie), report)
}
