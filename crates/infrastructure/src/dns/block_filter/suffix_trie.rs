use compact_str::CompactString;
use dns_sieve_domain::FilterRule;
use rustc_hash::FxBuildHasher;
use smallvec::SmallVec;
use std::collections::HashMap;

#[derive(Default)]
struct TrieNode {
    children: HashMap<CompactString, TrieNode, FxBuildHasher>,
    /// A rule ends here: this name and everything below it is blocked.
    terminal: bool,
}

/// Rules stored as label paths from the TLD inwards, so a lookup costs one
/// hash lookup per label of the queried name regardless of the rule count.
#[derive(Default)]
pub struct SuffixTrie {
    root: TrieNode,
    len: usize,
}

impl SuffixTrie {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when the rule was already present.
    pub fn insert(&mut self, rule: &FilterRule) -> bool {
        let mut node = &mut self.root;
        for label in rule.labels_reversed() {
            node = node.children.entry(CompactString::new(label)).or_default();
        }
        if node.terminal {
            return false;
        }
        node.terminal = true;
        self.len += 1;
        true
    }

    /// `domain` must already be normalized (lowercase, no trailing dot).
    #[inline]
    pub fn matches(&self, domain: &str) -> bool {
        let labels: SmallVec<[&str; 8]> = domain.split('.').rev().collect();
        let mut node = &self.root;

        for label in labels {
            match node.children.get(label) {
                Some(child) => {
                    if child.terminal {
                        return true;
                    }
                    node = child;
                }
                None => return false,
            }
        }

        false
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
