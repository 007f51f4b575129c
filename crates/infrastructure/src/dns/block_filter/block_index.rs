use super::suffix_trie::SuffixTrie;
use dns_sieve_domain::normalize_query_name;

/// Immutable compiled snapshot of a filter list.
pub struct BlockIndex {
    pub total_blocked_domains: usize,
    trie: SuffixTrie,
}

impl BlockIndex {
    pub fn new(trie: SuffixTrie) -> Self {
        Self {
            total_blocked_domains: trie.len(),
            trie,
        }
    }

    pub fn empty() -> Self {
        Self::new(SuffixTrie::new())
    }

    /// Case-insensitive; a trailing root dot is ignored.
    #[inline]
    pub fn is_blocked(&self, domain: &str) -> bool {
        if self.trie.is_empty() {
            return false;
        }
        self.trie.matches(&normalize_query_name(domain))
    }
}

impl Default for BlockIndex {
    fn default() -> Self {
        Self::empty()
    }
}
