pub mod block_index;
pub mod compiler;
pub mod engine;
pub mod suffix_trie;

pub use block_index::BlockIndex;
pub use compiler::compile_block_index;
pub use engine::BlockFilterEngine;
pub use suffix_trie::SuffixTrie;
