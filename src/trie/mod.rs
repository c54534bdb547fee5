//! Label tries for public suffix matching.
//!
//! ## Example
//!
//! ```
//! use tld_engine_r::trie::SuffixTrie;
//!
//! let trie = SuffixTrie::from_rules_text("uk\nco.uk\n*.ck\n!www.ck");
//!
//! assert!(trie.has_tld("co.uk"));
//! assert_eq!(trie.suffix_lookup("google.co.uk").as_deref(), Some("co.uk"));
//! assert_eq!(trie.suffix_lookup("www.www.ck").as_deref(), Some("ck"));
//! assert_eq!(trie.suffix_lookup("example.com"), None);
//! ```

mod node;
mod suffix;

pub use node::{TrieNode, TERMINAL_KEY, WILDCARD};
pub use suffix::SuffixTrie;
