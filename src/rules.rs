//! Bundled public suffix rules.

use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::trie::SuffixTrie;

/// Rule list compiled into the crate
#[cfg(feature = "bundled")]
pub const BUNDLED_RULES: &str = include_str!("../data/public_suffix_list.dat");

/// Rule list compiled into the crate (disabled: every lookup falls back to
/// the last label)
#[cfg(not(feature = "bundled"))]
pub const BUNDLED_RULES: &str = "";

static DEFAULT_RULES: Lazy<Arc<SuffixTrie>> =
    Lazy::new(|| Arc::new(SuffixTrie::from_rules_text(BUNDLED_RULES)));

/// Shared trie built from the bundled rule list on first use.
pub fn default_rules() -> Arc<SuffixTrie> {
    DEFAULT_RULES.clone()
}
