//! Public suffix trie.
//!
//! Rules and exception rules are kept in two separate label tries keyed from
//! the TLD inward. Lookups never mutate the trie, so a built trie can be
//! shared between threads behind an `Arc` without locking.

use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use super::node::TrieNode;
use crate::error::{Result, TldError};
use crate::parser::{parse_rules, parse_rules_from_file};
use crate::types::RuleRecord;

/// Deepest terminal reached by a walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Candidate {
    /// Number of hostname labels consumed
    depth: usize,
    /// Whether the path went through a `*` node
    wildcard: bool,
}

impl Candidate {
    /// Deeper wins; at equal depth an exact path beats a wildcard one.
    fn beats(&self, other: &Candidate) -> bool {
        self.depth > other.depth || (self.depth == other.depth && other.wildcard && !self.wildcard)
    }
}

fn best_of(current: Option<Candidate>, found: Option<Candidate>) -> Option<Candidate> {
    match (current, found) {
        (Some(c), Some(f)) if f.beats(&c) => Some(f),
        (Some(c), _) => Some(c),
        (None, f) => f,
    }
}

/// Walk `node` with `labels[depth..]`, following both the exact child and the
/// wildcard child at every level.
fn longest_match(
    node: &TrieNode,
    labels: &[&str],
    depth: usize,
    wildcard: bool,
) -> Option<Candidate> {
    let mut best = if depth > 0 && node.is_terminal() {
        Some(Candidate { depth, wildcard })
    } else {
        None
    };

    let Some(label) = labels.get(depth) else {
        return best;
    };

    if let Some(child) = node.child(label) {
        best = best_of(best, longest_match(child, labels, depth + 1, wildcard));
    }
    if let Some(child) = node.wildcard() {
        best = best_of(best, longest_match(child, labels, depth + 1, true));
    }

    best
}

/// Hostname labels, TLD first
fn reversed_labels(hostname: &str) -> Vec<&str> {
    hostname.rsplit('.').collect()
}

/// Compiled public suffix rule set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuffixTrie {
    rules: TrieNode,
    exceptions: TrieNode,
}

impl SuffixTrie {
    /// Create an empty trie
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a trie from parsed rule records.
    pub fn build<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a RuleRecord>,
    {
        let mut trie = Self::new();
        for record in records {
            trie.insert(record);
        }
        debug!(
            "Built suffix trie with {} rules and {} exceptions",
            trie.rule_count(),
            trie.exception_count()
        );
        trie
    }

    /// Parse rule list text and build a trie from it.
    pub fn from_rules_text(text: &str) -> Self {
        Self::build(&parse_rules(text))
    }

    /// Read a rule list file and build a trie from it.
    pub fn from_rules_file(path: impl AsRef<Path>) -> Result<Self> {
        let records = parse_rules_from_file(path)?;
        Ok(Self::build(&records))
    }

    /// Load a trie from its JSON form (`{"rules": {..}, "exceptions": {..}}`).
    ///
    /// The structure is checked up front so that lookups never see a
    /// malformed trie.
    pub fn from_json(json: &str) -> Result<Self> {
        let trie: SuffixTrie = serde_json::from_str(json)?;
        trie.rules.validate(&mut Vec::new())?;
        trie.exceptions.validate(&mut Vec::new())?;
        debug!(
            "Loaded suffix trie with {} rules and {} exceptions",
            trie.rule_count(),
            trie.exception_count()
        );
        Ok(trie)
    }

    /// Load a trie from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| {
            TldError::ParseError(format!(
                "Failed to read trie file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&json)
    }

    /// Serialize the trie to JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    fn insert(&mut self, record: &RuleRecord) {
        if record.is_empty() {
            return;
        }
        if record.is_exception {
            self.exceptions.insert(record.labels.as_slice());
        } else {
            self.rules.insert(record.labels.as_slice());
        }
    }

    /// Root of the rule trie
    pub fn rules(&self) -> &TrieNode {
        &self.rules
    }

    /// Root of the exception trie
    pub fn exceptions(&self) -> &TrieNode {
        &self.exceptions
    }

    pub fn rule_count(&self) -> usize {
        self.rules.rule_count()
    }

    pub fn exception_count(&self) -> usize {
        self.exceptions.rule_count()
    }

    /// Check if the trie holds no rules at all
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty() && self.exceptions.is_empty()
    }

    /// Whether `hostname` as a whole is a declared rule.
    ///
    /// Exact labels only: wildcards and exceptions are not consulted.
    pub fn has_tld(&self, hostname: &str) -> bool {
        if hostname.is_empty() {
            return false;
        }
        let mut node = &self.rules;
        for label in hostname.rsplit('.') {
            match node.child(label) {
                Some(child) => node = child,
                None => return false,
            }
        }
        node.is_terminal()
    }

    /// Longest public suffix of `hostname` according to the rules, or `None`
    /// when no rule matches.
    ///
    /// A matching exception at least as deep as the winning rule takes
    /// precedence and yields its own match minus the leftmost label.
    pub fn suffix_lookup(&self, hostname: &str) -> Option<String> {
        let labels = reversed_labels(hostname);

        let rule = longest_match(&self.rules, &labels, 0, false)?;

        let depth = match longest_match(&self.exceptions, &labels, 0, false) {
            Some(exception) if exception.depth >= rule.depth => exception.depth - 1,
            _ => rule.depth,
        };
        if depth == 0 {
            return None;
        }

        let mut suffix: Vec<&str> = labels[..depth].to_vec();
        suffix.reverse();
        Some(suffix.join("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trie(text: &str) -> SuffixTrie {
        SuffixTrie::from_rules_text(text)
    }

    #[test]
    fn test_candidate_ordering() {
        let exact = Candidate { depth: 2, wildcard: false };
        let wild = Candidate { depth: 2, wildcard: true };
        let deeper_wild = Candidate { depth: 3, wildcard: true };

        assert!(exact.beats(&wild));
        assert!(!wild.beats(&exact));
        assert!(deeper_wild.beats(&exact));
        assert!(!exact.beats(&exact));
    }

    #[test]
    fn test_empty_trie() {
        let t = SuffixTrie::new();
        assert!(t.is_empty());
        assert!(!t.has_tld("com"));
        assert_eq!(t.suffix_lookup("example.com"), None);
    }

    #[test]
    fn test_has_tld_requires_full_match() {
        let t = trie("com\nco.uk\n*.ck");
        assert!(t.has_tld("com"));
        assert!(t.has_tld("co.uk"));
        assert!(!t.has_tld("uk"));
        assert!(!t.has_tld("example.com"));
        assert!(!t.has_tld("www.ck"));
        assert!(!t.has_tld(""));
    }

    #[test]
    fn test_suffix_lookup_prefers_longest_rule() {
        let t = trie("uk\nco.uk");
        assert_eq!(t.suffix_lookup("google.co.uk").as_deref(), Some("co.uk"));
        assert_eq!(t.suffix_lookup("bl.uk").as_deref(), Some("uk"));
        assert_eq!(t.suffix_lookup("example.com"), None);
    }

    #[test]
    fn test_exception_removes_one_label() {
        let t = trie("*.ck\n!www.ck");
        assert_eq!(t.suffix_lookup("www.www.ck").as_deref(), Some("ck"));
        assert_eq!(t.suffix_lookup("www.ck").as_deref(), Some("ck"));
        assert_eq!(t.suffix_lookup("foo.other.ck").as_deref(), Some("other.ck"));
    }

    #[test]
    fn test_shallower_exception_does_not_apply() {
        // Exception at depth 2, rule at depth 3
        let t = trie("*.*.jp\n!city.jp");
        assert_eq!(t.suffix_lookup("a.b.city.jp").as_deref(), Some("b.city.jp"));
    }

    #[test]
    fn test_exception_without_rule_is_ignored() {
        let t = trie("!www.example");
        assert_eq!(t.suffix_lookup("www.example"), None);
    }

    #[test]
    fn test_deeper_wildcard_beats_shallower_exact() {
        let t = trie("bar.baz\n*.bar.baz");
        assert_eq!(t.suffix_lookup("x.foo.bar.baz").as_deref(), Some("foo.bar.baz"));
    }

    #[test]
    fn test_json_roundtrip_preserves_lookups() {
        let t = trie("com\nco.uk\n*.ck\n!www.ck");
        let json = t.to_json().unwrap();
        let loaded = SuffixTrie::from_json(&json).unwrap();
        assert_eq!(loaded, t);
        assert_eq!(loaded.suffix_lookup("www.www.ck").as_deref(), Some("ck"));
    }

    #[test]
    fn test_json_layout() {
        let t = trie("co.uk\n!www.ck");
        let json = t.to_json().unwrap();
        assert_eq!(
            json,
            r#"{"rules":{"uk":{"co":{"$":0}}},"exceptions":{"ck":{"www":{"$":0}}}}"#
        );
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        assert!(SuffixTrie::from_json(r#"{"rules":{"uk":1},"exceptions":{}}"#).is_err());
        assert!(SuffixTrie::from_json(r#"{"rules":{}}"#).is_err());
        assert!(matches!(
            SuffixTrie::from_json(r#"{"rules":{"a.b":{"$":0}},"exceptions":{}}"#),
            Err(TldError::InvalidTrie(_))
        ));
    }

    #[test]
    fn test_from_json_file() {
        let dir = std::env::temp_dir().join("tld_engine_trie_test");
        let _ = fs::create_dir_all(&dir);
        let file_path = dir.join("rules.json");
        fs::write(&file_path, trie("com\nco.uk").to_json().unwrap()).unwrap();

        let loaded = SuffixTrie::from_json_file(&file_path).unwrap();
        assert!(loaded.has_tld("co.uk"));
        assert_eq!(loaded.rule_count(), 2);

        let _ = fs::remove_file(&file_path);
        let _ = fs::remove_dir(&dir);

        assert!(SuffixTrie::from_json_file("/nonexistent/rules.json").is_err());
    }
}
