use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Result, TldError};

/// Key marking a terminal node in the serialized form
pub const TERMINAL_KEY: &str = "$";

/// Label matching any single label
pub const WILDCARD: &str = "*";

/// A hostname has at most 127 labels within 255 characters
pub(crate) const MAX_DEPTH: usize = 127;

/// Label trie node.
///
/// The path from the root is the rule; a node only records whether a rule
/// ends here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrieNode {
    children: HashMap<String, TrieNode>,
    terminal: bool,
}

impl TrieNode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a label path (TLD first), creating nodes on demand.
    pub fn insert<S: AsRef<str>>(&mut self, labels: &[S]) {
        let mut current = self;
        for label in labels {
            current = current
                .children
                .entry(label.as_ref().to_string())
                .or_default();
        }
        current.terminal = true;
    }

    /// Child for an exact label
    pub fn child(&self, label: &str) -> Option<&TrieNode> {
        self.children.get(label)
    }

    /// Child for the `*` label
    pub fn wildcard(&self) -> Option<&TrieNode> {
        self.children.get(WILDCARD)
    }

    /// Whether a rule ends at this node
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// Check if the node has no children and is not terminal
    pub fn is_empty(&self) -> bool {
        self.children.is_empty() && !self.terminal
    }

    /// Number of rules stored below (and including) this node
    pub fn rule_count(&self) -> usize {
        let own = usize::from(self.terminal);
        own + self.children.values().map(TrieNode::rule_count).sum::<usize>()
    }

    /// Check structural consistency of a deserialized trie.
    pub(crate) fn validate(&self, path: &mut Vec<String>) -> Result<()> {
        if path.len() > MAX_DEPTH {
            return Err(TldError::InvalidTrie(format!(
                "rule deeper than {} labels at '{}'",
                MAX_DEPTH,
                display_path(path)
            )));
        }
        for (label, child) in &self.children {
            if label.is_empty() || label.contains('.') {
                return Err(TldError::InvalidTrie(format!(
                    "invalid label {:?} under '{}'",
                    label,
                    display_path(path)
                )));
            }
            path.push(label.clone());
            child.validate(path)?;
            path.pop();
        }
        Ok(())
    }
}

/// Render a reversed label path in natural order
fn display_path(path: &[String]) -> String {
    path.iter().rev().cloned().collect::<Vec<_>>().join(".")
}

impl Serialize for TrieNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.children.len() + usize::from(self.terminal)))?;
        if self.terminal {
            map.serialize_entry(TERMINAL_KEY, &0u8)?;
        }
        // Sorted for stable output
        let sorted: BTreeMap<&String, &TrieNode> = self.children.iter().collect();
        for (label, child) in sorted {
            map.serialize_entry(label, child)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for TrieNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(TrieNodeVisitor)
    }
}

struct TrieNodeVisitor;

impl<'de> Visitor<'de> for TrieNodeVisitor {
    type Value = TrieNode;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of labels to trie nodes")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<TrieNode, A::Error> {
        let mut node = TrieNode::new();
        while let Some(key) = access.next_key::<String>()? {
            if key == TERMINAL_KEY {
                let _marker: u64 = access.next_value()?;
                node.terminal = true;
            } else {
                let child: TrieNode = access.next_value()?;
                node.children.insert(key, child);
            }
        }
        Ok(node)
    }
}
