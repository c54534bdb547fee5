use thiserror::Error;

/// TLD engine error types.
///
/// Classification itself never fails; these are only returned while loading
/// rulesets or compiled tries.
#[derive(Error, Debug)]
pub enum TldError {
    #[error("Invalid trie: {0}")]
    InvalidTrie(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TldError>;
