//! TLD Engine - public suffix, domain and subdomain extraction for Rust
//!
//! This library classifies URLs, bare hostnames and loosely formatted strings:
//! - Hostname extraction (scheme, credentials, port, path and trailing dot stripped)
//! - Hostname validation and IP literal detection
//! - Public suffix lookup (exact, wildcard and exception rules)
//! - Registrable domain and subdomain resolution
//! - Caller-declared valid hosts that take precedence over the rule list
//! - LRU caching of parse results
//!
//! # Example
//!
//! ```rust
//! use tld_engine_r::{ExtractorOptions, TldExtractor};
//!
//! let rules = "
//! // uk
//! uk
//! co.uk
//!
//! // ck
//! *.ck
//! !www.ck
//! ";
//!
//! let extractor = TldExtractor::new(
//!     ExtractorOptions::new()
//!         .with_rules_text(rules)
//!         .with_valid_hosts(["localhost"]),
//! );
//!
//! let result = extractor.parse("https://user@fr.google.co.uk:8080/maps");
//! assert_eq!(result.hostname.as_deref(), Some("fr.google.co.uk"));
//! assert_eq!(result.public_suffix.as_deref(), Some("co.uk"));
//! assert_eq!(result.domain.as_deref(), Some("google.co.uk"));
//! assert_eq!(result.subdomain.as_deref(), Some("fr"));
//!
//! assert_eq!(extractor.get_public_suffix("www.www.ck").as_deref(), Some("ck"));
//! assert_eq!(extractor.get_domain("vhost.localhost").as_deref(), Some("localhost"));
//! ```
//!
//! # Rule Syntax
//!
//! One rule per line, as in the Public Suffix List:
//!
//! | Rule | Example | Description |
//! |------|---------|-------------|
//! | Exact | `co.uk` | The listed labels are a public suffix |
//! | Wildcard | `*.ck` | Any label in the `*` position |
//! | Exception | `!www.ck` | Carves a registrable domain out of a wildcard |
//! | Comment | `// text` | Ignored, as are blank lines |
//!
//! Text after the first whitespace on a line is ignored. Non-ASCII labels are
//! punycode-encoded. When no rule matches, the last label is the public suffix.

pub mod error;
pub mod extractor;
pub mod host;
pub mod parser;
pub mod resolve;
pub mod rules;
pub mod trie;
pub mod types;

// Re-export commonly used items
pub use error::{Result, TldError};
pub use extractor::{default_extractor, ExtractorOptions, TldExtractor, DEFAULT_CACHE_SIZE};
pub use host::{
    extract_hostname, is_ip, is_valid_hostname, DefaultHostnameExtractor, HostnameExtractor,
};
pub use parser::{parse_rule_line, parse_rules, parse_rules_from_file};
pub use rules::default_rules;
pub use trie::SuffixTrie;
pub use types::{ParseResult, RuleRecord, Step};

/// Parse `input` with the bundled rules.
pub fn parse(input: &str) -> ParseResult {
    default_extractor().parse(input)
}

/// Whether the hostname of `input`, or its TLD, is a declared suffix.
pub fn tld_exists(input: &str) -> bool {
    default_extractor().tld_exists(input)
}

/// Public suffix of `input` with the bundled rules.
pub fn get_public_suffix(input: &str) -> Option<String> {
    default_extractor().get_public_suffix(input)
}

/// Registrable domain of `input` with the bundled rules.
pub fn get_domain(input: &str) -> Option<String> {
    default_extractor().get_domain(input)
}

/// Subdomain of `input` with the bundled rules.
pub fn get_subdomain(input: &str) -> Option<String> {
    default_extractor().get_subdomain(input)
}
