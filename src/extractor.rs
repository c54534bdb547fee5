//! Resolution pipeline.
//!
//! Extracts the hostname once, then runs validation, suffix lookup, domain
//! and subdomain resolution in order, stopping at the requested [`Step`].

use std::fmt;
use std::num::NonZeroUsize;
use std::path::Path;
use std::sync::Arc;

use lru::LruCache;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use tracing::trace;

use crate::error::Result;
use crate::host::{is_ip, is_valid_hostname, DefaultHostnameExtractor, HostnameExtractor};
use crate::resolve;
use crate::rules::default_rules;
use crate::trie::SuffixTrie;
use crate::types::{ParseResult, Step};

/// Default LRU cache size
pub const DEFAULT_CACHE_SIZE: usize = 1024;

type CacheKey = (String, Step);

/// Extractor builder options.
pub struct ExtractorOptions {
    /// Rule trie, bundled rules when `None`
    pub rules: Option<Arc<SuffixTrie>>,
    /// Hosts treated as registrable domains ahead of the rule list
    pub valid_hosts: Vec<String>,
    /// LRU cache size for parse results, `0` disables caching
    pub cache_size: usize,
    /// Hostname extraction, [`DefaultHostnameExtractor`] when `None`
    pub hostname_extractor: Option<Arc<dyn HostnameExtractor>>,
}

impl Default for ExtractorOptions {
    fn default() -> Self {
        Self {
            rules: None,
            valid_hosts: Vec::new(),
            cache_size: DEFAULT_CACHE_SIZE,
            hostname_extractor: None,
        }
    }
}

impl ExtractorOptions {
    /// Create new extractor options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an already built rule trie.
    pub fn with_rules(mut self, rules: Arc<SuffixTrie>) -> Self {
        self.rules = Some(rules);
        self
    }

    /// Build the rule trie from rule list text.
    pub fn with_rules_text(self, text: &str) -> Self {
        self.with_rules(Arc::new(SuffixTrie::from_rules_text(text)))
    }

    /// Build the rule trie from a rule list file.
    pub fn with_rules_file(self, path: impl AsRef<Path>) -> Result<Self> {
        let trie = SuffixTrie::from_rules_file(path)?;
        Ok(self.with_rules(Arc::new(trie)))
    }

    /// Set valid hosts (lower-cased, trailing dot removed).
    pub fn with_valid_hosts<I, S>(mut self, hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.valid_hosts = hosts
            .into_iter()
            .map(|h| {
                let h = h.as_ref().trim().to_lowercase();
                h.strip_suffix('.').map(str::to_string).unwrap_or(h)
            })
            .filter(|h| !h.is_empty())
            .collect();
        self
    }

    /// Set cache size.
    pub fn with_cache_size(mut self, size: usize) -> Self {
        self.cache_size = size;
        self
    }

    /// Replace hostname extraction.
    ///
    /// The extractor runs outside the cache lock and may itself query the
    /// `TldExtractor` it is installed in.
    pub fn with_hostname_extractor(mut self, extractor: impl HostnameExtractor + 'static) -> Self {
        self.hostname_extractor = Some(Arc::new(extractor));
        self
    }
}

/// Public suffix / domain / subdomain extractor.
///
/// Cheap to share: the rule trie is behind an `Arc` and the cache behind a
/// mutex, so one extractor can serve many threads.
pub struct TldExtractor {
    rules: Arc<SuffixTrie>,
    valid_hosts: Vec<String>,
    hostname_extractor: Arc<dyn HostnameExtractor>,
    cache: Option<Mutex<LruCache<CacheKey, ParseResult>>>,
}

impl Default for TldExtractor {
    fn default() -> Self {
        Self::new(ExtractorOptions::default())
    }
}

impl fmt::Debug for TldExtractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TldExtractor")
            .field("rules", &self.rules.rule_count())
            .field("exceptions", &self.rules.exception_count())
            .field("valid_hosts", &self.valid_hosts)
            .field("cached", &self.cache.is_some())
            .finish_non_exhaustive()
    }
}

impl TldExtractor {
    /// Create a new extractor.
    pub fn new(options: ExtractorOptions) -> Self {
        let cache = NonZeroUsize::new(options.cache_size).map(|n| Mutex::new(LruCache::new(n)));
        Self {
            rules: options.rules.unwrap_or_else(default_rules),
            valid_hosts: options.valid_hosts,
            hostname_extractor: options
                .hostname_extractor
                .unwrap_or_else(|| Arc::new(DefaultHostnameExtractor) as Arc<dyn HostnameExtractor>),
            cache,
        }
    }

    /// Rule trie in use
    pub fn rules(&self) -> &SuffixTrie {
        &self.rules
    }

    /// Configured valid hosts
    pub fn valid_hosts(&self) -> &[String] {
        &self.valid_hosts
    }

    /// Run the full pipeline.
    pub fn parse(&self, input: &str) -> ParseResult {
        self.parse_until(input, Step::All)
    }

    /// Run the pipeline up to `step`.
    pub fn parse_until(&self, input: &str, step: Step) -> ParseResult {
        let Some(cache) = &self.cache else {
            return self.run(input, step);
        };

        let key = (input.to_string(), step);
        if let Some(cached) = cache.lock().get(&key) {
            return cached.clone();
        }

        // Lock released: the hostname extractor may call back into `self`
        let result = self.run(input, step);
        cache.lock().put(key, result.clone());
        result
    }

    fn run(&self, input: &str, step: Step) -> ParseResult {
        let mut result = ParseResult {
            hostname: self.hostname_extractor.extract(input),
            ..ParseResult::default()
        };

        let Some(hostname) = result.hostname.clone() else {
            trace!(input = %input, "no hostname found");
            return result;
        };
        let hostname = hostname.as_str();

        result.is_ip = is_ip(hostname);
        if result.is_ip {
            result.is_valid = true;
            trace!(hostname = %hostname, "ip literal");
            return result;
        }

        result.is_valid = is_valid_hostname(hostname);
        if !result.is_valid {
            trace!(hostname = %hostname, "invalid hostname");
            return result;
        }

        if step.wants_tld_exists() {
            result.tld_exists = resolve::tld_exists(&self.rules, hostname);
        }
        if step == Step::TldExists {
            return result;
        }

        result.public_suffix = resolve::public_suffix(&self.rules, hostname);
        if step == Step::PublicSuffix {
            return result;
        }

        result.domain = result
            .public_suffix
            .as_deref()
            .and_then(|suffix| resolve::domain(&self.valid_hosts, suffix, hostname));
        if step == Step::Domain {
            return result;
        }

        result.subdomain = resolve::subdomain(hostname, result.domain.as_deref());
        result
    }

    /// Extract the hostname with the configured extractor.
    pub fn extract_hostname(&self, input: &str) -> Option<String> {
        self.hostname_extractor.extract(input)
    }

    pub fn is_valid_hostname(&self, hostname: &str) -> bool {
        is_valid_hostname(hostname)
    }

    /// Alias of [`TldExtractor::is_valid_hostname`]
    pub fn is_valid(&self, hostname: &str) -> bool {
        is_valid_hostname(hostname)
    }

    pub fn is_ip(&self, value: &str) -> bool {
        is_ip(value)
    }

    /// Whether the input's hostname, or its TLD, is a declared suffix.
    pub fn tld_exists(&self, input: &str) -> bool {
        self.parse_until(input, Step::TldExists).tld_exists
    }

    pub fn get_public_suffix(&self, input: &str) -> Option<String> {
        self.parse_until(input, Step::PublicSuffix).public_suffix
    }

    pub fn get_domain(&self, input: &str) -> Option<String> {
        self.parse_until(input, Step::Domain).domain
    }

    pub fn get_subdomain(&self, input: &str) -> Option<String> {
        self.parse_until(input, Step::Subdomain).subdomain
    }

    /// Clear the parse result cache
    pub fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.lock().clear();
        }
    }
}

static DEFAULT_EXTRACTOR: Lazy<TldExtractor> = Lazy::new(TldExtractor::default);

/// Process-wide extractor over the bundled rules.
pub fn default_extractor() -> &'static TldExtractor {
    &DEFAULT_EXTRACTOR
}
