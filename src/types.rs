/// A single public suffix rule parsed from one line of a rule list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleRecord {
    /// `true` for `!`-prefixed exception rules
    pub is_exception: bool,
    /// The ASCII-encoded rule as written, including any `!` marker
    pub source: String,
    /// Labels in reverse order (TLD first), `*` for wildcard positions
    pub labels: Vec<String>,
}

impl RuleRecord {
    /// Number of labels in the rule
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Check if the rule has no labels
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Whether any label position is a wildcard
    pub fn is_wildcard(&self) -> bool {
        self.labels.iter().any(|l| l == "*")
    }
}

/// Where the resolution pipeline should stop.
///
/// Each level computes everything the previous levels compute, except
/// `tld_exists` which is only evaluated for [`Step::TldExists`] and [`Step::All`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Step {
    TldExists,
    PublicSuffix,
    Domain,
    Subdomain,
    All,
}

impl Step {
    /// Whether the `tld_exists` field is computed at this level
    pub(crate) fn wants_tld_exists(self) -> bool {
        matches!(self, Step::TldExists | Step::All)
    }
}

/// Everything known about one input after running the pipeline.
///
/// Fields that were not reached (early stop, IP literal, invalid hostname)
/// keep their defaults: `None` for strings and `false` for `tld_exists`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseResult {
    /// Normalized hostname, `None` if nothing hostname-like was found
    pub hostname: Option<String>,
    /// Hostname is syntactically valid (always `true` for IP literals)
    pub is_valid: bool,
    /// Hostname is an IPv4 or IPv6 literal
    pub is_ip: bool,
    /// The hostname, or its last label, is a declared suffix
    pub tld_exists: bool,
    /// Longest matching public suffix, or the last label when no rule matches
    pub public_suffix: Option<String>,
    /// Registrable domain: the public suffix plus one label, or a matching valid host
    pub domain: Option<String>,
    /// Empty string when the hostname is the registrable domain itself
    pub subdomain: Option<String>,
}
