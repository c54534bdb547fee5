//! Suffix, domain and subdomain resolution over a validated hostname.

use crate::trie::SuffixTrie;

/// Rightmost label of `hostname` (the whole hostname if it has no dot).
pub fn last_label(hostname: &str) -> &str {
    match hostname.rfind('.') {
        Some(pos) => &hostname[pos + 1..],
        None => hostname,
    }
}

/// Public suffix of `hostname`, including exact matches.
///
/// Falls back to the implicit `*` rule (the last label) when no rule matches,
/// so a non-empty hostname always has a suffix.
pub fn public_suffix(rules: &SuffixTrie, hostname: &str) -> Option<String> {
    if rules.has_tld(hostname) {
        return Some(hostname.to_string());
    }

    if let Some(suffix) = rules.suffix_lookup(hostname) {
        return Some(suffix);
    }

    let tld = last_label(hostname);
    if tld.is_empty() {
        return None;
    }
    Some(tld.to_string())
}

/// Whether `hostname` itself, or its last label, is a declared suffix.
pub fn tld_exists(rules: &SuffixTrie, hostname: &str) -> bool {
    rules.has_tld(hostname) || rules.has_tld(last_label(hostname))
}

/// `hostname` equals `suffix` or ends with `.suffix`
fn share_suffix(hostname: &str, suffix: &str) -> bool {
    match hostname.strip_suffix(suffix) {
        Some("") => true,
        Some(rest) => rest.ends_with('.'),
        None => false,
    }
}

/// Registrable domain of `hostname`: the public suffix plus one label.
///
/// Entries of `valid_hosts` covering the hostname win over the rule list.
/// Returns `None` when the hostname is nothing but its public suffix.
pub fn domain<S: AsRef<str>>(
    valid_hosts: &[S],
    public_suffix: &str,
    hostname: &str,
) -> Option<String> {
    if let Some(host) = valid_hosts
        .iter()
        .map(|host| AsRef::<str>::as_ref(host))
        .find(|host| !host.is_empty() && share_suffix(hostname, host))
    {
        return Some(host.to_string());
    }

    if hostname.len() <= public_suffix.len() || !share_suffix(hostname, public_suffix) {
        return None;
    }

    // Strip ".suffix" and keep the label just before it
    let rest = &hostname[..hostname.len() - public_suffix.len() - 1];
    let label = last_label(rest);
    Some(format!("{}.{}", label, public_suffix))
}

/// Everything left of the registrable domain.
///
/// Empty when the hostname is the domain itself, `None` without a domain.
pub fn subdomain(hostname: &str, domain: Option<&str>) -> Option<String> {
    let domain = domain?;
    if hostname == domain {
        return Some(String::new());
    }
    let rest = hostname.strip_suffix(domain)?.strip_suffix('.')?;
    Some(rest.to_string())
}
