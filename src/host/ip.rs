use std::net::{Ipv4Addr, Ipv6Addr};

/// Check if `value` is an IPv4 or IPv6 literal.
///
/// IPv6 addresses must already be stripped of their `[` `]` brackets.
pub fn is_ip(value: &str) -> bool {
    is_ipv4(value) || is_ipv6(value)
}

/// Dotted-quad IPv4 literal
pub fn is_ipv4(value: &str) -> bool {
    value.parse::<Ipv4Addr>().is_ok()
}

/// IPv6 literal, without brackets
pub fn is_ipv6(value: &str) -> bool {
    value.contains(':') && value.parse::<Ipv6Addr>().is_ok()
}
