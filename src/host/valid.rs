/// Maximum hostname length in characters
pub const MAX_HOSTNAME_LENGTH: usize = 255;

/// Maximum label length in characters
pub const MAX_LABEL_LENGTH: usize = 63;

/// Check RFC 1035 style hostname syntax.
///
/// Labels are 1 to 63 ASCII letters, digits or hyphens, not starting or
/// ending with a hyphen. A single trailing dot is allowed.
pub fn is_valid_hostname(hostname: &str) -> bool {
    if hostname.is_empty() || hostname.len() > MAX_HOSTNAME_LENGTH {
        return false;
    }

    let hostname = hostname.strip_suffix('.').unwrap_or(hostname);
    if hostname.is_empty() {
        return false;
    }

    hostname.split('.').all(is_valid_label)
}

fn is_valid_label(label: &str) -> bool {
    let bytes = label.as_bytes();
    let (Some(first), Some(last)) = (bytes.first(), bytes.last()) else {
        return false;
    };
    bytes.len() <= MAX_LABEL_LENGTH
        && first.is_ascii_alphanumeric()
        && last.is_ascii_alphanumeric()
        && bytes.iter().all(|b| b.is_ascii_alphanumeric() || *b == b'-')
}
