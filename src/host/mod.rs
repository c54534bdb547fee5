//! Hostname extraction, validation and IP literal detection.

mod extract;
mod ip;
mod valid;

pub use extract::{extract_hostname, DefaultHostnameExtractor, HostnameExtractor};
pub use ip::{is_ip, is_ipv4, is_ipv6};
pub use valid::{is_valid_hostname, MAX_HOSTNAME_LENGTH, MAX_LABEL_LENGTH};
