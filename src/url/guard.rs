//! URL safety guard
//!
//! Classifies a URL as private/internal (loopback, RFC 1918, link-local,
//! cloud metadata endpoints) versus publicly routable. Every fetch goes
//! through this check, and malformed input fails closed.

use crate::url::matcher::matches_host_pattern;
use std::net::{Ipv4Addr, Ipv6Addr};
use url::{Host, Url};

/// Hostnames that never leave the local machine or the cloud control plane
const BLOCKED_HOST_PATTERNS: &[&str] = &[
    "localhost",
    "*.localhost",
    "*.internal",
    "*.local",
    "metadata",
    "metadata.goog",
    "instance-data",
];

/// Returns true if the URL points at a private, internal or metadata address
///
/// Malformed URLs, URLs without a host and non-HTTP(S) schemes are all
/// treated as private.
///
/// # Examples
///
/// ```
/// use site_survey::url::is_private;
///
/// assert!(is_private("http://localhost:3000/"));
/// assert!(is_private("http://169.254.169.254/latest/meta-data/"));
/// assert!(is_private("not a url"));
/// assert!(!is_private("https://example.com/about"));
/// ```
pub fn is_private(url: &str) -> bool {
    match Url::parse(url.trim()) {
        Ok(parsed) => is_private_url(&parsed),
        Err(_) => true,
    }
}

/// Same as [`is_private`] for an already-parsed URL
pub fn is_private_url(url: &Url) -> bool {
    if url.scheme() != "http" && url.scheme() != "https" {
        return true;
    }

    match url.host() {
        None => true,
        Some(Host::Domain(domain)) => is_blocked_hostname(domain),
        Some(Host::Ipv4(ip)) => is_blocked_ipv4(ip),
        Some(Host::Ipv6(ip)) => is_blocked_ipv6(ip),
    }
}

fn is_blocked_hostname(host: &str) -> bool {
    BLOCKED_HOST_PATTERNS
        .iter()
        .any(|pattern| matches_host_pattern(pattern, host))
}

fn is_blocked_ipv4(ip: Ipv4Addr) -> bool {
    // 169.254.169.254 (cloud metadata) falls inside link-local
    ip.is_loopback() || ip.is_private() || ip.is_link_local() || ip.is_unspecified()
}

fn is_blocked_ipv6(ip: Ipv6Addr) -> bool {
    if let Some(mapped) = ip.to_ipv4_mapped() {
        return is_blocked_ipv4(mapped);
    }

    let first = ip.segments()[0];
    let unique_local = (first & 0xfe00) == 0xfc00;
    let link_local = (first & 0xffc0) == 0xfe80;

    ip.is_loopback() || ip.is_unspecified() || unique_local || link_local
}
