/// Checks if a hostname matches a host pattern
///
/// This function supports two types of patterns:
/// 1. Exact match: "localhost" matches only "localhost"
/// 2. Suffix match: "*.internal" matches:
///    - "internal" (the bare label)
///    - "metadata.google.internal" (any depth of subdomain)
///
/// Comparison is case-insensitive and ignores a trailing root dot on the
/// candidate ("localhost." is treated as "localhost").
///
/// # Examples
///
/// ```
/// use site_survey::url::matches_host_pattern;
///
/// assert!(matches_host_pattern("localhost", "LOCALHOST"));
/// assert!(matches_host_pattern("*.internal", "metadata.google.internal"));
/// assert!(matches_host_pattern("*.local", "printer.local."));
/// assert!(!matches_host_pattern("*.local", "localhost"));
/// ```
pub fn matches_host_pattern(pattern: &str, candidate: &str) -> bool {
    let candidate = candidate.trim_end_matches('.').to_ascii_lowercase();
    let pattern = pattern.to_ascii_lowercase();

    if let Some(base) = pattern.strip_prefix("*.") {
        candidate == base || candidate.ends_with(&format!(".{}", base))
    } else {
        candidate == pattern
    }
}
