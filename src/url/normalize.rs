use crate::UrlError;
use url::Url;

/// Normalizes a URL into the form used for deduplication
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed
/// 2. Reject anything that is not HTTP or HTTPS
/// 3. Keep only the origin (scheme, lowercased host, non-default port)
/// 4. Append the path with every trailing slash removed
/// 5. Drop the query string and fragment
///
/// Normalization is idempotent: feeding the output back in yields the same
/// string.
///
/// # Examples
///
/// ```
/// use site_survey::url::normalize_url;
///
/// let url = normalize_url("HTTPS://Example.COM/About/?ref=nav#team").unwrap();
/// assert_eq!(url, "https://example.com/About");
///
/// let root = normalize_url("https://example.com/").unwrap();
/// assert_eq!(root, "https://example.com");
/// ```
pub fn normalize_url(url_str: &str) -> Result<String, UrlError> {
    let url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;
    normalize_parsed(&url)
}

/// Normalizes an already-parsed URL
///
/// See [`normalize_url`] for the rules applied.
pub fn normalize_parsed(url: &Url) -> Result<String, UrlError> {
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    let origin = url.origin().ascii_serialization();
    let path = url.path().trim_end_matches('/');

    Ok(format!("{}{}", origin, path))
}

/// Returns true if both URLs share scheme, host and port
pub fn same_origin(a: &Url, b: &Url) -> bool {
    a.origin() == b.origin()
}
