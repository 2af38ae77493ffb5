//! Original-URL validation.

use url::Url;

/// Returns true if `input` parses as an absolute URL with a non-empty scheme and host.
///
/// Any scheme is accepted; the URL is stored exactly as given.
///
/// # Examples
///
/// ```ignore
/// assert!(is_valid_url("https://example.com/path"));
/// assert!(!is_valid_url("example.com"));
/// assert!(!is_valid_url("not a url"));
/// ```
pub fn is_valid_url(input: &str) -> bool {
    match Url::parse(input) {
        Ok(url) => !url.scheme().is_empty() && url.host_str().is_some_and(|host| !host.is_empty()),
        Err(_) => false,
    }
}
