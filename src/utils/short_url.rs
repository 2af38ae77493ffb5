//! Building the public short URL returned by `POST /shorten`.

use axum::http::{HeaderMap, header};

/// Builds the short URL for a code.
///
/// If `base_url` is configured it is used as the prefix. Otherwise the prefix
/// is derived from the request: scheme from `X-Forwarded-Proto` (default
/// `http`), authority from the `Host` header (default `localhost`).
///
/// # Examples
///
/// ```ignore
/// let url = build_short_url(Some("https://s.example.com/"), &HeaderMap::new(), "abc123");
/// assert_eq!(url, "https://s.example.com/abc123");
/// ```
pub fn build_short_url(base_url: Option<&str>, headers: &HeaderMap, short_code: &str) -> String {
    match base_url {
        Some(base) => format!("{}/{}", base.trim_end_matches('/'), short_code),
        None => format!(
            "{}://{}/{}",
            request_scheme(headers),
            request_host(headers),
            short_code
        ),
    }
}

fn request_scheme(headers: &HeaderMap) -> &'static str {
    let forwarded = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim);

    match forwarded {
        Some(proto) if proto.eq_ignore_ascii_case("https") => "https",
        _ => "http",
    }
}

fn request_host(headers: &HeaderMap) -> &str {
    headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .filter(|host| !host.is_empty())
        .unwrap_or("localhost")
}
