//! Caller IP extraction from a trusted reverse-proxy header.

use axum::http::HeaderMap;

/// Header set by Cloudflare to the original client address.
pub const DEFAULT_CLIENT_IP_HEADER: &str = "CF-Connecting-IP";

/// Returns the raw value of the client-IP header, or an empty string.
///
/// The value is not parsed here: the submission gate rejects anything that is
/// not a valid IP address, so a missing or non-UTF-8 header simply yields a
/// string that fails that check.
///
/// The raw socket address is deliberately ignored. The service is expected to
/// run behind a proxy that sets `header_name`.
pub fn client_ip_from_headers(headers: &HeaderMap, header_name: &str) -> String {
    headers
        .get(header_name)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}
