//! URL validation and canonicalization.
//!
//! A target URL is accepted if it parses as an absolute URL under the WHATWG
//! URL grammar. The stored form is the parser's own serialization, so
//! equivalent spellings collapse to one canonical string:
//!
//! - scheme and host of special schemes are lowercased
//! - default ports (80 for HTTP, 443 for HTTPS) are dropped
//! - an empty path on special schemes becomes `/`
//! - characters outside the allowed sets are percent-encoded
//!
//! Query and fragment are kept as given.

use url::Url;

/// Errors that can occur during URL normalization.
#[derive(Debug, thiserror::Error)]
pub enum UrlNormalizationError {
    #[error("URL is empty")]
    Empty,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(#[from] url::ParseError),
}

/// Parses `input` as an absolute URL and returns its canonical serialization.
///
/// # Errors
///
/// Returns [`UrlNormalizationError::Empty`] for an empty or blank string and
/// [`UrlNormalizationError::InvalidFormat`] for anything the URL parser rejects,
/// including relative references such as `example.com` or `/path`.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(
///     normalize_url("HTTPS://EXAMPLE.COM:443/Path").unwrap(),
///     "https://example.com/Path"
/// );
/// assert!(normalize_url("not a url").is_err());
/// ```
pub fn normalize_url(input: &str) -> Result<String, UrlNormalizationError> {
    if input.trim().is_empty() {
        return Err(UrlNormalizationError::Empty);
    }

    let url = Url::parse(input)?;

    Ok(url.into())
}
