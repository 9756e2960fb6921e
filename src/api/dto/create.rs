//! Query parameters of the create endpoint.

use serde::Deserialize;

/// `POST /?url=...&captcha_token=...`
///
/// Both parameters default to empty so that a missing value is reported by
/// the gate (`Invalid` / `Unauthorized`) rather than by the extractor.
#[derive(Debug, Default, Deserialize)]
pub struct CreateQuery {
    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub captcha_token: String,
}
