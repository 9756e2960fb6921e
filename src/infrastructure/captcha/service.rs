//! Captcha verifier trait and error types.

use async_trait::async_trait;
use std::net::IpAddr;

/// Errors that can occur while talking to the verification service.
///
/// The submission gate folds every variant into a denial.
#[derive(Debug, thiserror::Error)]
pub enum CaptchaError {
    #[error("Verification request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Verification request timed out")]
    Timeout,

    #[error("Verification service returned HTTP {0}")]
    Status(u16),

    #[error("Malformed verification response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for CaptchaError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else if e.is_decode() {
            Self::Decode(e.to_string())
        } else {
            Self::Transport(e)
        }
    }
}

/// Server-to-server check of a human-presence proof.
///
/// # Implementations
///
/// - [`crate::infrastructure::captcha::TurnstileVerifier`] - Cloudflare Turnstile `siteverify`
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CaptchaVerifier: Send + Sync {
    /// Submits `response_token` and the caller's address for verification.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if the service accepted the proof
    /// - `Ok(false)` if the service answered and rejected it
    ///
    /// # Errors
    ///
    /// Returns [`CaptchaError`] when no trustworthy answer was obtained.
    async fn verify(&self, response_token: &str, remote_ip: IpAddr) -> Result<bool, CaptchaError>;
}
