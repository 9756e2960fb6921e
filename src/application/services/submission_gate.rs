//! Write-path admission: captcha check, URL validation, token minting.

use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::config::CaptchaConfig;
use crate::domain::TokenStore;
use crate::error::AppError;
use crate::infrastructure::captcha::{CaptchaError, CaptchaVerifier, TurnstileVerifier};
use crate::utils::url_normalizer::normalize_url;

/// Guards [`TokenStore::insert`].
///
/// A create request is admitted only if the captcha proof verifies (when
/// enforcement is on) and the URL is a valid absolute URL. Verification runs
/// before the store is touched, so the store lock is never held across the
/// outbound call.
pub struct SubmissionGate {
    store: Arc<TokenStore>,
    verifier: Option<Arc<dyn CaptchaVerifier>>,
}

impl SubmissionGate {
    /// Creates a gate. `None` disables captcha enforcement.
    pub fn new(store: Arc<TokenStore>, verifier: Option<Arc<dyn CaptchaVerifier>>) -> Self {
        Self { store, verifier }
    }

    /// Creates a gate, wiring up a [`TurnstileVerifier`] when the config enables captcha.
    ///
    /// # Errors
    ///
    /// Returns [`CaptchaError`] if the verification HTTP client cannot be built.
    pub fn from_config(
        store: Arc<TokenStore>,
        captcha: &CaptchaConfig,
    ) -> Result<Self, CaptchaError> {
        let verifier: Option<Arc<dyn CaptchaVerifier>> = match (captcha.enabled, &captcha.secret) {
            (true, Some(secret)) => Some(Arc::new(TurnstileVerifier::new(
                captcha.verify_url.clone(),
                secret.clone(),
                Duration::from_secs(captcha.timeout_seconds),
            )?)),
            _ => None,
        };

        Ok(Self::new(store, verifier))
    }

    pub fn captcha_enabled(&self) -> bool {
        self.verifier.is_some()
    }

    /// Checks `raw_url` and returns its canonical form.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Invalid`] if the URL is empty or not a valid absolute URL.
    pub fn validate(&self, raw_url: &str) -> Result<String, AppError> {
        normalize_url(raw_url).map_err(|e| AppError::invalid(e.to_string()))
    }

    /// Verifies a human-presence proof for the caller at `client_ip`.
    ///
    /// Fails closed: an empty proof, an unparseable IP, a transport error, a
    /// non-200 answer or a malformed body all yield `false`. Returns `true`
    /// without any network call when captcha enforcement is disabled.
    pub async fn verify_human(&self, proof_token: &str, client_ip: &str) -> bool {
        let Some(verifier) = &self.verifier else {
            return true;
        };

        if proof_token.is_empty() {
            debug!("Captcha token missing");
            return false;
        }

        let Ok(ip) = client_ip.parse::<IpAddr>() else {
            debug!(client_ip, "Client IP missing or invalid");
            return false;
        };

        match verifier.verify(proof_token, ip).await {
            Ok(success) => success,
            Err(e) => {
                warn!(error = %e, "Captcha verification failed, denying request");
                false
            }
        }
    }

    /// Admits a new short link and returns its token.
    ///
    /// # Errors
    ///
    /// - [`AppError::Unauthorized`] if captcha is enabled and verification fails
    /// - [`AppError::Invalid`] if the URL is missing or malformed
    pub async fn create(
        &self,
        raw_url: &str,
        proof_token: &str,
        client_ip: &str,
    ) -> Result<String, AppError> {
        if self.captcha_enabled() && !self.verify_human(proof_token, client_ip).await {
            return Err(AppError::Unauthorized);
        }

        let target = self.validate(raw_url)?;
        let token = self.store.insert(target);

        debug!(token = %token, "Short link created");

        Ok(token)
    }
}
