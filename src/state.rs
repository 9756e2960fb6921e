//! Shared state injected into every handler.

use std::sync::Arc;

use crate::application::services::SubmissionGate;
use crate::config::Config;
use crate::domain::TokenStore;
use crate::infrastructure::captcha::CaptchaError;

/// Handles to the store and the gate, cheap to clone per request.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<TokenStore>,
    pub gate: Arc<SubmissionGate>,
    /// Header the create handler reads the caller's IP from.
    pub client_ip_header: Arc<str>,
}

impl AppState {
    pub fn new(
        store: Arc<TokenStore>,
        gate: Arc<SubmissionGate>,
        client_ip_header: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            store,
            gate,
            client_ip_header: client_ip_header.into(),
        }
    }

    /// Builds an empty store and a gate wired to it from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`CaptchaError`] if the verification client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self, CaptchaError> {
        let store = Arc::new(TokenStore::with_config(
            config.store_capacity,
            config.collision_policy,
        ));
        let gate = Arc::new(SubmissionGate::from_config(store.clone(), &config.captcha)?);

        Ok(Self::new(store, gate, config.client_ip_header.as_str()))
    }
}
