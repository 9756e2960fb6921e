//! Human-presence verification against a third-party challenge service.
//!
//! Provides a [`CaptchaVerifier`] trait with one production implementation:
//! - [`TurnstileVerifier`] - Cloudflare Turnstile `siteverify` over HTTPS

mod service;
mod turnstile;

pub use service::{CaptchaError, CaptchaVerifier};
pub use turnstile::{TURNSTILE_VERIFY_URL, TurnstileVerifier};

#[cfg(test)]
pub use service::MockCaptchaVerifier;
