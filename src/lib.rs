//! # tinylink
//!
//! A minimal URL shortener: it maps a long URL to a random six-character
//! token and resolves tokens back to the URL. Everything lives in memory.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Token format and the capacity-bounded token store
//! - **Application Layer** ([`application`]) - Submission gate guarding the write path
//! - **Infrastructure Layer** ([`infrastructure`]) - Captcha verification client
//! - **API Layer** ([`api`]) - HTTP handlers, request DTOs and middleware
//!
//! ## Capacity wipe
//!
//! The store holds at most `STORE_CAPACITY` links (1000 by default). The
//! create request that arrives when it is full clears **all** existing links
//! before adding its own. Short links are therefore only as durable as the
//! write traffic allows, and never survive a restart.
//!
//! ## Quick Start
//!
//! ```bash
//! # Optional: protect the create endpoint with Cloudflare Turnstile
//! export CLOUDFLARE_TURNSTILE_SECRET_KEY="0x..."
//!
//! cargo run
//!
//! curl -X POST 'http://localhost:3000/?url=https%3A%2F%2Fexample.com'
//! curl http://localhost:3000/aZ09xY
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::SubmissionGate;
    pub use crate::domain::{CollisionPolicy, TokenStore};
    pub use crate::error::AppError;
    pub use crate::infrastructure::captcha::{CaptchaVerifier, TurnstileVerifier};
    pub use crate::state::AppState;
}
