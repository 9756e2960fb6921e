//! Infrastructure layer for external integrations.
//!
//! # Modules
//!
//! - [`captcha`] - Outbound captcha verification client

pub mod captcha;
