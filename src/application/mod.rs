//! Application layer services implementing the write path.
//!
//! # Available Services
//!
//! - [`services::submission_gate::SubmissionGate`] - Captcha check, URL validation and token minting

pub mod services;
