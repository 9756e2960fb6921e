//! HTTP API layer.
//!
//! Translates requests into store and gate calls and formats plain-text
//! responses.
//!
//! # Modules
//!
//! - [`dto`] - Request parameter types
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Tracing and CORS layers

pub mod dto;
pub mod handlers;
pub mod middleware;
