//! HTTP middleware for request processing.
//!
//! Provides observability and cross-origin access middleware.

pub mod cors;
pub mod tracing;
