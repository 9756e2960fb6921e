//! HTTP request handlers for the two public endpoints.

pub mod create;
pub mod resolve;

pub use create::create_handler;
pub use resolve::resolve_handler;
