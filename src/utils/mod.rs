//! Helper functions used by the gate and the HTTP handlers.
//!
//! - [`url_normalizer`] - URL validation and canonicalization
//! - [`client_ip`] - Client IP extraction from proxy headers

pub mod client_ip;
pub mod url_normalizer;
