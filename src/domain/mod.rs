//! Domain layer: the token store and the token format.
//!
//! Nothing in here knows about HTTP, configuration sources or the captcha
//! provider.
//!
//! - [`token`] - Token alphabet, length and random generation
//! - [`store`] - Capacity-bounded in-memory token → URL mapping

pub mod store;
pub mod token;

pub use store::{CollisionPolicy, MAX_ENTRIES, TokenStore};
pub use token::{ALPHABET, TOKEN_LENGTH};
