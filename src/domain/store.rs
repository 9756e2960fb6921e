//! In-memory token → URL mapping with a hard capacity ceiling.
//!
//! # Capacity wipe
//!
//! The store never evicts individual entries. When an insert arrives while the
//! store already holds `capacity` entries, **every** mapping is discarded and
//! the store starts over from empty. Eviction is O(1) and memory is bounded,
//! but all previously issued short links stop resolving at that moment.
//!
//! # Concurrency
//!
//! State sits behind a single [`RwLock`]. [`TokenStore::resolve`] takes the
//! read side; [`TokenStore::insert`] performs the capacity check, the optional
//! wipe, token generation and the insert under one write guard, so concurrent
//! inserts can never push the store past capacity or lose a wipe.

use std::collections::HashMap;
use std::str::FromStr;

use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::domain::token::generate_token;
use crate::error::AppError;

/// Default number of live mappings before the store is wiped.
pub const MAX_ENTRIES: usize = 1000;

/// What [`TokenStore::insert`] does when a freshly generated token is already live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionPolicy {
    /// Generate a new token until it does not clash with a live one.
    #[default]
    Reroll,
    /// Replace the existing mapping with the new target.
    Overwrite,
}

impl FromStr for CollisionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "reroll" => Ok(Self::Reroll),
            "overwrite" => Ok(Self::Overwrite),
            other => Err(format!(
                "unknown collision policy '{other}', expected 'reroll' or 'overwrite'"
            )),
        }
    }
}

type TokenGenerator = Box<dyn Fn() -> String + Send + Sync>;

/// Shared mapping from short token to normalized target URL.
///
/// The number of live entries is always the size of the underlying map, so
/// `count == |entries|` holds under either collision policy.
pub struct TokenStore {
    entries: RwLock<HashMap<String, String>>,
    capacity: usize,
    policy: CollisionPolicy,
    generate: TokenGenerator,
}

impl TokenStore {
    /// Creates an empty store with [`MAX_ENTRIES`] capacity and re-roll on collision.
    pub fn new() -> Self {
        Self::with_config(MAX_ENTRIES, CollisionPolicy::default())
    }

    /// Creates an empty store with the given capacity and collision policy.
    ///
    /// A capacity of zero is treated as one.
    pub fn with_config(capacity: usize, policy: CollisionPolicy) -> Self {
        Self::with_generator(capacity, policy, generate_token)
    }

    pub(crate) fn with_generator(
        capacity: usize,
        policy: CollisionPolicy,
        generate: impl Fn() -> String + Send + Sync + 'static,
    ) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: RwLock::new(HashMap::with_capacity(capacity)),
            capacity,
            policy,
            generate: Box::new(generate),
        }
    }

    /// Looks up the target URL for `token`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the store is empty or the token is not live.
    pub fn resolve(&self, token: &str) -> Result<String, AppError> {
        let entries = self.entries.read();

        if entries.is_empty() {
            return Err(AppError::NotFound);
        }

        entries.get(token).cloned().ok_or(AppError::NotFound)
    }

    /// Mints a token for an already-normalized `target` and stores the mapping.
    ///
    /// Wipes the whole store first if it is at capacity.
    pub fn insert(&self, target: String) -> String {
        let mut entries = self.entries.write();

        if entries.len() >= self.capacity {
            warn!(
                discarded = entries.len(),
                capacity = self.capacity,
                "Token store full, discarding all short links"
            );
            *entries = HashMap::with_capacity(self.capacity);
        }

        let token = match self.policy {
            // Terminates quickly: the live set is tiny next to 62^6 tokens.
            CollisionPolicy::Reroll => loop {
                let candidate = (self.generate)();
                if !entries.contains_key(&candidate) {
                    break candidate;
                }
                debug!(token = %candidate, "Token collision, generating another");
            },
            CollisionPolicy::Overwrite => (self.generate)(),
        };

        if let Some(previous) = entries.insert(token.clone(), target) {
            warn!(token = %token, previous = %previous, "Token collision overwrote a live mapping");
        }

        token
    }

    /// Number of live mappings.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Entry count at which the next insert wipes the store.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn policy(&self) -> CollisionPolicy {
        self.policy
    }
}

impl Default for TokenStore {
    fn default() -> Self {
        Self::new()
    }
}
