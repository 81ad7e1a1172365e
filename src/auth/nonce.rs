//! Nonce and timestamp generation for OAuth 1.0a signing.
//!
//! Every signed request carries a fresh `oauth_nonce` and `oauth_timestamp`.
//! The server rejects a replayed (nonce, timestamp) pair.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::distributions::Alphanumeric;
use rand::{Rng, thread_rng};

/// Length of generated nonces.
pub const NONCE_LENGTH: usize = 32;

/// Trait for providing the nonce and timestamp of a signed request.
///
/// Implementations are called concurrently from many in-flight requests and
/// must not hand out the same nonce twice.
pub trait NonceSource: Send + Sync {
    /// Generate a nonce for the next request.
    fn nonce(&self) -> String;

    /// Current timestamp in seconds since the UNIX epoch.
    fn timestamp(&self) -> u64;
}

/// A nonce source backed by the thread-local random number generator.
///
/// Holds no state, so concurrent callers never contend.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomNonce;

impl RandomNonce {
    /// Create a new random nonce source.
    pub fn new() -> Self {
        Self
    }
}

impl NonceSource for RandomNonce {
    fn nonce(&self) -> String {
        thread_rng()
            .sample_iter(&Alphanumeric)
            .take(NONCE_LENGTH)
            .map(char::from)
            .collect()
    }

    fn timestamp(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }
}

/// A nonce source that always returns the same values.
///
/// Only useful for reproducing signatures in tests.
#[derive(Debug, Clone)]
pub struct FixedNonce {
    nonce: String,
    timestamp: u64,
}

impl FixedNonce {
    /// Create a fixed nonce source.
    pub fn new(nonce: impl Into<String>, timestamp: u64) -> Self {
        Self {
            nonce: nonce.into(),
            timestamp,
        }
    }
}

impl NonceSource for FixedNonce {
    fn nonce(&self) -> String {
        self.nonce.clone()
    }

    fn timestamp(&self) -> u64 {
        self.timestamp
    }
}
