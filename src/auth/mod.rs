//! Authentication module for the WooCommerce API.
//!
//! This module provides:
//! - Credential management with secure secret storage
//! - Nonce and timestamp generation for replay protection
//! - OAuth 1.0a signing (HMAC-SHA1 / HMAC-SHA256) for plain-HTTP stores
//! - Selection between Basic, query-string and OAuth authentication

mod credentials;
mod nonce;
mod signature;
mod strategy;

pub use credentials::{CONSUMER_KEY_VAR, CONSUMER_SECRET_VAR, Credentials};
pub use nonce::{FixedNonce, NONCE_LENGTH, NonceSource, RandomNonce};
pub use signature::{OAUTH_VERSION, OAuthParams, OAuthSigner, SignatureMethod};
pub use strategy::{AuthStrategy, Authorization, authorize};
