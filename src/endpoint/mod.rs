//! Endpoint URL construction.
//!
//! This module provides:
//! - Resolution of endpoint paths against the store URL and API layout
//! - Deterministic query canonicalization for OAuth-signed requests
//! - The percent-encoding sets both rely on

mod canonical;
pub mod encoding;
mod resolver;

pub use canonical::{canonicalize, parse_query};
pub use resolver::resolve;
