//! # WooCommerce API Client
//!
//! An async Rust client library for the WooCommerce REST API.
//!
//! ## Features
//!
//! - Legacy (`wc-api/v3`) and WordPress REST (`wp-json/wc/v3`) URL layouts
//! - HTTP Basic or query-string credentials over HTTPS
//! - OAuth 1.0a signing (HMAC-SHA1 / HMAC-SHA256) over plain HTTP
//! - Deterministic query canonicalization for signed requests
//! - Request descriptors usable with any HTTP stack through [`transport::Transport`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use woocommerce_api_client::{ClientConfig, WooCommerceClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::builder()
//!         .url("http://example.com")
//!         .consumer_key("ck_XXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXX")
//!         .consumer_secret("cs_XXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXX")
//!         .build()?;
//!     let client = WooCommerceClient::new(config)?;
//!     let orders = client.get("orders").await?;
//!     println!("{}", orders.text()?);
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod request;
pub mod transport;

// Re-export commonly used types at crate root
pub use client::WooCommerceClient;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::WooCommerceError;
pub use request::{Method, RequestDescriptor, RequestIntent};

/// Result type alias using WooCommerceError
pub type Result<T> = std::result::Result<T, WooCommerceError>;
