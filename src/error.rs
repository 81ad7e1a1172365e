//! Error types for the WooCommerce client library.

use thiserror::Error;

/// The main error type for all WooCommerce client operations.
#[derive(Error, Debug)]
pub enum WooCommerceError {
    /// A required configuration option was absent or empty
    #[error("{0} is required")]
    MissingOption(&'static str),

    /// The requested OAuth signature method is not supported
    #[error("Unsupported signature method: {0}")]
    UnsupportedSignatureMethod(String),

    /// The HMAC could not be keyed. HMAC accepts keys of any length, so the
    /// supported signature methods never produce this.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// The URL parsed but cannot be used as requested (e.g. it has no host for a port)
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A header value could not be constructed
    #[error("Invalid header value: {0}")]
    InvalidHeader(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Query parameter serialization error
    #[error("Query serialization error: {0}")]
    Query(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP request with middleware failed
    #[error("HTTP request failed: {0}")]
    HttpMiddleware(#[from] reqwest_middleware::Error),

    /// The response body could not be decoded
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl WooCommerceError {
    /// Check if this error was raised while validating the client configuration.
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::MissingOption(_))
    }

    /// Check if this error was raised by the transport layer.
    pub fn is_transport_error(&self) -> bool {
        matches!(self, Self::Http(_) | Self::HttpMiddleware(_))
    }
}
