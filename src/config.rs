//! Client configuration.
//!
//! A [`ClientConfig`] is validated once by [`ClientConfigBuilder::build`] and
//! never mutated afterwards, so it can be shared across any number of
//! concurrent requests behind an `Arc`.

use std::time::Duration;

use crate::auth::{Credentials, SignatureMethod};
use crate::error::WooCommerceError;

/// Default API version.
pub const DEFAULT_VERSION: &str = "v3";
/// Default path prefix of the WordPress REST API.
pub const DEFAULT_WP_API_PREFIX: &str = "wp-json";
/// Path segment of the legacy WooCommerce REST API.
pub const LEGACY_API_SEGMENT: &str = "wc-api";

/// Which URL layout the store exposes its API under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiPath {
    /// Legacy `wc-api/{version}/` layout.
    Legacy,
    /// WordPress REST layout, `{prefix}/{version}/` (e.g. `wp-json/wc/v3/`).
    WpRest {
        /// Path prefix, usually `wp-json`.
        prefix: String,
    },
}

/// How response bodies are decoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Encoding {
    /// Decode bodies as UTF-8 text.
    #[default]
    Utf8,
    /// Keep bodies as raw bytes.
    Binary,
}

/// Validated, immutable client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    url: String,
    api_path: ApiPath,
    version: String,
    credentials: Credentials,
    is_tls: bool,
    verify_tls: bool,
    query_string_auth: bool,
    encoding: Encoding,
    port: Option<u16>,
    timeout: Option<Duration>,
    signature_method: SignatureMethod,
    last_ampersand: bool,
    user_agent: String,
}

impl ClientConfig {
    /// Create a new configuration builder.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Store base URL as given.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// URL layout of the API.
    pub fn api_path(&self) -> &ApiPath {
        &self.api_path
    }

    /// API version, e.g. `v3` or `wc/v3`.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Consumer credentials.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Whether the base URL uses TLS. Derived once from the scheme.
    pub fn is_tls(&self) -> bool {
        self.is_tls
    }

    /// Whether TLS certificates are verified.
    pub fn verify_tls(&self) -> bool {
        self.verify_tls
    }

    /// Whether TLS requests send credentials as query parameters instead of Basic auth.
    pub fn query_string_auth(&self) -> bool {
        self.query_string_auth
    }

    /// Response body encoding.
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Explicit port inserted into the host, if any.
    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// Per-request timeout handed to the transport.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// OAuth signature method used over plain HTTP.
    pub fn signature_method(&self) -> SignatureMethod {
        self.signature_method
    }

    /// Whether the OAuth signing key ends with `&` when there is no token secret.
    pub fn last_ampersand(&self) -> bool {
        self.last_ampersand
    }

    /// `User-Agent` header sent with every request.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// API path segment including the trailing slash, e.g. `wc-api/v3/`.
    pub fn api_segment(&self) -> String {
        match &self.api_path {
            ApiPath::Legacy => format!("{LEGACY_API_SEGMENT}/{}/", self.version),
            ApiPath::WpRest { prefix } => format!("{prefix}/{}/", self.version),
        }
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug, Clone)]
pub struct ClientConfigBuilder {
    url: Option<String>,
    consumer_key: Option<String>,
    consumer_secret: Option<String>,
    wp_api: bool,
    wp_api_prefix: String,
    version: String,
    verify_tls: bool,
    query_string_auth: bool,
    encoding: Encoding,
    port: Option<u16>,
    timeout: Option<Duration>,
    signature_method: SignatureMethod,
    last_ampersand: Option<bool>,
    user_agent: Option<String>,
}

impl ClientConfigBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: None,
            consumer_key: None,
            consumer_secret: None,
            wp_api: false,
            wp_api_prefix: DEFAULT_WP_API_PREFIX.to_string(),
            version: DEFAULT_VERSION.to_string(),
            verify_tls: true,
            query_string_auth: false,
            encoding: Encoding::default(),
            port: None,
            timeout: None,
            signature_method: SignatureMethod::default(),
            last_ampersand: None,
            user_agent: None,
        }
    }

    /// Set the store URL (required).
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the consumer key (required).
    pub fn consumer_key(mut self, key: impl Into<String>) -> Self {
        self.consumer_key = Some(key.into());
        self
    }

    /// Set the consumer secret (required).
    pub fn consumer_secret(mut self, secret: impl Into<String>) -> Self {
        self.consumer_secret = Some(secret.into());
        self
    }

    /// Set both credentials at once.
    pub fn credentials(self, credentials: &Credentials) -> Self {
        self.consumer_key(credentials.consumer_key.clone())
            .consumer_secret(credentials.expose_secret())
    }

    /// Use the WordPress REST API layout instead of the legacy one.
    pub fn wp_api(mut self, enabled: bool) -> Self {
        self.wp_api = enabled;
        self
    }

    /// Set the WordPress REST API prefix (default `wp-json`).
    pub fn wp_api_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.wp_api_prefix = prefix.into();
        self
    }

    /// Set the API version (default `v3`).
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Verify TLS certificates (default `true`).
    pub fn verify_tls(mut self, verify: bool) -> Self {
        self.verify_tls = verify;
        self
    }

    /// Send credentials as `consumer_key`/`consumer_secret` query parameters over TLS.
    pub fn query_string_auth(mut self, enabled: bool) -> Self {
        self.query_string_auth = enabled;
        self
    }

    /// Set the response body encoding.
    pub fn encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Insert an explicit port into the host of every resolved URL.
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the OAuth signature method (default HMAC-SHA256).
    pub fn signature_method(mut self, method: SignatureMethod) -> Self {
        self.signature_method = method;
        self
    }

    /// Override whether the signing key keeps its trailing `&`.
    ///
    /// By default this is `false` for versions `v1` and `v2` and `true` otherwise.
    pub fn last_ampersand(mut self, enabled: bool) -> Self {
        self.last_ampersand = Some(enabled);
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Validate and build the configuration.
    ///
    /// Fails with [`WooCommerceError::MissingOption`] when the URL, consumer
    /// key or consumer secret is absent or empty.
    pub fn build(self) -> Result<ClientConfig, WooCommerceError> {
        let url = required(self.url, "url")?;
        let consumer_key = required(self.consumer_key, "consumer_key")?;
        let consumer_secret = required(self.consumer_secret, "consumer_secret")?;

        let is_tls = url
            .get(..5)
            .is_some_and(|scheme| scheme.eq_ignore_ascii_case("https"));

        let last_ampersand = self
            .last_ampersand
            .unwrap_or_else(|| !matches!(self.version.as_str(), "v1" | "v2"));

        let api_path = if self.wp_api {
            ApiPath::WpRest {
                prefix: self.wp_api_prefix,
            }
        } else {
            ApiPath::Legacy
        };

        let user_agent = self.user_agent.unwrap_or_else(|| {
            format!("WooCommerce API Client-Rust/{}", env!("CARGO_PKG_VERSION"))
        });

        Ok(ClientConfig {
            url,
            api_path,
            version: self.version,
            credentials: Credentials::new(consumer_key, consumer_secret),
            is_tls,
            verify_tls: self.verify_tls,
            query_string_auth: self.query_string_auth,
            encoding: self.encoding,
            port: self.port,
            timeout: self.timeout,
            signature_method: self.signature_method,
            last_ampersand,
            user_agent,
        })
    }
}

impl Default for ClientConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn required(value: Option<String>, name: &'static str) -> Result<String, WooCommerceError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(WooCommerceError::MissingOption(name))
}
