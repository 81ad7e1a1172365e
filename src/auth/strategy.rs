//! Selection of how credentials travel with a request.
//!
//! | TLS | `query_string_auth` | Strategy                                   |
//! |-----|---------------------|--------------------------------------------|
//! | yes | no                  | HTTP Basic (`Authorization` header)        |
//! | yes | yes                 | `consumer_key` / `consumer_secret` query   |
//! | no  | either              | OAuth 1.0a `oauth_*` query parameters      |

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};

use crate::auth::{NonceSource, OAuthSigner};
use crate::config::ClientConfig;
use crate::error::WooCommerceError;
use crate::request::Method;

/// How a request is authenticated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStrategy {
    /// HTTP Basic with the consumer key and secret as user and password.
    Basic,
    /// Plain `consumer_key` and `consumer_secret` query parameters.
    QueryString,
    /// OAuth 1.0a signature sent as query parameters.
    OAuth1,
}

impl AuthStrategy {
    /// Pick the strategy for a transport.
    pub fn select(is_tls: bool, query_string_auth: bool) -> Self {
        match (is_tls, query_string_auth) {
            (true, false) => Self::Basic,
            (true, true) => Self::QueryString,
            (false, _) => Self::OAuth1,
        }
    }

    /// Pick the strategy for a client configuration.
    pub fn for_config(config: &ClientConfig) -> Self {
        Self::select(config.is_tls(), config.query_string_auth())
    }

    /// Short name, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::QueryString => "query_string",
            Self::OAuth1 => "oauth1",
        }
    }

    /// Produce the headers and query parameters that authenticate a request.
    ///
    /// For [`AuthStrategy::OAuth1`], `url` must already be canonical: the
    /// signature covers its query exactly as it will be sent.
    pub fn authorize(
        &self,
        config: &ClientConfig,
        method: Method,
        url: &str,
        nonces: &dyn NonceSource,
    ) -> Result<Authorization, WooCommerceError> {
        let credentials = config.credentials();
        let mut authorization = Authorization::default();

        match self {
            Self::Basic => {
                let token = BASE64.encode(format!(
                    "{}:{}",
                    credentials.consumer_key,
                    credentials.expose_secret()
                ));
                let mut value = HeaderValue::from_str(&format!("Basic {token}"))
                    .map_err(|e| WooCommerceError::InvalidHeader(e.to_string()))?;
                value.set_sensitive(true);
                authorization.headers.insert(AUTHORIZATION, value);
            }
            Self::QueryString => {
                authorization.query = vec![
                    ("consumer_key".to_string(), credentials.consumer_key.clone()),
                    (
                        "consumer_secret".to_string(),
                        credentials.expose_secret().to_string(),
                    ),
                ];
            }
            Self::OAuth1 => {
                let signer = OAuthSigner::new(
                    credentials,
                    config.signature_method(),
                    config.last_ampersand(),
                );
                authorization.query = signer.sign(method.as_str(), url, nonces)?.into_pairs();
            }
        }

        Ok(authorization)
    }
}

/// Request augmentation produced by an [`AuthStrategy`].
#[derive(Debug, Clone, Default)]
pub struct Authorization {
    /// Headers to add.
    pub headers: HeaderMap,
    /// Query parameters to append.
    pub query: Vec<(String, String)>,
}

/// Authorize a request with the strategy the configuration selects.
pub fn authorize(
    config: &ClientConfig,
    method: Method,
    url: &str,
    nonces: &dyn NonceSource,
) -> Result<Authorization, WooCommerceError> {
    AuthStrategy::for_config(config).authorize(config, method, url, nonces)
}
