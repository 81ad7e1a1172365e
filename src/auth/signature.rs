//! OAuth 1.0a signature generation for plain-HTTP requests.
//!
//! WooCommerce authenticates non-TLS requests with two-legged OAuth 1.0a:
//! only the consumer key and secret are involved, there is no token.
//!
//! ```text
//! base  = METHOD & enc(url without query) & enc(sorted enc(name)=enc(value) pairs)
//! key   = enc(consumer_secret) & ""        (the trailing & is version dependent)
//! sig   = Base64(HMAC-SHA1 or HMAC-SHA256(key, base))
//! ```
//!
//! The resulting `oauth_*` parameters are sent in the query string.

use std::fmt;
use std::str::FromStr;

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::Sha256;
use url::Url;

use crate::auth::{Credentials, NonceSource};
use crate::endpoint::encoding::oauth_encode;
use crate::endpoint::parse_query;
use crate::error::WooCommerceError;

type HmacSha1 = Hmac<Sha1>;
type HmacSha256 = Hmac<Sha256>;

/// Value of `oauth_version`.
pub const OAUTH_VERSION: &str = "1.0";

/// Supported OAuth signature methods.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SignatureMethod {
    /// `HMAC-SHA1`
    HmacSha1,
    /// `HMAC-SHA256`
    #[default]
    HmacSha256,
}

impl SignatureMethod {
    /// Wire name used for `oauth_signature_method`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HmacSha1 => "HMAC-SHA1",
            Self::HmacSha256 => "HMAC-SHA256",
        }
    }
}

impl fmt::Display for SignatureMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignatureMethod {
    type Err = WooCommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("HMAC-SHA1") {
            Ok(Self::HmacSha1)
        } else if s.eq_ignore_ascii_case("HMAC-SHA256") {
            Ok(Self::HmacSha256)
        } else {
            Err(WooCommerceError::UnsupportedSignatureMethod(s.to_string()))
        }
    }
}

/// The `oauth_*` parameters of one signed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthParams {
    /// `oauth_consumer_key`
    pub consumer_key: String,
    /// `oauth_nonce`
    pub nonce: String,
    /// `oauth_signature_method`
    pub signature_method: SignatureMethod,
    /// `oauth_timestamp`
    pub timestamp: u64,
    /// `oauth_signature`, Base64 encoded
    pub signature: String,
}

impl OAuthParams {
    /// Convert into query pairs, in a fixed order with the signature last.
    pub fn into_pairs(self) -> Vec<(String, String)> {
        vec![
            ("oauth_consumer_key".to_string(), self.consumer_key),
            ("oauth_nonce".to_string(), self.nonce),
            (
                "oauth_signature_method".to_string(),
                self.signature_method.as_str().to_string(),
            ),
            ("oauth_timestamp".to_string(), self.timestamp.to_string()),
            ("oauth_version".to_string(), OAUTH_VERSION.to_string()),
            ("oauth_signature".to_string(), self.signature),
        ]
    }
}

/// Signs requests with the consumer credentials.
#[derive(Debug, Clone)]
pub struct OAuthSigner<'a> {
    credentials: &'a Credentials,
    method: SignatureMethod,
    last_ampersand: bool,
}

impl<'a> OAuthSigner<'a> {
    /// Create a signer.
    ///
    /// `last_ampersand` controls whether the signing key keeps its trailing
    /// `&` when there is no token secret. Legacy `v1`/`v2` APIs expect it
    /// to be dropped.
    pub fn new(credentials: &'a Credentials, method: SignatureMethod, last_ampersand: bool) -> Self {
        Self {
            credentials,
            method,
            last_ampersand,
        }
    }

    /// Sign a request with a fresh nonce and timestamp.
    pub fn sign(
        &self,
        http_method: &str,
        url: &str,
        nonces: &dyn NonceSource,
    ) -> Result<OAuthParams, WooCommerceError> {
        self.sign_with(http_method, url, &nonces.nonce(), nonces.timestamp())
    }

    /// Sign a request with the given nonce and timestamp.
    pub fn sign_with(
        &self,
        http_method: &str,
        url: &str,
        nonce: &str,
        timestamp: u64,
    ) -> Result<OAuthParams, WooCommerceError> {
        let base_string = self.base_string(http_method, url, nonce, timestamp);
        let key = self.signing_key();

        let digest = match self.method {
            SignatureMethod::HmacSha1 => hmac_digest::<HmacSha1>(&key, &base_string)?,
            SignatureMethod::HmacSha256 => hmac_digest::<HmacSha256>(&key, &base_string)?,
        };

        Ok(OAuthParams {
            consumer_key: self.credentials.consumer_key.clone(),
            nonce: nonce.to_string(),
            signature_method: self.method,
            timestamp,
            signature: BASE64.encode(digest),
        })
    }

    /// Build the signature base string (OAuth 1.0a §3.4.1).
    ///
    /// The base URI is normalized the way it goes on the wire: lowercase
    /// scheme and host, default port omitted.
    pub fn base_string(&self, http_method: &str, url: &str, nonce: &str, timestamp: u64) -> String {
        let without_fragment = url.split_once('#').map_or(url, |(head, _)| head);
        let (base_url, query) = without_fragment
            .split_once('?')
            .unwrap_or((without_fragment, ""));

        let timestamp = timestamp.to_string();
        let oauth = [
            ("oauth_consumer_key", self.credentials.consumer_key.as_str()),
            ("oauth_nonce", nonce),
            ("oauth_signature_method", self.method.as_str()),
            ("oauth_timestamp", timestamp.as_str()),
            ("oauth_version", OAUTH_VERSION),
        ];

        let mut pairs: Vec<(String, String)> = oauth
            .iter()
            .map(|(name, value)| (oauth_encode(name), oauth_encode(value)))
            .chain(
                parse_query(query)
                    .iter()
                    .map(|(name, value)| (oauth_encode(name), oauth_encode(value))),
            )
            .collect();
        pairs.sort();

        let parameters = pairs
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("&");

        format!(
            "{}&{}&{}",
            http_method.to_ascii_uppercase(),
            oauth_encode(&base_uri(base_url)),
            oauth_encode(&parameters)
        )
    }

    fn signing_key(&self) -> String {
        let secret = oauth_encode(self.credentials.expose_secret());
        if self.last_ampersand {
            format!("{secret}&")
        } else {
            secret
        }
    }
}

/// Base string URI per OAuth 1.0a §3.4.1.2.
///
/// Falls back to the raw string when it does not parse as an absolute URL.
fn base_uri(url: &str) -> String {
    let Ok(parsed) = Url::parse(url) else {
        return url.to_string();
    };
    let Some(host) = parsed.host_str() else {
        return url.to_string();
    };
    match parsed.port() {
        Some(port) => format!("{}://{}:{}{}", parsed.scheme(), host, port, parsed.path()),
        None => format!("{}://{}{}", parsed.scheme(), host, parsed.path()),
    }
}

/// HMAC `message` with `key`.
///
/// HMAC accepts keys of any length, including an empty secret.
fn hmac_digest<M>(key: &str, message: &str) -> Result<Vec<u8>, WooCommerceError>
where
    M: Mac + hmac::digest::KeyInit,
{
    let mut hmac = <M as hmac::digest::KeyInit>::new_from_slice(key.as_bytes())
        .map_err(|e| WooCommerceError::Auth(format!("Invalid HMAC key: {e}")))?;
    hmac.update(message.as_bytes());
    Ok(hmac.finalize().into_bytes().to_vec())
}
