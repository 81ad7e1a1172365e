//! Transport-ready request descriptors.
//!
//! A [`RequestBuilder`] turns a [`RequestIntent`] (verb, endpoint, optional
//! JSON body) into a [`RequestDescriptor`] carrying the absolute URL,
//! headers, authentication query parameters and serialized body. Nothing
//! here performs I/O.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::auth::{AuthStrategy, NonceSource, RandomNonce};
use crate::config::{ClientConfig, Encoding};
use crate::endpoint::resolve;
use crate::error::WooCommerceError;

/// Content type of JSON request bodies.
pub const JSON_CONTENT_TYPE: &str = "application/json;charset=utf-8";

/// HTTP verbs supported by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Options,
}

impl Method {
    /// Uppercase verb name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Options => "OPTIONS",
        }
    }

    /// Whether requests with this verb carry a body.
    pub fn allows_body(&self) -> bool {
        matches!(self, Self::Post | Self::Put)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
            Method::Options => reqwest::Method::OPTIONS,
        }
    }
}

/// A logical API call: verb, endpoint path and optional JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestIntent {
    /// HTTP verb.
    pub method: Method,
    /// Endpoint relative to the API root, e.g. `orders/12` or `products?per_page=5`.
    pub endpoint: String,
    /// JSON body. Only sent with POST and PUT.
    pub body: Option<serde_json::Value>,
}

impl RequestIntent {
    /// Create an intent without a body.
    pub fn new(method: Method, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            body: None,
        }
    }

    /// `GET endpoint`
    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(Method::Get, endpoint)
    }

    /// `POST endpoint`
    pub fn post(endpoint: impl Into<String>) -> Self {
        Self::new(Method::Post, endpoint)
    }

    /// `PUT endpoint`
    pub fn put(endpoint: impl Into<String>) -> Self {
        Self::new(Method::Put, endpoint)
    }

    /// `DELETE endpoint`
    pub fn delete(endpoint: impl Into<String>) -> Self {
        Self::new(Method::Delete, endpoint)
    }

    /// `OPTIONS endpoint`
    pub fn options(endpoint: impl Into<String>) -> Self {
        Self::new(Method::Options, endpoint)
    }

    /// Attach a JSON body.
    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Serialize `body` to JSON and attach it.
    pub fn with_json<B>(self, body: &B) -> Result<Self, WooCommerceError>
    where
        B: Serialize + ?Sized,
    {
        Ok(self.with_body(serde_json::to_value(body)?))
    }

    /// Append typed query parameters to the endpoint.
    pub fn with_query<Q>(mut self, params: &Q) -> Result<Self, WooCommerceError>
    where
        Q: Serialize + ?Sized,
    {
        let query = serde_urlencoded::to_string(params)
            .map_err(|e| WooCommerceError::Query(e.to_string()))?;
        if !query.is_empty() {
            let separator = if self.endpoint.contains('?') { '&' } else { '?' };
            self.endpoint.push(separator);
            self.endpoint.push_str(&query);
        }
        Ok(self)
    }
}

/// Everything a transport needs to perform a request.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    /// HTTP verb.
    pub method: Method,
    /// Absolute URL, canonicalized when the store is plain HTTP.
    pub url: String,
    /// Request headers, including `Authorization` for Basic auth.
    pub headers: HeaderMap,
    /// Authentication query parameters to append to `url`.
    pub query: Vec<(String, String)>,
    /// Serialized JSON body.
    pub body: Option<Vec<u8>>,
    /// Request timeout.
    pub timeout: Option<Duration>,
    /// Whether the transport verifies TLS certificates.
    pub verify_tls: bool,
    /// How the response body should be decoded.
    pub encoding: Encoding,
}

impl RequestDescriptor {
    /// The URL with `query` appended.
    pub fn full_url(&self) -> Result<Url, WooCommerceError> {
        let mut url = Url::parse(&self.url)?;
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.query);
        }
        Ok(url)
    }
}

/// Builds [`RequestDescriptor`]s from a shared configuration.
#[derive(Clone)]
pub struct RequestBuilder {
    config: Arc<ClientConfig>,
    nonces: Arc<dyn NonceSource>,
}

impl RequestBuilder {
    /// Create a builder that signs with random nonces.
    pub fn new(config: Arc<ClientConfig>) -> Self {
        Self {
            config,
            nonces: Arc::new(RandomNonce::new()),
        }
    }

    /// Use a custom nonce source for OAuth signing.
    pub fn with_nonce_source(mut self, nonces: Arc<dyn NonceSource>) -> Self {
        self.nonces = nonces;
        self
    }

    /// The configuration requests are built from.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Resolve, authorize and serialize `intent`.
    ///
    /// Bodies on GET, DELETE and OPTIONS requests are dropped.
    pub fn build(&self, intent: RequestIntent) -> Result<RequestDescriptor, WooCommerceError> {
        let config = &*self.config;
        let url = resolve(config, &intent.endpoint)?;

        let strategy = AuthStrategy::for_config(config);
        let authorization = strategy.authorize(config, intent.method, &url, self.nonces.as_ref())?;

        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(config.user_agent())
                .map_err(|e| WooCommerceError::InvalidHeader(e.to_string()))?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.extend(authorization.headers);

        let body = match intent.body {
            Some(body) if intent.method.allows_body() => {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
                Some(serde_json::to_vec(&body)?)
            }
            Some(_) => {
                debug!(method = %intent.method, "dropping body of body-less request");
                None
            }
            None => None,
        };

        debug!(method = %intent.method, url = %url, auth = strategy.name(), "built request");

        Ok(RequestDescriptor {
            method: intent.method,
            url,
            headers,
            query: authorization.query,
            body,
            timeout: config.timeout(),
            verify_tls: config.verify_tls(),
            encoding: config.encoding(),
        })
    }
}

impl fmt::Debug for RequestBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestBuilder")
            .field("config", &self.config)
            .finish()
    }
}
