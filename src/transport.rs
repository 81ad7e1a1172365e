//! HTTP transport for request descriptors.
//!
//! The [`Transport`] trait is the seam between request building and the
//! network. [`HttpTransport`] is the reqwest implementation; tests and
//! callers with their own stack can supply another.
//!
//! Transports perform exactly one attempt per descriptor. Status codes are
//! not interpreted.

use std::future::Future;

use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::{ClientConfig, Encoding};
use crate::error::WooCommerceError;
use crate::request::RequestDescriptor;

/// Sends a [`RequestDescriptor`] and returns the raw response.
pub trait Transport: Send + Sync {
    /// Perform the request.
    fn send(
        &self,
        request: RequestDescriptor,
    ) -> impl Future<Output = Result<ApiResponse, WooCommerceError>> + Send;
}

/// A response as returned by the server.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
    encoding: Encoding,
}

impl ApiResponse {
    /// Create a response.
    pub fn new(status: StatusCode, headers: HeaderMap, body: Vec<u8>, encoding: Encoding) -> Self {
        Self {
            status,
            headers,
            body,
            encoding,
        }
    }

    /// HTTP status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Raw body bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    /// Body decoded as text.
    ///
    /// Fails when the client is configured for [`Encoding::Binary`] or the
    /// body is not valid UTF-8.
    pub fn text(&self) -> Result<&str, WooCommerceError> {
        match self.encoding {
            Encoding::Utf8 => std::str::from_utf8(&self.body)
                .map_err(|e| WooCommerceError::InvalidResponse(format!("Body is not UTF-8: {e}"))),
            Encoding::Binary => Err(WooCommerceError::InvalidResponse(
                "Body uses binary encoding".to_string(),
            )),
        }
    }

    /// Body parsed as JSON.
    pub fn json<T>(&self) -> Result<T, WooCommerceError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_slice(&self.body).map_err(|e| {
            WooCommerceError::InvalidResponse(format!(
                "Failed to parse response: {}. Body: {}",
                e,
                String::from_utf8_lossy(&self.body)
            ))
        })
    }
}

/// reqwest-based [`Transport`] with tracing middleware.
#[derive(Clone)]
pub struct HttpTransport {
    http_client: ClientWithMiddleware,
}

impl HttpTransport {
    /// Create a transport.
    ///
    /// With `verify_tls` set to `false`, invalid and self-signed
    /// certificates are accepted.
    pub fn new(verify_tls: bool) -> Result<Self, WooCommerceError> {
        let reqwest_client = reqwest::Client::builder()
            .danger_accept_invalid_certs(!verify_tls)
            .build()?;

        let client = ClientBuilder::new(reqwest_client)
            .with(TracingMiddleware::default())
            .build();

        Ok(Self {
            http_client: client,
        })
    }

    /// Create a transport honouring the TLS policy of `config`.
    pub fn from_config(config: &ClientConfig) -> Result<Self, WooCommerceError> {
        Self::new(config.verify_tls())
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport").finish_non_exhaustive()
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: RequestDescriptor) -> Result<ApiResponse, WooCommerceError> {
        let url = request.full_url()?;

        let mut builder = self
            .http_client
            .request(request.method.into(), url)
            .headers(request.headers);
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();
        debug!(method = %request.method, status = status.as_u16(), "received response");

        Ok(ApiResponse::new(status, headers, body, request.encoding))
    }
}
