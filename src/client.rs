//! WooCommerce REST API client.

use std::sync::Arc;

use serde::Serialize;

use crate::auth::NonceSource;
use crate::config::ClientConfig;
use crate::error::WooCommerceError;
use crate::request::{RequestBuilder, RequestDescriptor, RequestIntent};
use crate::transport::{ApiResponse, HttpTransport, Transport};

/// The WooCommerce REST API client.
///
/// Every call resolves the endpoint, attaches credentials (Basic auth or
/// query parameters over HTTPS, an OAuth 1.0a signature over plain HTTP)
/// and sends the request once through the transport.
///
/// # Example
///
/// ```rust,no_run
/// use woocommerce_api_client::{ClientConfig, WooCommerceClient};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = ClientConfig::builder()
///         .url("https://example.com")
///         .consumer_key("ck_XXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXX")
///         .consumer_secret("cs_XXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXX")
///         .wp_api(true)
///         .version("wc/v3")
///         .build()?;
///     let client = WooCommerceClient::new(config)?;
///
///     let customers: serde_json::Value = client.get("customers").await?.json()?;
///     println!("{customers}");
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct WooCommerceClient<T = HttpTransport> {
    requests: RequestBuilder,
    transport: T,
}

impl WooCommerceClient<HttpTransport> {
    /// Create a client using the reqwest transport.
    pub fn new(config: ClientConfig) -> Result<Self, WooCommerceError> {
        let transport = HttpTransport::from_config(&config)?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport> WooCommerceClient<T> {
    /// Create a client with a custom transport.
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            requests: RequestBuilder::new(Arc::new(config)),
            transport,
        }
    }

    /// Use a custom nonce source for OAuth signing.
    pub fn with_nonce_source(mut self, nonces: Arc<dyn NonceSource>) -> Self {
        self.requests = self.requests.with_nonce_source(nonces);
        self
    }

    /// The client configuration.
    pub fn config(&self) -> &ClientConfig {
        self.requests.config()
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build the request for `intent` without sending it.
    pub fn build_request(&self, intent: RequestIntent) -> Result<RequestDescriptor, WooCommerceError> {
        self.requests.build(intent)
    }

    /// Build and send a request.
    pub async fn request(&self, intent: RequestIntent) -> Result<ApiResponse, WooCommerceError> {
        let request = self.build_request(intent)?;
        self.transport.send(request).await
    }

    /// `GET` an endpoint.
    pub async fn get(&self, endpoint: &str) -> Result<ApiResponse, WooCommerceError> {
        self.request(RequestIntent::get(endpoint)).await
    }

    /// `POST` a JSON body to an endpoint.
    pub async fn post<B>(&self, endpoint: &str, data: &B) -> Result<ApiResponse, WooCommerceError>
    where
        B: Serialize + ?Sized,
    {
        self.request(RequestIntent::post(endpoint).with_json(data)?).await
    }

    /// `PUT` a JSON body to an endpoint.
    pub async fn put<B>(&self, endpoint: &str, data: &B) -> Result<ApiResponse, WooCommerceError>
    where
        B: Serialize + ?Sized,
    {
        self.request(RequestIntent::put(endpoint).with_json(data)?).await
    }

    /// `DELETE` an endpoint.
    pub async fn delete(&self, endpoint: &str) -> Result<ApiResponse, WooCommerceError> {
        self.request(RequestIntent::delete(endpoint)).await
    }

    /// `OPTIONS` an endpoint.
    pub async fn options(&self, endpoint: &str) -> Result<ApiResponse, WooCommerceError> {
        self.request(RequestIntent::options(endpoint)).await
    }
}

impl<T> std::fmt::Debug for WooCommerceClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WooCommerceClient")
            .field("requests", &self.requests)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use reqwest::StatusCode;
    use reqwest::header::{AUTHORIZATION, HeaderMap};
    use serde_json::json;

    use super::*;
    use crate::auth::FixedNonce;
    use crate::config::Encoding;
    use crate::request::Method;

    #[derive(Default)]
    struct RecordingTransport {
        sent: Mutex<Vec<RequestDescriptor>>,
    }

    impl Transport for RecordingTransport {
        async fn send(&self, request: RequestDescriptor) -> Result<ApiResponse, WooCommerceError> {
            self.sent.lock().unwrap().push(request);
            Ok(ApiResponse::new(
                StatusCode::OK,
                HeaderMap::new(),
                br#"{"ok":true}"#.to_vec(),
                Encoding::Utf8,
            ))
        }
    }

    fn client(url: &str) -> WooCommerceClient<RecordingTransport> {
        let config = ClientConfig::builder()
            .url(url)
            .consumer_key("ck_test")
            .consumer_secret("cs_test")
            .build()
            .unwrap();
        WooCommerceClient::with_transport(config, RecordingTransport::default())
            .with_nonce_source(Arc::new(FixedNonce::new("nonce", 1318622958)))
    }

    #[tokio::test]
    async fn test_verbs() {
        let client = client("https://test.dev");
        client.get("orders").await.unwrap();
        client.post("orders", &json!({})).await.unwrap();
        client.put("orders/1", &json!({"status": "completed"})).await.unwrap();
        client.delete("orders/1").await.unwrap();
        let response = client.options("orders").await.unwrap();
        assert_eq!(response.text().unwrap(), r#"{"ok":true}"#);

        let sent = client.transport().sent.lock().unwrap();
        let methods: Vec<Method> = sent.iter().map(|r| r.method).collect();
        assert_eq!(
            methods,
            [Method::Get, Method::Post, Method::Put, Method::Delete, Method::Options]
        );
        assert_eq!(sent[2].url, "https://test.dev/wc-api/v3/orders/1");
        assert_eq!(sent[1].body.as_deref(), Some(b"{}".as_slice()));
        assert!(sent.iter().all(|r| r.headers.contains_key(AUTHORIZATION)));
    }

    #[tokio::test]
    async fn test_plain_http_uses_oauth_query() {
        let client = client("http://test.dev");
        client.get("orders").await.unwrap();

        let sent = client.transport().sent.lock().unwrap();
        assert!(!sent[0].headers.contains_key(AUTHORIZATION));
        assert!(sent[0].query.iter().any(|(name, value)| name == "oauth_nonce" && value == "nonce"));
    }

    #[test]
    fn test_build_request_without_sending() {
        let client = client("https://test.dev");
        let request = client.build_request(RequestIntent::get("products")).unwrap();
        assert_eq!(request.url, "https://test.dev/wc-api/v3/products");
        assert!(client.transport().sent.lock().unwrap().is_empty());
    }
}
