use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

use woocommerce_api_client::auth::{Credentials, FixedNonce, OAuthSigner, SignatureMethod};
use woocommerce_api_client::{ClientConfig, ClientConfigBuilder, WooCommerceClient};

const CONSUMER_KEY: &str = "ck_XXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXX";
const CONSUMER_SECRET: &str = "cs_XXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXX";

fn config(url: impl Into<String>) -> ClientConfigBuilder {
    ClientConfig::builder()
        .url(url)
        .consumer_key(CONSUMER_KEY)
        .consumer_secret(CONSUMER_SECRET)
}

fn build_client(server: &MockServer) -> WooCommerceClient {
    WooCommerceClient::new(config(server.uri()).build().unwrap()).unwrap()
}

/// Recomputes the OAuth signature from the request the server received.
///
/// `origin` is the scheme, host and port the client signed against.
struct ValidOAuthSignature {
    origin: String,
    method: SignatureMethod,
    last_ampersand: bool,
}

impl ValidOAuthSignature {
    fn new(origin: impl Into<String>, method: SignatureMethod, last_ampersand: bool) -> Self {
        Self {
            origin: origin.into(),
            method,
            last_ampersand,
        }
    }
}

impl Match for ValidOAuthSignature {
    fn matches(&self, request: &Request) -> bool {
        let pairs: Vec<(String, String)> = request.url.query_pairs().into_owned().collect();
        let param = |name: &str| {
            pairs
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.clone())
        };
        let (Some(nonce), Some(timestamp), Some(signature)) = (
            param("oauth_nonce"),
            param("oauth_timestamp").and_then(|t| t.parse::<u64>().ok()),
            param("oauth_signature"),
        ) else {
            return false;
        };

        let rest: Vec<(String, String)> = pairs
            .iter()
            .filter(|(n, _)| !n.starts_with("oauth_"))
            .cloned()
            .collect();
        let mut url = match url::Url::parse(&format!("{}{}", self.origin, request.url.path())) {
            Ok(url) => url,
            Err(_) => return false,
        };
        if !rest.is_empty() {
            url.query_pairs_mut().extend_pairs(&rest);
        }

        let credentials = Credentials::new(CONSUMER_KEY, CONSUMER_SECRET);
        OAuthSigner::new(&credentials, self.method, self.last_ampersand)
            .sign_with(request.method.as_str(), url.as_str(), &nonce, timestamp)
            .map(|params| params.signature == signature)
            .unwrap_or(false)
    }
}

#[tokio::test]
async fn test_oauth_get_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wc-api/v3/orders"))
        .and(query_param("oauth_consumer_key", CONSUMER_KEY))
        .and(query_param("oauth_signature_method", "HMAC-SHA256"))
        .and(query_param("oauth_version", "1.0"))
        .and(ValidOAuthSignature::new(server.uri(), SignatureMethod::HmacSha256, true))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let response = client.get("orders").await.unwrap();

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().unwrap();
    assert_eq!(body["ok"], true);
}

#[tokio::test]
async fn test_oauth_signature_covers_endpoint_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wc-api/v3/products"))
        .and(query_param("filter[q]", "Woo Album"))
        .and(query_param("filter[limit]", "1"))
        .and(query_param("fields", "id"))
        .and(ValidOAuthSignature::new(server.uri(), SignatureMethod::HmacSha256, true))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let response = client
        .get("products?filter[q]=Woo+Album&fields=id&filter[limit]=1")
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_legacy_version_hmac_sha1() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wc-api/v2/customers"))
        .and(query_param("oauth_signature_method", "HMAC-SHA1"))
        .and(ValidOAuthSignature::new(server.uri(), SignatureMethod::HmacSha1, false))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let config = config(server.uri())
        .version("v2")
        .signature_method(SignatureMethod::HmacSha1)
        .build()
        .unwrap();
    let client = WooCommerceClient::new(config).unwrap();

    let response = client.get("customers").await.unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_post_json_body() {
    let server = MockServer::start().await;
    let order = json!({ "order": { "status": "completed" } });

    Mock::given(method("POST"))
        .and(path("/wp-json/wc/v3/orders"))
        .and(header("content-type", "application/json;charset=utf-8"))
        .and(header("accept", "application/json"))
        .and(body_json(order.clone()))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 1 })))
        .expect(1)
        .mount(&server)
        .await;

    let config = config(server.uri()).wp_api(true).version("wc/v3").build().unwrap();
    let client = WooCommerceClient::new(config).unwrap();

    let response = client.post("orders", &order).await.unwrap();
    assert_eq!(response.status(), 201);
}

#[tokio::test]
async fn test_put_delete_options() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/wc-api/v3/orders/7"))
        .and(body_json(json!({})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/wc-api/v3/orders/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("OPTIONS"))
        .and(path("/wc-api/v3/orders"))
        .respond_with(ResponseTemplate::new(400))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    assert_eq!(client.put("orders/7", &json!({})).await.unwrap().status(), 200);
    assert_eq!(client.delete("orders/7").await.unwrap().status(), 200);

    // Status codes are returned, not turned into errors.
    assert_eq!(client.options("orders").await.unwrap().status(), 400);
}

#[tokio::test]
async fn test_explicit_port() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wc-api/v3/coupons"))
        .and(ValidOAuthSignature::new(server.uri(), SignatureMethod::HmacSha256, true))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let port = server.address().port();
    let config = config("http://127.0.0.1").port(port).build().unwrap();
    let client = WooCommerceClient::new(config).unwrap();

    assert_eq!(client.get("coupons").await.unwrap().status(), 200);
}

#[tokio::test]
async fn test_fixed_nonce_is_sent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wc-api/v3/orders"))
        .and(query_param("oauth_nonce", "fixednonce"))
        .and(query_param("oauth_timestamp", "1318622958"))
        .and(query_param_is_missing("consumer_key"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server)
        .with_nonce_source(Arc::new(FixedNonce::new("fixednonce", 1318622958)));

    assert_eq!(client.get("orders").await.unwrap().status(), 200);
}

#[tokio::test]
async fn test_transport_error_surfaces() {
    // Nothing listens on port 1.
    let client = WooCommerceClient::new(config("http://127.0.0.1:1").build().unwrap()).unwrap();
    let err = client.get("orders").await.unwrap_err();
    assert!(err.is_transport_error());
}

#[test]
fn test_construction_requires_credentials() {
    let err = ClientConfig::builder()
        .url("https://test.dev")
        .consumer_key(CONSUMER_KEY)
        .build()
        .unwrap_err();
    assert!(err.is_config_error());
    assert_eq!(err.to_string(), "consumer_secret is required");
}
