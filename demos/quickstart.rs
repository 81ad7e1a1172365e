//! Fetch customers and create a product.
//!
//! Reads `WOOCOMMERCE_URL`, `WOOCOMMERCE_CONSUMER_KEY` and
//! `WOOCOMMERCE_CONSUMER_SECRET` from the environment.

use serde_json::json;
use woocommerce_api_client::auth::Credentials;
use woocommerce_api_client::{ClientConfig, RequestIntent, WooCommerceClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let url = std::env::var("WOOCOMMERCE_URL").unwrap_or_else(|_| "http://example.com".into());
    let credentials = Credentials::try_from_env()
        .ok_or("WOOCOMMERCE_CONSUMER_KEY and WOOCOMMERCE_CONSUMER_SECRET must be set")?;

    let config = ClientConfig::builder()
        .url(url)
        .credentials(&credentials)
        .wp_api(true)
        .version("wc/v3")
        .build()?;
    let client = WooCommerceClient::new(config)?;

    // Inspect what would be sent.
    let request = client.build_request(RequestIntent::get("customers"))?;
    println!("GET {}", request.url);

    let customers: serde_json::Value = client.get("customers").await?.json()?;
    println!("Customers: {customers}");

    let product = json!({
        "name": "Premium Quality",
        "type": "simple",
        "regular_price": "21.99"
    });
    let response = client.post("products", &product).await?;
    println!("Create product: HTTP {}", response.status());

    Ok(())
}
