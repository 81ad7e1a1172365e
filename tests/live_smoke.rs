use woocommerce_api_client::auth::Credentials;
use woocommerce_api_client::{ClientConfig, WooCommerceClient};

fn live_tests_enabled() -> bool {
    std::env::var("WOOCOMMERCE_LIVE_TESTS").ok().as_deref() == Some("1")
}

#[tokio::test]
#[ignore]
async fn live_store_smoke() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    if !live_tests_enabled() {
        return Ok(());
    }

    let (Ok(url), Some(credentials)) = (std::env::var("WOOCOMMERCE_URL"), Credentials::try_from_env())
    else {
        return Ok(());
    };

    let config = ClientConfig::builder()
        .url(url)
        .credentials(&credentials)
        .wp_api(true)
        .version("wc/v3")
        .build()?;
    let client = WooCommerceClient::new(config)?;

    let response = client.get("system_status").await?;
    assert!(response.status().is_success());
    let _status: serde_json::Value = response.json()?;

    Ok(())
}
