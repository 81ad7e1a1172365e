//! Endpoint URL resolution.

use tracing::debug;
use url::{Position, Url};

use crate::config::ClientConfig;
use crate::endpoint::canonical::canonicalize;
use crate::error::WooCommerceError;

/// Resolve `endpoint` to an absolute URL.
///
/// The result is `{url}/{api segment}{endpoint}`, with the configured port
/// inserted into the host. Only the authority is touched by the port: the
/// path and query keep their original text. Plain HTTP URLs have their query
/// canonicalized for OAuth signing; TLS URLs are returned as built.
///
/// ```
/// use woocommerce_api_client::config::ClientConfig;
/// use woocommerce_api_client::endpoint::resolve;
///
/// let config = ClientConfig::builder()
///     .url("https://test.dev")
///     .consumer_key("ck_key")
///     .consumer_secret("cs_secret")
///     .build()?;
/// assert_eq!(resolve(&config, "products")?, "https://test.dev/wc-api/v3/products");
/// # Ok::<(), woocommerce_api_client::WooCommerceError>(())
/// ```
pub fn resolve(config: &ClientConfig, endpoint: &str) -> Result<String, WooCommerceError> {
    let mut url = config.url().trim_end_matches('/').to_string();
    url.push('/');
    url.push_str(&config.api_segment());
    url.push_str(endpoint);

    if let Some(port) = config.port() {
        url = with_port(&url, port)?;
    }

    let url = if config.is_tls() { url } else { canonicalize(&url) };
    debug!(url = %url, "resolved endpoint");
    Ok(url)
}

/// Set the port on the host of `url`, leaving everything after the
/// authority verbatim.
fn with_port(url: &str, port: u16) -> Result<String, WooCommerceError> {
    let mut parsed = Url::parse(url)?;
    parsed
        .set_port(Some(port))
        .map_err(|_| WooCommerceError::InvalidUrl(format!("cannot set port on {url}")))?;

    let authority = url.find("://").map_or(0, |i| i + 3);
    let rest = url[authority..]
        .find(['/', '?', '#'])
        .map_or("", |i| &url[authority + i..]);
    Ok(format!("{}{}", &parsed[..Position::BeforePath], rest))
}
