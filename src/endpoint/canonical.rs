//! Deterministic query-string normalization.
//!
//! OAuth 1.0a servers rebuild the signature base string from the query they
//! receive, so the query sent over plain HTTP is normalized first: names
//! sorted byte-wise, names and values re-encoded like `encodeURIComponent`,
//! and brackets in names left literal for PHP-style array parameters such
//! as `filter[limit]`.

use crate::endpoint::encoding::{decode_component, encode_component};

/// Parse a raw query string into decoded `(name, value)` pairs.
///
/// Duplicates are preserved in order. Empty segments are skipped and a
/// segment without `=` yields an empty value.
pub fn parse_query(query: &str) -> Vec<(String, String)> {
    query
        .split('&')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let (name, value) = segment.split_once('=').unwrap_or((segment, ""));
            (decode_component(name), decode_component(value))
        })
        .collect()
}

/// Canonicalize the query component of `url`.
///
/// URLs without a `?` are returned unchanged. The function is idempotent.
///
/// ```
/// use woocommerce_api_client::endpoint::canonicalize;
///
/// let url = "http://h/p?filter[q]=Woo+Album&fields=id&filter[limit]=1";
/// assert_eq!(
///     canonicalize(url),
///     "http://h/p?fields=id&filter[limit]=1&filter[q]=Woo%20Album"
/// );
/// ```
pub fn canonicalize(url: &str) -> String {
    let (before_fragment, fragment) = match url.split_once('#') {
        Some((head, fragment)) => (head, Some(fragment)),
        None => (url, None),
    };

    let Some((path, query)) = before_fragment.split_once('?') else {
        return url.to_string();
    };

    let mut pairs = parse_query(query);
    // Stable: duplicates keep their relative order.
    pairs.sort_by(|(a, _), (b, _)| a.as_bytes().cmp(b.as_bytes()));

    let query = pairs
        .iter()
        .map(|(name, value)| format!("{}={}", encode_name(name), encode_component(value)))
        .collect::<Vec<_>>()
        .join("&");

    match fragment {
        Some(fragment) => format!("{path}?{query}#{fragment}"),
        None => format!("{path}?{query}"),
    }
}

fn encode_name(name: &str) -> String {
    encode_component(name).replace("%5B", "[").replace("%5D", "]")
}
