//! Percent-encoding sets shared by the canonicalizer and the signer.

use std::borrow::Cow;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

/// Characters escaped by JavaScript's `encodeURIComponent`.
///
/// Leaves `A-Z a-z 0-9 - _ . ! ~ * ' ( )` literal.
pub const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// RFC 3986 unreserved characters only, as required by OAuth 1.0a §3.6.
pub const OAUTH: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Encode a query component the way browsers' `encodeURIComponent` does.
pub fn encode_component(s: &str) -> String {
    utf8_percent_encode(s, COMPONENT).to_string()
}

/// Encode a value for an OAuth signature base string or signing key.
pub fn oauth_encode(s: &str) -> String {
    utf8_percent_encode(s, OAUTH).to_string()
}

/// Decode a `application/x-www-form-urlencoded` component.
///
/// `+` decodes to a space. Invalid UTF-8 is replaced rather than rejected.
pub fn decode_component(s: &str) -> String {
    let spaced: Cow<'_, str> = if s.contains('+') {
        Cow::Owned(s.replace('+', " "))
    } else {
        Cow::Borrowed(s)
    };
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}
