//! Minimal OAuth 1.0a request signing (HMAC-SHA1) for the X API.
//!
//! Implements the subset of RFC 5849 the v2 posting endpoints need:
//! percent-encoding with the RFC 3986 unreserved set, the sorted parameter
//! base string, the HMAC-SHA1 signature and the `Authorization` header.

use base64::Engine;
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use sha1::Sha1;

use crate::config::XCredentials;

/// Everything except ALPHA / DIGIT / "-" / "." / "_" / "~" is encoded.
const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

pub fn percent_encode(input: &str) -> String {
    utf8_percent_encode(input, OAUTH_ENCODE_SET).to_string()
}

/// Build a signed `Authorization: OAuth ...` header value for one request.
///
/// `extra_params` must contain every query/form parameter that is part of
/// the request (JSON bodies are not signed). Nonce and timestamp are
/// generated per call.
pub fn authorization_header(
    method: &str,
    url: &str,
    credentials: &XCredentials,
    extra_params: &[(&str, &str)],
) -> String {
    let nonce = uuid::Uuid::new_v4().simple().to_string();
    let timestamp = chrono::Utc::now().timestamp().to_string();

    let oauth_params = [
        ("oauth_consumer_key", credentials.api_key.as_str()),
        ("oauth_nonce", nonce.as_str()),
        ("oauth_signature_method", "HMAC-SHA1"),
        ("oauth_timestamp", timestamp.as_str()),
        ("oauth_token", credentials.access_token.as_str()),
        ("oauth_version", "1.0"),
    ];

    let mut all_params: Vec<(&str, &str)> = oauth_params.to_vec();
    all_params.extend_from_slice(extra_params);

    let base = signature_base_string(method, url, &all_params);
    let signature = sign(&base, &credentials.api_secret, &credentials.access_secret);

    let mut header_params: Vec<(&str, String)> = oauth_params
        .iter()
        .map(|(k, v)| (*k, percent_encode(v)))
        .collect();
    header_params.push(("oauth_signature", percent_encode(&signature)));
    header_params.sort();

    let fields = header_params
        .iter()
        .map(|(k, v)| format!("{k}=\"{v}\""))
        .collect::<Vec<_>>()
        .join(", ");
    format!("OAuth {fields}")
}

/// The RFC 5849 §3.4.1 signature base string: method, URL and the sorted,
/// percent-encoded request parameters.
pub fn signature_base_string(method: &str, url: &str, params: &[(&str, &str)]) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .collect();
    encoded.sort();
    let param_string = encoded
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");
    format!(
        "{}&{}&{}",
        method.to_uppercase(),
        percent_encode(url),
        percent_encode(&param_string)
    )
}

/// HMAC-SHA1 over the base string with the `consumer_secret&token_secret`
/// signing key, base64-encoded.
pub fn sign(base_string: &str, consumer_secret: &str, token_secret: &str) -> String {
    let key = format!(
        "{}&{}",
        percent_encode(consumer_secret),
        percent_encode(token_secret)
    );
    let mut mac = Hmac::<Sha1>::new_from_slice(key.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(base_string.as_bytes());
    base64::engine::general_purpose::STANDARD.encode(mac.finalize().into_bytes())
}
