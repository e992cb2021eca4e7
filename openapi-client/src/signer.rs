//! RPC request signing.
//!
//! Signature = base64(HMAC-SHA256(secret + "&", METHOD&%2F&encode(canonical query)))

use crate::descriptor::HttpMethod;
use crate::error::RpcError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::collections::BTreeMap;

type HmacSha256 = Hmac<Sha256>;

pub const SIGNATURE_METHOD: &str = "HMAC-SHA256";
pub const SIGNATURE_VERSION: &str = "1.0";

/// RFC 3986 percent-encoding: unreserved characters kept, space as `%20`.
pub fn percent_encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Sorted `key=value` pairs joined with `&`, both sides percent-encoded.
pub fn canonicalized_query(params: &BTreeMap<String, String>) -> String {
    params
        .iter()
        .filter(|(key, _)| key.as_str() != "Signature")
        .map(|(key, value)| format!("{}={}", percent_encode(key), percent_encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

pub fn string_to_sign(method: HttpMethod, params: &BTreeMap<String, String>) -> String {
    format!(
        "{}&{}&{}",
        method,
        percent_encode("/"),
        percent_encode(&canonicalized_query(params))
    )
}

pub fn sign(secret: &str, string_to_sign: &str) -> Result<String, RpcError> {
    let key = format!("{}&", secret);
    let mut mac = HmacSha256::new_from_slice(key.as_bytes())
        .map_err(|e| RpcError::Signing(format!("Invalid key length: {}", e)))?;
    mac.update(string_to_sign.as_bytes());
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}
