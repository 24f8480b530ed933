//! Cryptographic Utilities

use base64::{Engine, engine::general_purpose};
use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Generate a random 32-byte signing secret
pub fn random_secret() -> [u8; 32] {
    let mut secret = [0u8; 32];
    rand::rng().fill_bytes(&mut secret);
    secret
}

/// Decode URL-safe base64, with or without padding (JWT segments use neither `+` nor `=`)
pub fn from_base64_url(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    general_purpose::URL_SAFE_NO_PAD.decode(s.trim_end_matches('='))
}

/// Compute HMAC-SHA256
pub fn hmac_sha256(key: &[u8; 32], data: &[u8]) -> [u8; 32] {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(key).expect("HMAC accepts 32-byte keys");
    mac.update(data);
    mac.finalize().into_bytes().into()
}

/// Sign `value` as `value.signature` (URL-safe base64 HMAC-SHA256)
pub fn sign_value(key: &[u8; 32], value: &str) -> String {
    let signature = hmac_sha256(key, value.as_bytes());
    format!(
        "{}.{}",
        value,
        general_purpose::URL_SAFE_NO_PAD.encode(signature)
    )
}

/// Verify a token produced by [`sign_value`] and return the signed value
pub fn verify_signed_value<'a>(key: &[u8; 32], token: &'a str) -> Option<&'a str> {
    let (value, signature_b64) = token.rsplit_once('.')?;
    let signature = general_purpose::URL_SAFE_NO_PAD
        .decode(signature_b64)
        .ok()?;
    let expected = hmac_sha256(key, value.as_bytes());
    constant_time_eq(&expected, &signature).then_some(value)
}

/// Constant-time comparison to prevent timing attacks
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}
