//! Google Identity Services credential decoding
//!
//! The sign-in button hands the shell an ID token; its payload carries name,
//! email and picture. Signatures are not checked here. When a client id is
//! configured the audience must match, and an `exp` in the past is rejected.

use serde_json::Value;

use crate::domain::identity::IdentityRecord;
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone, Default)]
pub struct GoogleCredentialDecoder {
    client_id: Option<String>,
}

impl GoogleCredentialDecoder {
    pub fn new(client_id: Option<String>) -> Self {
        Self {
            client_id: client_id.filter(|id| !id.is_empty()),
        }
    }

    /// Decode the payload segment of `credential`
    pub fn decode(&self, credential: &str, now_secs: i64) -> AuthResult<IdentityRecord> {
        let mut segments = credential.trim().split('.');
        let payload = match (segments.next(), segments.next(), segments.next(), segments.next()) {
            (Some(_), Some(payload), Some(_), None) if !payload.is_empty() => payload,
            _ => return Err(AuthError::InvalidCredential("Malformed ID token".into())),
        };

        let bytes = platform::crypto::from_base64_url(payload)
            .map_err(|_| AuthError::InvalidCredential("ID token payload is not base64url".into()))?;
        let claims: Value = serde_json::from_slice(&bytes)
            .map_err(|_| AuthError::InvalidCredential("ID token payload is not JSON".into()))?;

        if let Some(expected) = &self.client_id {
            let audience = claims.get("aud").and_then(Value::as_str);
            if audience != Some(expected.as_str()) {
                return Err(AuthError::InvalidCredential(
                    "ID token was issued for another client".into(),
                ));
            }
        }

        if let Some(exp) = claims.get("exp").and_then(Value::as_i64) {
            if exp <= now_secs {
                return Err(AuthError::InvalidCredential("ID token has expired".into()));
            }
        }

        serde_json::from_value(claims)
            .map_err(|_| AuthError::InvalidCredential("ID token payload is not an object".into()))
    }
}

#[cfg(test)]
pub(crate) fn encode_test_credential(claims: &Value) -> String {
    use base64::Engine;
    let engine = base64::engine::general_purpose::URL_SAFE_NO_PAD;
    format!(
        "{}.{}.sig",
        engine.encode(br#"{"alg":"RS256","typ":"JWT"}"#),
        engine.encode(claims.to_string())
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const NOW: i64 = 1_700_000_000;

    #[test]
    fn test_decode_payload() {
        let token = encode_test_credential(&json!({
            "name": "Somsri",
            "email": "somsri@mfu.ac.th",
            "picture": "https://lh3.example/a.png",
            "aud": "client-1",
            "exp": NOW + 3600
        }));
        let record = GoogleCredentialDecoder::new(Some("client-1".into()))
            .decode(&token, NOW)
            .unwrap();
        assert_eq!(record.email, "somsri@mfu.ac.th");
        assert_eq!(record.name, "Somsri");
        assert_eq!(record.claim("aud"), Some(&json!("client-1")));
    }

    #[test]
    fn test_rejects_wrong_audience() {
        let token = encode_test_credential(&json!({ "email": "a@mfu.ac.th", "aud": "other" }));
        let err = GoogleCredentialDecoder::new(Some("client-1".into()))
            .decode(&token, NOW)
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredential(_)));

        // no configured client id means no audience check
        assert!(GoogleCredentialDecoder::default().decode(&token, NOW).is_ok());
    }

    #[test]
    fn test_rejects_expired() {
        let token = encode_test_credential(&json!({ "email": "a@mfu.ac.th", "exp": NOW - 1 }));
        assert!(GoogleCredentialDecoder::default().decode(&token, NOW).is_err());
    }

    #[test]
    fn test_rejects_malformed() {
        let decoder = GoogleCredentialDecoder::default();
        assert!(decoder.decode("", NOW).is_err());
        assert!(decoder.decode("a.b", NOW).is_err());
        assert!(decoder.decode("a.!!!.c", NOW).is_err());
        assert!(decoder.decode("a.b.c.d", NOW).is_err());
        let not_object = encode_test_credential(&json!([1, 2]));
        assert!(decoder.decode(&not_object, NOW).is_err());
    }
}
