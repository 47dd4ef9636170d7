//! Verification of QStash callback signatures
//!
//! QStash signs each delivery with an HS256 JWT in the `Upstash-Signature`
//! header. The token is tried against the current signing key and then the
//! next one, so keys can be rotated without dropping callbacks.

use crate::error::{NotificationError, NotificationResult};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Header carrying the callback JWT
pub const SIGNATURE_HEADER: &str = "Upstash-Signature";

/// Required `iss` claim
pub const ISSUER: &str = "Upstash";

/// Claims QStash puts in the signature token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallbackClaims {
    pub iss: String,
    pub sub: String,
    pub exp: u64,
    pub nbf: u64,
    #[serde(default)]
    pub iat: Option<u64>,
    #[serde(default)]
    pub jti: Option<String>,
    /// base64url SHA-256 of the raw request body
    pub body: String,
}

/// Compute the `body` claim for a raw request body.
pub fn body_hash(raw_body: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(Sha256::digest(raw_body))
}

#[derive(Clone)]
pub struct SignatureVerifier {
    keys: Vec<(&'static str, DecodingKey)>,
    callback_url: Option<String>,
}

impl SignatureVerifier {
    /// Build a verifier. With no keys every token is rejected.
    pub fn new(
        current_key: Option<&str>,
        next_key: Option<&str>,
        callback_url: Option<String>,
    ) -> Self {
        let keys = [("current", current_key), ("next", next_key)]
            .into_iter()
            .filter_map(|(name, key)| key.map(|k| (name, DecodingKey::from_secret(k.as_bytes()))))
            .collect();

        Self { keys, callback_url }
    }

    pub fn has_keys(&self) -> bool {
        !self.keys.is_empty()
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[ISSUER]);
        validation.set_required_spec_claims(&["exp", "nbf", "iss", "sub"]);
        validation.validate_nbf = true;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.sub = self.callback_url.clone();
        validation
    }

    /// Verify `token` for `raw_body`, returning its claims.
    ///
    /// # Errors
    /// `InvalidSignature` when no key is configured, the token is malformed,
    /// or neither key yields a valid token whose `body` claim matches.
    pub fn verify(&self, raw_body: &[u8], token: &str) -> NotificationResult<CallbackClaims> {
        if self.keys.is_empty() {
            return Err(NotificationError::InvalidSignature(
                "no signing keys configured".to_string(),
            ));
        }

        let validation = self.validation();
        let expected_body = body_hash(raw_body);
        let mut last_error = String::new();

        for (name, key) in &self.keys {
            match decode::<CallbackClaims>(token, key, &validation) {
                Ok(data) => {
                    if data.claims.body.trim_end_matches('=') == expected_body {
                        tracing::debug!(key = name, "Callback signature verified");
                        return Ok(data.claims);
                    }
                    // Authentic token, altered body.
                    return Err(NotificationError::InvalidSignature(format!(
                        "{} key: body hash mismatch",
                        name
                    )));
                }
                Err(e) => {
                    last_error = format!("{} key: {}", name, e);
                }
            }
        }

        Err(NotificationError::InvalidSignature(last_error))
    }
}

impl std::fmt::Debug for SignatureVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureVerifier")
            .field("keys", &self.keys.iter().map(|(name, _)| *name).collect::<Vec<_>>())
            .field("callback_url", &self.callback_url)
            .finish()
    }
}
