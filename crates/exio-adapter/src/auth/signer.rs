/*
[INPUT]:  Timestamp, canonical message string and key/secret/passphrase triple
[OUTPUT]: Authentication headers merged into the subscribe frame
[POS]:    Auth layer - HMAC-SHA256 signing for feed authentication
[UPDATE]: When changing signing algorithm or header format
*/

use crate::http::{ExioError, Result};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// API credentials for authenticated feed subscriptions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiCredentials {
    /// API key identifier
    pub key: String,
    /// Base64-encoded secret for HMAC signing
    pub secret: String,
    /// Passphrase paired with the key
    pub passphrase: String,
}

impl ApiCredentials {
    pub fn new(
        key: impl Into<String>,
        secret: impl Into<String>,
        passphrase: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
            passphrase: passphrase.into(),
        }
    }
}

/// Signed headers carried at the top level of the subscribe frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthHeaders {
    pub key: String,
    pub signature: String,
    pub timestamp: String,
    pub passphrase: String,
}

/// Credential signing boundary.
///
/// Given a signing timestamp, the canonical message string, and a credential
/// triple, produce the headers the feed expects. Injectable so tests can
/// substitute a recording implementation.
pub trait CredentialSigner: Send + Sync {
    fn sign(
        &self,
        timestamp: &str,
        message: &str,
        credentials: &ApiCredentials,
    ) -> Result<AuthHeaders>;
}

/// Default signer: HMAC-SHA256 over the canonical message with the
/// base64-decoded secret, signature emitted as base64
#[derive(Debug, Default, Clone, Copy)]
pub struct HmacSigner;

impl CredentialSigner for HmacSigner {
    fn sign(
        &self,
        timestamp: &str,
        message: &str,
        credentials: &ApiCredentials,
    ) -> Result<AuthHeaders> {
        let secret = BASE64
            .decode(&credentials.secret)
            .map_err(|e| ExioError::auth(format!("invalid base64 secret: {e}")))?;

        let mut mac = HmacSha256::new_from_slice(&secret)
            .map_err(|e| ExioError::auth(format!("HMAC initialization failed: {e}")))?;
        mac.update(message.as_bytes());
        let signature = BASE64.encode(mac.finalize().into_bytes());

        Ok(AuthHeaders {
            key: credentials.key.clone(),
            signature,
            timestamp: timestamp.to_string(),
            passphrase: credentials.passphrase.clone(),
        })
    }
}
