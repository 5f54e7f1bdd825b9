//! HMAC-SHA256 webhook payload signing.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Signs webhook payloads with a per-deployment shared secret.
///
/// The signature covers the exact serialized payload bytes; receivers
/// recompute the HMAC over the raw body and compare in constant time.
pub struct WebhookSigner {
    secret: SecretString,
}

impl WebhookSigner {
    /// Creates a signer with the shared webhook secret.
    pub fn new(secret: SecretString) -> Self {
        Self { secret }
    }

    /// Hex HMAC-SHA256 signature over the exact payload bytes.
    pub fn sign(&self, payload: &[u8]) -> String {
        // HMAC accepts keys of any length, so construction cannot fail.
        let mut mac = HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(payload);
        hex::encode(mac.finalize().into_bytes())
    }

    /// Constant-time verification of a hex signature against payload bytes.
    pub fn verify(&self, payload: &[u8], signature_hex: &str) -> bool {
        let Ok(presented) = hex::decode(signature_hex) else {
            return false;
        };
        let expected = {
            let mut mac = HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes())
                .expect("HMAC accepts any key length");
            mac.update(payload);
            mac.finalize().into_bytes()
        };
        expected.as_slice().ct_eq(presented.as_slice()).into()
    }
}

/// SHA-256 hex digest of the payload, stored in the delivery log for audit.
pub fn payload_hash(payload: &[u8]) -> String {
    hex::encode(Sha256::digest(payload))
}
