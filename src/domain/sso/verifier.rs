//! SSO token verifier.
//!
//! Decodes and checks signature + expiry; the service-match and nonce
//! single-use checks live in the application handler because the nonce
//! store is a port. Step order there is fixed: signature and expiry first,
//! so replay markers are only written for otherwise-valid tokens.

use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use secrecy::{ExposeSecret, SecretString};

use super::{SsoClaims, SsoError};

/// Verifies HS256 SSO tokens with zero leeway.
pub struct SsoTokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl SsoTokenVerifier {
    /// Creates a verifier for tokens signed with the shared secret.
    pub fn new(secret: &SecretString) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        // Tokens carry no aud claim.
        validation.validate_aud = false;
        Self {
            decoding_key: DecodingKey::from_secret(secret.expose_secret().as_bytes()),
            validation,
        }
    }

    /// Verifies signature and expiry, returning the claims.
    pub fn verify(&self, token: &str) -> Result<SsoClaims, SsoError> {
        decode::<SsoClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => SsoError::TokenExpired,
                ErrorKind::InvalidSignature => SsoError::InvalidSignature,
                _ => SsoError::Malformed(e.to_string()),
            })
    }
}
