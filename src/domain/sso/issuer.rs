//! SSO token issuer.

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use secrecy::{ExposeSecret, SecretString};
use uuid::Uuid;

use crate::domain::entitlement::Entitlement;
use crate::domain::foundation::{ActivityId, ServiceCode, Timestamp, UserId};

use super::{LicenseSnapshot, OrgSnapshot, SsoClaims, SsoError};

/// Default token TTL: five minutes.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 300;

/// Mints short-lived HS256 tokens for downstream services.
///
/// Stateless: nothing is persisted at issuance; nonce uniqueness is enforced
/// at verification time.
pub struct SsoTokenIssuer {
    encoding_key: EncodingKey,
    ttl_secs: i64,
}

impl SsoTokenIssuer {
    /// Creates an issuer signing with the shared symmetric secret.
    pub fn new(secret: &SecretString, ttl_secs: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.expose_secret().as_bytes()),
            ttl_secs: if ttl_secs > 0 { ttl_secs } else { DEFAULT_TOKEN_TTL_SECS },
        }
    }

    /// Token TTL in seconds.
    pub fn ttl_secs(&self) -> i64 {
        self.ttl_secs
    }

    /// Mints a signed token. Returns the compact JWT and its expiry.
    #[allow(clippy::too_many_arguments)]
    pub fn mint(
        &self,
        user_id: UserId,
        activity_id: ActivityId,
        service_code: ServiceCode,
        role: String,
        org: Option<OrgSnapshot>,
        entitlement: &Entitlement,
        now: Timestamp,
    ) -> Result<(String, Timestamp), SsoError> {
        let expires_at = now.plus_secs(self.ttl_secs);
        let claims = SsoClaims {
            sub: user_id,
            activity_id,
            svc: service_code,
            role,
            org,
            license: LicenseSnapshot::from(entitlement),
            iat: now.as_unix_secs(),
            exp: expires_at.as_unix_secs(),
            jti: Uuid::new_v4(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| SsoError::infrastructure(format!("Failed to sign token: {}", e)))?;

        Ok((token, expires_at))
    }
}
