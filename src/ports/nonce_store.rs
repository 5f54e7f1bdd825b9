//! Nonce store port - single-use markers for SSO tokens.

use async_trait::async_trait;
use std::time::Duration;

use crate::domain::foundation::DomainError;

/// Atomic check-and-mark store for token nonces.
///
/// `consume` must be atomic so the same token is never accepted twice under
/// concurrent verification. Markers only need to live until the token's own
/// expiry, which bounds storage.
#[async_trait]
pub trait NonceStore: Send + Sync {
    /// Marks the nonce as used.
    ///
    /// Returns `true` when this call was the first use, `false` when the
    /// nonce was already consumed. The marker expires after `ttl`.
    async fn consume(&self, nonce: &str, ttl: Duration) -> Result<bool, DomainError>;
}
