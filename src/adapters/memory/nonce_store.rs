//! In-memory NonceStore.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, Timestamp};
use crate::ports::NonceStore;

/// Mutex-guarded map of consumed nonces with expiry.
///
/// The check-and-mark happens under one lock acquisition, which gives the
/// same atomicity as Redis `SET NX EX` on a single node. Expired markers
/// are swept opportunistically on each call so memory stays bounded by the
/// token TTL.
#[derive(Default)]
pub struct InMemoryNonceStore {
    consumed: Mutex<HashMap<String, Timestamp>>,
}

impl InMemoryNonceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live markers (tests).
    pub fn len(&self) -> usize {
        self.consumed.lock().expect("nonce lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl NonceStore for InMemoryNonceStore {
    async fn consume(&self, nonce: &str, ttl: Duration) -> Result<bool, DomainError> {
        let now = Timestamp::now();
        let mut consumed = self.consumed.lock().expect("nonce lock poisoned");

        consumed.retain(|_, expires_at| expires_at.is_after(&now));

        if consumed.contains_key(nonce) {
            return Ok(false);
        }
        consumed.insert(
            nonce.to_string(),
            now.plus_secs(ttl.as_secs().max(1) as i64),
        );
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn first_use_consumes_second_is_rejected() {
        let store = InMemoryNonceStore::new();
        let ttl = Duration::from_secs(300);
        assert!(store.consume("nonce-1", ttl).await.unwrap());
        assert!(!store.consume("nonce-1", ttl).await.unwrap());
    }

    #[tokio::test]
    async fn distinct_nonces_do_not_interfere() {
        let store = InMemoryNonceStore::new();
        let ttl = Duration::from_secs(300);
        assert!(store.consume("a", ttl).await.unwrap());
        assert!(store.consume("b", ttl).await.unwrap());
        assert_eq!(store.len(), 2);
    }
}
