//! Redis-backed NonceStore for multi-node deployments.
//!
//! `SET key NX EX ttl` is the check-and-mark: exactly one verifier wins the
//! write, every other presentation of the same nonce sees the existing key.
//! Markers expire with the token TTL so the keyspace stays bounded.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::NonceStore;

const KEY_PREFIX: &str = "sso:nonce:";

/// Redis nonce store shared by every node verifying tokens.
#[derive(Clone)]
pub struct RedisNonceStore {
    conn: MultiplexedConnection,
}

impl RedisNonceStore {
    pub fn new(conn: MultiplexedConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl NonceStore for RedisNonceStore {
    async fn consume(&self, nonce: &str, ttl: Duration) -> Result<bool, DomainError> {
        let mut conn = self.conn.clone();
        let key = format!("{}{}", KEY_PREFIX, nonce);

        // SET NX EX returns Okay only when this call created the key.
        let set: Option<String> = redis::cmd("SET")
            .arg(&key)
            .arg(1)
            .arg("NX")
            .arg("EX")
            .arg(ttl.as_secs().max(1))
            .query_async(&mut conn)
            .await
            .map_err(|e: redis::RedisError| {
                DomainError::new(ErrorCode::CacheError, e.to_string())
            })?;

        Ok(set.is_some())
    }
}

impl std::fmt::Debug for RedisNonceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisNonceStore").finish_non_exhaustive()
    }
}
