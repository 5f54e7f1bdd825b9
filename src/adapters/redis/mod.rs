//! Redis adapter implementations.

mod nonce_store;

pub use nonce_store::RedisNonceStore;
