//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `http` - REST API (axum)
//! - `postgres` - repositories and readers (sqlx)
//! - `redis` - single-use nonce store
//! - `webhook` - signed outbound delivery pipeline (reqwest)
//! - `memory` - in-memory implementations for tests

pub mod http;
pub mod memory;
pub mod postgres;
pub mod redis;
pub mod webhook;
