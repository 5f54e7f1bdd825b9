//! DOID - Multi-tenant entitlement resolution and cross-service
//! synchronization engine.
//!
//! Resolves effective licenses across direct subscriptions, inherited
//! organization packages and free fallbacks; issues and verifies single-use
//! SSO tokens; and pushes signed `license.updated` webhooks to downstream
//! services.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
