//! Domain layer - pure business model, no I/O.

pub mod catalog;
pub mod entitlement;
pub mod foundation;
pub mod sso;
pub mod subscription;
pub mod tenant;
pub mod webhook;
