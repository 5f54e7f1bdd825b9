//! Command and query handlers.
//!
//! Each handler owns one operation: it pulls what it needs through ports,
//! applies domain rules, and returns a result the HTTP layer can map. No
//! handler talks to another handler except through explicit composition
//! (the SSO handlers embed entitlement resolution).

pub mod entitlement;
pub mod sso;
pub mod subscription;
pub mod webhook;
