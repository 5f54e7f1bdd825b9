//! Entitlement query handlers.

mod resolve;

pub use resolve::{ResolveEntitlementHandler, ResolveEntitlementQuery};
