//! Entitlement domain module.
//!
//! An entitlement is the single effective license an activity holds for a
//! service at a point in time. It is derived, never persisted: the resolver
//! recomputes it from immutable inputs on every read, which is what makes
//! lazy expiry and token re-validation trustworthy.

mod entitlement;
mod errors;
mod resolver;

pub use entitlement::{Entitlement, EntitlementStatus};
pub use errors::EntitlementError;
pub use resolver::{resolve, DirectSubscription, PackageCoverage, ResolutionInput};
