//! Subscription domain module.
//!
//! The subscription aggregate and its status state machine. Subscriptions
//! are never hard-deleted; cancellation and expiry are status transitions
//! so the audit trail survives.

mod aggregate;
mod errors;
mod status;

pub use aggregate::Subscription;
pub use errors::SubscriptionError;
pub use status::SubscriptionStatus;
