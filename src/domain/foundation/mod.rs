//! Foundation layer - shared value objects and error types.
//!
//! These types carry no business rules of their own; they are the vocabulary
//! the rest of the domain is written in: strongly-typed identifiers, the
//! `Timestamp` value object, validated slugs and emails, the error taxonomy
//! and the `StateMachine` trait used by status enums.

mod email;
mod errors;
mod ids;
mod service_code;
mod state_machine;
mod timestamp;

pub use email::EmailAddress;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{ActivityId, DeliveryId, OrganizationId, PlanId, ServiceId, SubscriptionId, UserId};
pub use service_code::ServiceCode;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
