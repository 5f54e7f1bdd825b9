//! Webhook domain module.
//!
//! Signed `license.updated` event payloads pushed to downstream services
//! when entitlements change, plus the HMAC signer and retry policy the
//! dispatcher applies. The delivery log record lives here too since its
//! shape is part of the audit contract.

mod delivery;
mod errors;
mod event;
mod retry;
mod signer;

pub use delivery::{DeliveryOutcome, DeliveryRecord};
pub use errors::WebhookError;
pub use event::{ActivitySummary, LicenseAction, LicenseEvent, LicenseSummary, UserSummary};
pub use retry::RetryPolicy;
pub use signer::{payload_hash, WebhookSigner};

/// Event type header/field value for license change notifications.
pub const LICENSE_UPDATED_EVENT: &str = "license.updated";

/// Transport header carrying the event type.
pub const HEADER_EVENT: &str = "X-DOID-Event";

/// Transport header carrying the hex HMAC-SHA256 signature of the body.
pub const HEADER_SIGNATURE: &str = "X-DOID-Signature";

/// Transport header carrying the event's Unix timestamp.
pub const HEADER_TIMESTAMP: &str = "X-DOID-Timestamp";

/// Transport header identifying the sending deployment.
pub const HEADER_SOURCE: &str = "X-Webhook-Source";
