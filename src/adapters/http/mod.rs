//! HTTP adapters - REST API implementations.
//!
//! Each domain module has its own HTTP adapter for endpoint exposure. The
//! routers are nested under `/api` by the binary:
//!
//! - `/api/sso` - token issuance and verification
//! - `/api/subscriptions` - lifecycle commands
//! - `/api/entitlements` - read-only resolution
//! - `/api/webhooks` - delivery audit, replay, receiver health

mod context;
mod error;

pub mod entitlement;
pub mod sso;
pub mod subscription;
pub mod webhook_admin;

pub use context::CallerContext;
pub use entitlement::{entitlement_routes, EntitlementAppState};
pub use error::{ApiError, ErrorResponse};
pub use sso::{sso_routes, SsoAppState};
pub use subscription::{subscription_routes, SubscriptionAppState};
pub use webhook_admin::{webhook_admin_routes, WebhookAdminAppState};
