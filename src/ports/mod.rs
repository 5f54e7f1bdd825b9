//! Ports - interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Read Ports
//!
//! - `TenantReader` - organizations, activities, users
//! - `MembershipReader` - role lookups for authorization checks
//! - `CatalogReader` - services and plans (read-mostly reference data)
//!
//! ## Write Ports
//!
//! - `SubscriptionRepository` - subscription persistence with optimistic
//!   locking (concurrent mutations surface as `Conflict`)
//! - `DeliveryLog` - append-only webhook delivery audit records
//!
//! ## Infrastructure Ports
//!
//! - `NonceStore` - atomic single-use markers for SSO token replay defense
//! - `EventDispatcher` - fire-and-forget license event delivery
//! - `WebhookTransport` - outbound HTTP with bounded timeouts

mod catalog_reader;
mod delivery_log;
mod event_dispatcher;
mod membership_reader;
mod nonce_store;
mod subscription_repository;
mod tenant_reader;
mod webhook_transport;

pub use catalog_reader::CatalogReader;
pub use delivery_log::DeliveryLog;
pub use event_dispatcher::EventDispatcher;
pub use membership_reader::MembershipReader;
pub use nonce_store::NonceStore;
pub use subscription_repository::SubscriptionRepository;
pub use tenant_reader::TenantReader;
pub use webhook_transport::{TransportResponse, WebhookHeaders, WebhookTransport};
