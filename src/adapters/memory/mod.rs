//! In-memory adapter implementations.
//!
//! Used by tests and by single-node deployments that don't need Postgres or
//! Redis durability for the concern in question (the nonce store in
//! particular is a natural fit for process memory when only one node
//! verifies tokens).

mod catalog_reader;
mod delivery_log;
mod membership_reader;
mod nonce_store;
mod subscription_repository;
mod tenant_reader;

pub use catalog_reader::InMemoryCatalogReader;
pub use delivery_log::InMemoryDeliveryLog;
pub use membership_reader::InMemoryMembershipReader;
pub use nonce_store::InMemoryNonceStore;
pub use subscription_repository::InMemorySubscriptionRepository;
pub use tenant_reader::InMemoryTenantReader;
