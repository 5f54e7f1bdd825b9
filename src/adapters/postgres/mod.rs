//! PostgreSQL adapter implementations.

mod catalog_reader;
mod delivery_log;
mod membership_reader;
mod subscription_repository;
mod tenant_reader;

pub use catalog_reader::PostgresCatalogReader;
pub use delivery_log::PostgresDeliveryLog;
pub use membership_reader::PostgresMembershipReader;
pub use subscription_repository::PostgresSubscriptionRepository;
pub use tenant_reader::PostgresTenantReader;
