//! Catalog reader port - services and plans.

use async_trait::async_trait;

use crate::domain::catalog::{Plan, Service};
use crate::domain::foundation::{DomainError, PlanId, ServiceCode, ServiceId};

/// Read access to the service/plan catalog.
///
/// The catalog is read-mostly reference data: implementations load immutable
/// snapshots per request (or cache with explicit invalidation); nothing here
/// hands out shared mutable state.
#[async_trait]
pub trait CatalogReader: Send + Sync {
    /// Fetch a service by its slug. `None` when unknown.
    ///
    /// Inactive services are returned too; the resolver decides how to
    /// treat them.
    async fn get_service_by_code(
        &self,
        code: &ServiceCode,
    ) -> Result<Option<Service>, DomainError>;

    /// Fetch a plan by id. `None` when absent.
    async fn get_plan(&self, id: &PlanId) -> Result<Option<Plan>, DomainError>;

    /// Fetch a plan of a service by plan code. `None` when absent.
    async fn find_plan(
        &self,
        service_id: &ServiceId,
        plan_code: &str,
    ) -> Result<Option<Plan>, DomainError>;

    /// The service's free plan, when the catalog defines one.
    async fn free_plan(&self, service_id: &ServiceId) -> Result<Option<Plan>, DomainError>;
}
