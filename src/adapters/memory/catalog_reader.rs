//! In-memory CatalogReader.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::catalog::{Plan, Service};
use crate::domain::foundation::{DomainError, PlanId, ServiceCode, ServiceId};
use crate::ports::CatalogReader;

/// HashMap-backed catalog snapshot.
#[derive(Default)]
pub struct InMemoryCatalogReader {
    services: Mutex<HashMap<ServiceId, Service>>,
    plans: Mutex<HashMap<PlanId, Plan>>,
}

impl InMemoryCatalogReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_service(&self, service: Service) {
        self.services
            .lock()
            .expect("catalog lock poisoned")
            .insert(service.id, service);
    }

    pub fn insert_plan(&self, plan: Plan) {
        self.plans
            .lock()
            .expect("catalog lock poisoned")
            .insert(plan.id, plan);
    }
}

#[async_trait]
impl CatalogReader for InMemoryCatalogReader {
    async fn get_service_by_code(
        &self,
        code: &ServiceCode,
    ) -> Result<Option<Service>, DomainError> {
        Ok(self
            .services
            .lock()
            .expect("catalog lock poisoned")
            .values()
            .find(|s| &s.code == code)
            .cloned())
    }

    async fn get_plan(&self, id: &PlanId) -> Result<Option<Plan>, DomainError> {
        Ok(self
            .plans
            .lock()
            .expect("catalog lock poisoned")
            .get(id)
            .cloned())
    }

    async fn find_plan(
        &self,
        service_id: &ServiceId,
        plan_code: &str,
    ) -> Result<Option<Plan>, DomainError> {
        Ok(self
            .plans
            .lock()
            .expect("catalog lock poisoned")
            .values()
            .find(|p| &p.service_id == service_id && p.code == plan_code)
            .cloned())
    }

    async fn free_plan(&self, service_id: &ServiceId) -> Result<Option<Plan>, DomainError> {
        Ok(self
            .plans
            .lock()
            .expect("catalog lock poisoned")
            .values()
            .find(|p| &p.service_id == service_id && p.is_free())
            .cloned())
    }
}
