//! In-memory DeliveryLog.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::{DeliveryId, DomainError, ServiceCode};
use crate::domain::webhook::DeliveryRecord;
use crate::ports::DeliveryLog;

/// Vec-backed append-only delivery log.
#[derive(Default)]
pub struct InMemoryDeliveryLog {
    records: Mutex<Vec<DeliveryRecord>>,
}

impl InMemoryDeliveryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all records (tests).
    pub fn all(&self) -> Vec<DeliveryRecord> {
        self.records.lock().expect("delivery lock poisoned").clone()
    }
}

#[async_trait]
impl DeliveryLog for InMemoryDeliveryLog {
    async fn append(&self, record: &DeliveryRecord) -> Result<(), DomainError> {
        self.records
            .lock()
            .expect("delivery lock poisoned")
            .push(record.clone());
        Ok(())
    }

    async fn get(&self, id: &DeliveryId) -> Result<Option<DeliveryRecord>, DomainError> {
        Ok(self
            .records
            .lock()
            .expect("delivery lock poisoned")
            .iter()
            .find(|r| &r.id == id)
            .cloned())
    }

    async fn list(
        &self,
        service_code: Option<&ServiceCode>,
        limit: u32,
    ) -> Result<Vec<DeliveryRecord>, DomainError> {
        let records = self.records.lock().expect("delivery lock poisoned");
        let mut out: Vec<DeliveryRecord> = records
            .iter()
            .filter(|r| service_code.map_or(true, |c| &r.service_code == c))
            .cloned()
            .collect();
        out.sort_by_key(|r| std::cmp::Reverse(r.created_at));
        out.truncate(limit as usize);
        Ok(out)
    }
}
