//! Delivery log port - append-only webhook audit trail.

use async_trait::async_trait;

use crate::domain::foundation::{DeliveryId, DomainError, ServiceCode};
use crate::domain::webhook::DeliveryRecord;

/// Append-only store of webhook dispatch outcomes.
///
/// Records are written once, after the terminal outcome of a dispatch job,
/// and never mutated. The delivery worker must complete this write before
/// the job is considered finished, so failures are never silently lost.
#[async_trait]
pub trait DeliveryLog: Send + Sync {
    /// Appends a terminal delivery record.
    async fn append(&self, record: &DeliveryRecord) -> Result<(), DomainError>;

    /// Fetch a record by id. `None` when absent.
    async fn get(&self, id: &DeliveryId) -> Result<Option<DeliveryRecord>, DomainError>;

    /// Most recent records, optionally filtered by service, newest first.
    async fn list(
        &self,
        service_code: Option<&ServiceCode>,
        limit: u32,
    ) -> Result<Vec<DeliveryRecord>, DomainError>;
}
