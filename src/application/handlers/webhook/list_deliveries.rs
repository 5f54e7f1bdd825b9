//! ListDeliveriesHandler - audit listing of webhook dispatch outcomes.

use std::sync::Arc;

use crate::domain::foundation::ServiceCode;
use crate::domain::webhook::{DeliveryRecord, WebhookError};
use crate::ports::DeliveryLog;

/// Default page size for the audit listing.
pub const DEFAULT_LIMIT: u32 = 50;

/// Upper bound a caller may request.
pub const MAX_LIMIT: u32 = 200;

/// Query for recent delivery records, newest first.
#[derive(Debug, Clone, Default)]
pub struct ListDeliveriesQuery {
    pub service_code: Option<ServiceCode>,
    pub limit: Option<u32>,
}

/// Handler reading the append-only delivery log.
pub struct ListDeliveriesHandler {
    log: Arc<dyn DeliveryLog>,
}

impl ListDeliveriesHandler {
    pub fn new(log: Arc<dyn DeliveryLog>) -> Self {
        Self { log }
    }

    pub async fn handle(
        &self,
        query: ListDeliveriesQuery,
    ) -> Result<Vec<DeliveryRecord>, WebhookError> {
        let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        Ok(self.log.list(query.service_code.as_ref(), limit).await?)
    }
}
