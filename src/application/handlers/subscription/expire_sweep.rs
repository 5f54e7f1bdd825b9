//! ExpireLapsedSubscriptionsHandler - periodic expiry sweep.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::foundation::{ErrorCode, Timestamp};
use crate::domain::subscription::SubscriptionError;
use crate::ports::SubscriptionRepository;

/// Handler flipping lapsed subscriptions to their terminal `Expired` state.
///
/// Readers never trust the stored status (lazy expiry), so this sweep is
/// pure hygiene: it keeps listings honest without being on any read path.
/// Idempotent and safe to run concurrently with itself: a version conflict
/// on a row means another sweep (or a user command) already got there, and
/// the row is skipped. Emits no webhooks; the action vocabulary is reserved
/// for user-visible changes.
pub struct ExpireLapsedSubscriptionsHandler {
    subscriptions: Arc<dyn SubscriptionRepository>,
}

impl ExpireLapsedSubscriptionsHandler {
    pub fn new(subscriptions: Arc<dyn SubscriptionRepository>) -> Self {
        Self { subscriptions }
    }

    /// Runs one sweep. Returns the number of rows expired.
    pub async fn handle(&self) -> Result<usize, SubscriptionError> {
        let now = Timestamp::now();
        let lapsed = self.subscriptions.list_lapsed(&now).await?;
        let mut expired = 0usize;

        for mut subscription in lapsed {
            if subscription.expire(now).is_err() {
                // Already terminal; nothing to do.
                continue;
            }
            match self.subscriptions.update(&subscription).await {
                Ok(()) => expired += 1,
                Err(err) if err.code == ErrorCode::Conflict => {
                    debug!(subscription_id = %subscription.id, "Sweep lost the race for a row; skipping");
                }
                Err(err) => return Err(err.into()),
            }
        }

        if expired > 0 {
            info!(expired, "Expiry sweep flipped lapsed subscriptions");
        }
        Ok(expired)
    }
}
