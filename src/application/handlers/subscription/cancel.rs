//! CancelSubscriptionHandler.

use crate::domain::foundation::{ActivityId, ServiceCode, Timestamp, UserId};
use crate::domain::subscription::{Subscription, SubscriptionError};
use crate::domain::webhook::LicenseAction;

use super::support::CommandSupport;

/// Command to cancel the activity's direct subscription.
#[derive(Debug, Clone)]
pub struct CancelSubscriptionCommand {
    pub user_id: UserId,
    pub activity_id: ActivityId,
    pub service_code: ServiceCode,
    /// Cut access now instead of at the period end.
    pub immediate: bool,
}

/// Handler cancelling a subscription.
///
/// Default is cancel-at-period-end: access continues until the paid period
/// lapses. Dispatches `cancelled` either way.
pub struct CancelSubscriptionHandler {
    support: CommandSupport,
}

impl CancelSubscriptionHandler {
    pub fn new(support: CommandSupport) -> Self {
        Self { support }
    }

    pub async fn handle(
        &self,
        cmd: CancelSubscriptionCommand,
    ) -> Result<Subscription, SubscriptionError> {
        let now = Timestamp::now();
        let activity = self
            .support
            .authorized_activity(&cmd.user_id, &cmd.activity_id)
            .await?;
        let service = self.support.active_service(&cmd.service_code).await?;

        let mut subscription = self
            .support
            .subscriptions
            .find_direct(&activity.id, &service.id)
            .await?
            .ok_or(SubscriptionError::NotFound {
                activity_id: activity.id,
                service_code: service.code.clone(),
            })?;

        subscription.cancel(cmd.immediate, now)?;
        self.support.subscriptions.update(&subscription).await?;

        self.support
            .emit(
                LicenseAction::Cancelled,
                &service.code,
                &cmd.user_id,
                &activity,
                now,
            )
            .await;

        Ok(subscription)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::subscription::support::fixtures::support;
    use crate::application::test_support::{InMemoryWorld, WorldFixture};
    use crate::domain::subscription::SubscriptionStatus;

    fn command(world: &InMemoryWorld, immediate: bool) -> CancelSubscriptionCommand {
        CancelSubscriptionCommand {
            user_id: world.fixture.user_id,
            activity_id: world.fixture.activity_id,
            service_code: ServiceCode::new("smart_review").unwrap(),
            immediate,
        }
    }

    #[tokio::test]
    async fn default_cancel_keeps_access_until_period_end() {
        let mut fixture = WorldFixture::default();
        fixture.with_direct_subscription("pro", 10);
        let world = InMemoryWorld::new(fixture);

        let handler = CancelSubscriptionHandler::new(support(&world));
        let cancelled = handler.handle(command(&world, false)).await.unwrap();

        assert_eq!(cancelled.status, SubscriptionStatus::Cancelled);
        assert!(cancelled.cancel_at_period_end);
        assert!(cancelled.is_valid_at(&Timestamp::now()));

        let events = world.dispatcher.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].action, LicenseAction::Cancelled);
    }

    #[tokio::test]
    async fn immediate_cancel_cuts_access_now() {
        let mut fixture = WorldFixture::default();
        fixture.with_direct_subscription("pro", 10);
        let world = InMemoryWorld::new(fixture);

        let handler = CancelSubscriptionHandler::new(support(&world));
        let cancelled = handler.handle(command(&world, true)).await.unwrap();

        assert!(!cancelled.cancel_at_period_end);
        assert!(!cancelled.is_valid_at(&Timestamp::now().plus_secs(1)));
    }

    #[tokio::test]
    async fn cancelling_twice_is_an_invalid_transition() {
        let mut fixture = WorldFixture::default();
        fixture.with_direct_subscription("pro", 10);
        let world = InMemoryWorld::new(fixture);
        let handler = CancelSubscriptionHandler::new(support(&world));

        handler.handle(command(&world, false)).await.unwrap();
        let result = handler.handle(command(&world, false)).await;
        assert!(matches!(result, Err(SubscriptionError::InvalidState(_))));
    }
}
