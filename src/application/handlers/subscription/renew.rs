//! RenewSubscriptionHandler - extends the billing period.

use crate::domain::foundation::{ActivityId, ServiceCode, Timestamp, UserId};
use crate::domain::subscription::{Subscription, SubscriptionError};
use crate::domain::webhook::LicenseAction;

use super::support::CommandSupport;

/// Command to renew the activity's direct subscription.
#[derive(Debug, Clone)]
pub struct RenewSubscriptionCommand {
    pub user_id: UserId,
    pub activity_id: ActivityId,
    pub service_code: ServiceCode,
}

/// Handler extending the period from the later of now and the current
/// period end, clearing any pending cancellation. Dispatches `renewed`.
pub struct RenewSubscriptionHandler {
    support: CommandSupport,
}

impl RenewSubscriptionHandler {
    pub fn new(support: CommandSupport) -> Self {
        Self { support }
    }

    pub async fn handle(
        &self,
        cmd: RenewSubscriptionCommand,
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

        subscription.renew(now)?;
        self.support.subscriptions.update(&subscription).await?;

        self.support
            .emit(
                LicenseAction::Renewed,
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
    use crate::ports::SubscriptionRepository;

    fn command(world: &InMemoryWorld) -> RenewSubscriptionCommand {
        RenewSubscriptionCommand {
            user_id: world.fixture.user_id,
            activity_id: world.fixture.activity_id,
            service_code: ServiceCode::new("smart_review").unwrap(),
        }
    }

    #[tokio::test]
    async fn renewal_extends_the_period_and_emits_renewed() {
        let mut fixture = WorldFixture::default();
        fixture.with_direct_subscription("pro", 10);
        let world = InMemoryWorld::new(fixture);
        let before = world.subscriptions.all().pop().unwrap();

        let handler = RenewSubscriptionHandler::new(support(&world));
        let renewed = handler.handle(command(&world)).await.unwrap();

        assert!(renewed.current_period_end.is_after(&before.current_period_end));
        let events = world.dispatcher.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].action, LicenseAction::Renewed);
    }

    #[tokio::test]
    async fn renewal_clears_a_pending_cancellation() {
        let mut fixture = WorldFixture::default();
        fixture.with_direct_subscription("pro", 10);
        let world = InMemoryWorld::new(fixture);
        {
            let mut sub = world.subscriptions.all().pop().unwrap();
            sub.cancel(false, Timestamp::now()).unwrap();
            world.subscriptions.update(&sub).await.unwrap();
        }

        let handler = RenewSubscriptionHandler::new(support(&world));
        let renewed = handler.handle(command(&world)).await.unwrap();
        assert_eq!(renewed.status, SubscriptionStatus::Active);
        assert!(!renewed.cancel_at_period_end);
    }

    #[tokio::test]
    async fn missing_subscription_fails_with_not_found() {
        let world = InMemoryWorld::new(WorldFixture::default());
        let handler = RenewSubscriptionHandler::new(support(&world));

        let result = handler.handle(command(&world)).await;
        assert!(matches!(result, Err(SubscriptionError::NotFound { .. })));
        assert!(world.dispatcher.events().is_empty());
    }
}
