//! ActivateTrialHandler - starts a trial subscription.

use crate::domain::foundation::{ActivityId, ServiceCode, Timestamp, UserId};
use crate::domain::subscription::{Subscription, SubscriptionError};
use crate::domain::webhook::LicenseAction;

use super::support::CommandSupport;

/// Command to start a trial of a plan.
#[derive(Debug, Clone)]
pub struct ActivateTrialCommand {
    pub user_id: UserId,
    pub activity_id: ActivityId,
    pub service_code: ServiceCode,
    pub plan_code: String,
}

/// Handler creating a Trial subscription for (activity, service, plan).
///
/// Rejected when the activity already holds a current direct subscription
/// or the plan offers no trial. Dispatches `trial_activated` after commit.
pub struct ActivateTrialHandler {
    support: CommandSupport,
}

impl ActivateTrialHandler {
    pub fn new(support: CommandSupport) -> Self {
        Self { support }
    }

    pub async fn handle(&self, cmd: ActivateTrialCommand) -> Result<Subscription, SubscriptionError> {
        let now = Timestamp::now();
        let activity = self
            .support
            .authorized_activity(&cmd.user_id, &cmd.activity_id)
            .await?;
        let service = self.support.active_service(&cmd.service_code).await?;
        let plan = self.support.plan(&service, &cmd.plan_code).await?;

        if !plan.offers_trial() {
            return Err(SubscriptionError::TrialNotAvailable(plan.code));
        }

        if let Some(existing) = self
            .support
            .subscriptions
            .find_direct(&activity.id, &service.id)
            .await?
        {
            if existing.is_valid_at(&now) {
                return Err(SubscriptionError::AlreadySubscribed(service.code));
            }
        }

        let subscription = Subscription::start_trial(
            activity.id,
            activity.organization_id,
            service.id,
            plan.id,
            plan.trial_days,
            now,
        );
        self.support.subscriptions.insert(&subscription).await?;

        self.support
            .emit(
                LicenseAction::TrialActivated,
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
    use crate::domain::webhook::LicenseAction;

    fn command(world: &InMemoryWorld, plan_code: &str) -> ActivateTrialCommand {
        ActivateTrialCommand {
            user_id: world.fixture.user_id,
            activity_id: world.fixture.activity_id,
            service_code: ServiceCode::new("smart_review").unwrap(),
            plan_code: plan_code.to_string(),
        }
    }

    #[tokio::test]
    async fn starts_a_trial_and_emits_trial_activated() {
        let world = InMemoryWorld::new(WorldFixture::default());
        let handler = ActivateTrialHandler::new(support(&world));

        let sub = handler.handle(command(&world, "pro")).await.unwrap();
        assert_eq!(sub.status, SubscriptionStatus::Trial);
        assert!(sub.trial_ends_at.is_some());

        let events = world.dispatcher.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].action, LicenseAction::TrialActivated);
        assert_eq!(events[0].license.status, "trial");
    }

    #[tokio::test]
    async fn plan_without_trial_is_rejected() {
        let world = InMemoryWorld::new(WorldFixture::default());
        let handler = ActivateTrialHandler::new(support(&world));

        let result = handler.handle(command(&world, "business")).await;
        assert!(matches!(result, Err(SubscriptionError::TrialNotAvailable(_))));
        assert!(world.dispatcher.events().is_empty());
    }

    #[tokio::test]
    async fn current_subscription_blocks_a_new_trial() {
        let mut fixture = WorldFixture::default();
        fixture.with_direct_subscription("pro", 10);
        let world = InMemoryWorld::new(fixture);
        let handler = ActivateTrialHandler::new(support(&world));

        let result = handler.handle(command(&world, "pro")).await;
        assert!(matches!(result, Err(SubscriptionError::AlreadySubscribed(_))));
    }

    #[tokio::test]
    async fn lapsed_subscription_does_not_block_a_trial() {
        let mut fixture = WorldFixture::default();
        fixture.with_direct_subscription("pro", -30);
        let world = InMemoryWorld::new(fixture);
        let handler = ActivateTrialHandler::new(support(&world));

        assert!(handler.handle(command(&world, "pro")).await.is_ok());
    }

    #[tokio::test]
    async fn non_member_is_forbidden() {
        let world = InMemoryWorld::new(WorldFixture::default());
        let handler = ActivateTrialHandler::new(support(&world));

        let mut cmd = command(&world, "pro");
        cmd.user_id = UserId::new();
        let result = handler.handle(cmd).await;
        assert!(matches!(result, Err(SubscriptionError::Forbidden)));
    }

    #[tokio::test]
    async fn dispatch_failure_does_not_fail_the_command() {
        let mut world = InMemoryWorld::new(WorldFixture::default());
        world.dispatcher = std::sync::Arc::new(
            crate::application::test_support::RecordingDispatcher::failing(),
        );
        let handler = ActivateTrialHandler::new(support(&world));

        assert!(handler.handle(command(&world, "pro")).await.is_ok());
    }
}
