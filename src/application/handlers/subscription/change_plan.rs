//! ChangePlanHandler - purchase, upgrade, or trial conversion.

use crate::domain::catalog::BillingCycle;
use crate::domain::foundation::{ActivityId, ServiceCode, Timestamp, UserId};
use crate::domain::subscription::{Subscription, SubscriptionError, SubscriptionStatus};
use crate::domain::webhook::LicenseAction;

use super::support::CommandSupport;

/// Command to move the activity onto a paid plan.
#[derive(Debug, Clone)]
pub struct ChangePlanCommand {
    pub user_id: UserId,
    pub activity_id: ActivityId,
    pub service_code: ServiceCode,
    pub plan_code: String,
    pub billing_cycle: BillingCycle,
}

/// Handler activating a paid plan.
///
/// Converts an existing trial, re-activates a cancelled row, or changes the
/// plan on an active one - always with a fresh billing period. When the only
/// prior row is terminally Expired (or none exists) a new subscription is
/// created instead. The optimistic version check surfaces concurrent
/// mutations as `Conflict`. Dispatches `activated` after commit.
pub struct ChangePlanHandler {
    support: CommandSupport,
}

impl ChangePlanHandler {
    pub fn new(support: CommandSupport) -> Self {
        Self { support }
    }

    pub async fn handle(&self, cmd: ChangePlanCommand) -> Result<Subscription, SubscriptionError> {
        let now = Timestamp::now();
        let activity = self
            .support
            .authorized_activity(&cmd.user_id, &cmd.activity_id)
            .await?;
        let service = self.support.active_service(&cmd.service_code).await?;
        let plan = self.support.plan(&service, &cmd.plan_code).await?;

        let existing = self
            .support
            .subscriptions
            .find_direct(&activity.id, &service.id)
            .await?;

        let subscription = match existing {
            Some(mut sub) if sub.status != SubscriptionStatus::Expired => {
                sub.activate_plan(plan.id, cmd.billing_cycle, now)?;
                self.support.subscriptions.update(&sub).await?;
                sub
            }
            _ => {
                let sub = Subscription::start_paid(
                    activity.id,
                    activity.organization_id,
                    service.id,
                    plan.id,
                    cmd.billing_cycle,
                    now,
                );
                self.support.subscriptions.insert(&sub).await?;
                sub
            }
        };

        self.support
            .emit(
                LicenseAction::Activated,
                &service.code,
                &cmd.user_id,
                &activity,
                now,
            )
            .await;

        Ok(subscription)
    }
}
