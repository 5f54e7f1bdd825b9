//! Subscription aggregate entity.
//!
//! A subscription ties an activity (or, for package products, an
//! organization) to a plan of a service.
//!
//! # Design Decisions
//!
//! - **Never hard-deleted**: cancellation and expiry are status transitions,
//!   preserving the audit trail
//! - **Lazy expiry**: stored status is not trusted for validity; readers
//!   compare the period timestamps against their own clock
//! - **Optimistic locking**: `version` is checked on every update so
//!   concurrent mutations of the same row surface as `Conflict`

use serde::{Deserialize, Serialize};

use crate::domain::catalog::BillingCycle;
use crate::domain::foundation::{
    ActivityId, DomainError, ErrorCode, OrganizationId, PlanId, ServiceId, StateMachine,
    SubscriptionId, Timestamp,
};

use super::SubscriptionStatus;

/// Subscription aggregate.
///
/// # Invariants
///
/// - At most one live direct subscription per (activity, service)
/// - `current_period_start <= current_period_end`
/// - Status transitions follow [`SubscriptionStatus`] state machine rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: SubscriptionId,

    /// Activity consuming the service. For organization packages this is the
    /// organization's primary activity at purchase time; coverage applies to
    /// every activity the organization owns.
    pub activity_id: ActivityId,

    /// Owning organization, when the activity link has been backfilled.
    pub organization_id: Option<OrganizationId>,

    pub service_id: ServiceId,
    pub plan_id: PlanId,

    pub status: SubscriptionStatus,
    pub billing_cycle: BillingCycle,

    pub current_period_start: Timestamp,
    pub current_period_end: Timestamp,

    /// End of the trial window; only set while `status` is `Trial`.
    pub trial_ends_at: Option<Timestamp>,

    /// True when this row is an organization-package purchase rather than a
    /// direct per-activity subscription.
    pub inherited_from_org: bool,

    /// Cancellation requested; access continues until `current_period_end`.
    pub cancel_at_period_end: bool,

    /// Optimistic lock version, bumped by the persistence layer on update.
    pub version: i32,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub cancelled_at: Option<Timestamp>,
}

impl Subscription {
    /// Creates a trial subscription ending `trial_days` from `now`.
    pub fn start_trial(
        activity_id: ActivityId,
        organization_id: Option<OrganizationId>,
        service_id: ServiceId,
        plan_id: PlanId,
        trial_days: u32,
        now: Timestamp,
    ) -> Self {
        let trial_end = now.plus_days(i64::from(trial_days));
        Self {
            id: SubscriptionId::new(),
            activity_id,
            organization_id,
            service_id,
            plan_id,
            status: SubscriptionStatus::Trial,
            billing_cycle: BillingCycle::Monthly,
            current_period_start: now,
            current_period_end: trial_end,
            trial_ends_at: Some(trial_end),
            inherited_from_org: false,
            cancel_at_period_end: false,
            version: 0,
            created_at: now,
            updated_at: now,
            cancelled_at: None,
        }
    }

    /// Creates an active paid subscription with a fresh billing period.
    pub fn start_paid(
        activity_id: ActivityId,
        organization_id: Option<OrganizationId>,
        service_id: ServiceId,
        plan_id: PlanId,
        cycle: BillingCycle,
        now: Timestamp,
    ) -> Self {
        Self {
            id: SubscriptionId::new(),
            activity_id,
            organization_id,
            service_id,
            plan_id,
            status: SubscriptionStatus::Active,
            billing_cycle: cycle,
            current_period_start: now,
            current_period_end: period_end_for(cycle, now),
            trial_ends_at: None,
            inherited_from_org: false,
            cancel_at_period_end: false,
            version: 0,
            created_at: now,
            updated_at: now,
            cancelled_at: None,
        }
    }

    /// The instant this subscription stops being valid: the trial end while
    /// on trial, the period end otherwise.
    pub fn effective_end(&self) -> Timestamp {
        match (self.status, self.trial_ends_at) {
            (SubscriptionStatus::Trial, Some(trial_end)) => trial_end,
            _ => self.current_period_end,
        }
    }

    /// Whether the stored row can still grant access: live, or cancelled
    /// at-period-end (access continues until the period lapses).
    pub fn grants_access(&self) -> bool {
        self.status.is_live()
            || (self.status == SubscriptionStatus::Cancelled && self.cancel_at_period_end)
    }

    /// Whether this subscription is a valid entitlement source at `now`.
    ///
    /// The row must still grant access AND the effective end must not have
    /// elapsed - the lazy-expiry rule.
    pub fn is_valid_at(&self, now: &Timestamp) -> bool {
        self.grants_access() && self.effective_end().is_after(now)
    }

    /// Converts a trial (or re-activates an existing row) to a paid plan
    /// with a fresh billing period.
    pub fn activate_plan(
        &mut self,
        plan_id: PlanId,
        cycle: BillingCycle,
        now: Timestamp,
    ) -> Result<(), DomainError> {
        self.status = self
            .status
            .transition_to(SubscriptionStatus::Active)
            .map_err(invalid_transition)?;
        self.plan_id = plan_id;
        self.billing_cycle = cycle;
        self.current_period_start = now;
        self.current_period_end = period_end_for(cycle, now);
        self.trial_ends_at = None;
        self.cancel_at_period_end = false;
        self.cancelled_at = None;
        self.updated_at = now;
        Ok(())
    }

    /// Extends the billing period from the later of `now` and the current
    /// period end, clearing any pending cancellation.
    pub fn renew(&mut self, now: Timestamp) -> Result<(), DomainError> {
        self.status = self
            .status
            .transition_to(SubscriptionStatus::Active)
            .map_err(invalid_transition)?;
        let base = if self.current_period_end.is_after(&now) {
            self.current_period_end
        } else {
            now
        };
        self.current_period_start = base;
        self.current_period_end = period_end_for(self.billing_cycle, base);
        self.trial_ends_at = None;
        self.cancel_at_period_end = false;
        self.cancelled_at = None;
        self.updated_at = now;
        Ok(())
    }

    /// Cancels the subscription.
    ///
    /// Default is cancel-at-period-end: the stored status flips to
    /// `Cancelled` but access continues until the period lapses. With
    /// `immediate` the period is also cut to `now`.
    pub fn cancel(&mut self, immediate: bool, now: Timestamp) -> Result<(), DomainError> {
        self.status = self
            .status
            .transition_to(SubscriptionStatus::Cancelled)
            .map_err(invalid_transition)?;
        self.cancel_at_period_end = !immediate;
        if immediate {
            self.current_period_end = now;
            self.trial_ends_at = None;
        }
        self.cancelled_at = Some(now);
        self.updated_at = now;
        Ok(())
    }

    /// Marks the subscription expired. Used by the sweep; forward-only.
    pub fn expire(&mut self, now: Timestamp) -> Result<(), DomainError> {
        self.status = self
            .status
            .transition_to(SubscriptionStatus::Expired)
            .map_err(invalid_transition)?;
        self.updated_at = now;
        Ok(())
    }
}

/// Period end for a billing cycle starting at `from`.
fn period_end_for(cycle: BillingCycle, from: Timestamp) -> Timestamp {
    match cycle {
        BillingCycle::Monthly => from.plus_months(1),
        BillingCycle::Yearly => from.plus_days(365),
    }
}

fn invalid_transition(err: crate::domain::foundation::ValidationError) -> DomainError {
    DomainError::new(ErrorCode::InvalidStateTransition, err.to_string())
}
