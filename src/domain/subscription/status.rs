//! Subscription status state machine.

use crate::domain::foundation::StateMachine;
use serde::{Deserialize, Serialize};

/// Stored lifecycle status of a subscription.
///
/// This is the *stored* status; current validity is always computed from
/// the period timestamps at read time (lazy expiry), so a row can read
/// `Active` while the resolver already treats it as expired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    /// Trial period, access until `trial_ends_at`.
    Trial,

    /// Paid subscription with access until `current_period_end`.
    Active,

    /// Period elapsed without renewal. Terminal.
    Expired,

    /// Cancelled by the customer. Access may continue until period end
    /// when cancellation was requested at-period-end.
    Cancelled,
}

impl SubscriptionStatus {
    /// Trial and Active. Cancelled-at-period-end rows also keep granting
    /// access until the period lapses; see `Subscription::grants_access`.
    pub fn is_live(&self) -> bool {
        matches!(self, SubscriptionStatus::Trial | SubscriptionStatus::Active)
    }
}

impl StateMachine for SubscriptionStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use SubscriptionStatus::*;
        matches!(
            (self, target),
            // From TRIAL
            (Trial, Active)        // purchase converts the trial
                | (Trial, Expired)
                | (Trial, Cancelled)
            // From ACTIVE
                | (Active, Active) // renewal / plan change
                | (Active, Expired)
                | (Active, Cancelled)
            // From CANCELLED (cancel-at-period-end lapses)
                | (Cancelled, Expired)
                | (Cancelled, Active) // renewal before the period lapses
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use SubscriptionStatus::*;
        match self {
            Trial => vec![Active, Expired, Cancelled],
            Active => vec![Active, Expired, Cancelled],
            Cancelled => vec![Expired, Active],
            Expired => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expired_is_terminal() {
        assert!(SubscriptionStatus::Expired.is_terminal());
        assert!(SubscriptionStatus::Expired
            .transition_to(SubscriptionStatus::Active)
            .is_err());
    }

    #[test]
    fn trial_converts_to_active() {
        let next = SubscriptionStatus::Trial
            .transition_to(SubscriptionStatus::Active)
            .unwrap();
        assert_eq!(next, SubscriptionStatus::Active);
    }

    #[test]
    fn expiry_only_moves_forward() {
        // Expiry sweep relies on every live/cancelled state accepting Expired.
        for status in [
            SubscriptionStatus::Trial,
            SubscriptionStatus::Active,
            SubscriptionStatus::Cancelled,
        ] {
            assert!(status.can_transition_to(&SubscriptionStatus::Expired));
        }
    }

    #[test]
    fn live_statuses_are_trial_and_active() {
        assert!(SubscriptionStatus::Trial.is_live());
        assert!(SubscriptionStatus::Active.is_live());
        assert!(!SubscriptionStatus::Expired.is_live());
        assert!(!SubscriptionStatus::Cancelled.is_live());
    }
}
