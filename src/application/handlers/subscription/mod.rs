//! Subscription command handlers.

mod activate_trial;
mod cancel;
mod change_plan;
mod expire_sweep;
mod renew;
mod support;

pub use activate_trial::{ActivateTrialCommand, ActivateTrialHandler};
pub use cancel::{CancelSubscriptionCommand, CancelSubscriptionHandler};
pub use change_plan::{ChangePlanCommand, ChangePlanHandler};
pub use expire_sweep::ExpireLapsedSubscriptionsHandler;
pub use renew::{RenewSubscriptionCommand, RenewSubscriptionHandler};
pub use support::CommandSupport;
