//! Shared in-memory world for application handler tests.
//!
//! Builds a small tenant: organization `O1` owning activity `A1`, user `U1`
//! with owner roles on both, the `smart_review` app service with `pro` /
//! `business` plans, and an `org_package` package service whose plans grant
//! `smart_review` tiers.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::adapters::memory::{
    InMemoryCatalogReader, InMemoryDeliveryLog, InMemoryMembershipReader,
    InMemorySubscriptionRepository, InMemoryTenantReader,
};
use crate::domain::catalog::{
    BillingCycle, PackageGrant, Plan, PlanFeatures, Service, ServiceKind,
};
use crate::domain::foundation::{
    ActivityId, EmailAddress, OrganizationId, PlanId, ServiceCode, ServiceId, Timestamp, UserId,
};
use crate::domain::subscription::Subscription;
use crate::domain::tenant::{
    AccountType, Activity, ActivityRole, ActivityStatus, OrgRole, Organization, User,
};
use crate::domain::webhook::{LicenseEvent, WebhookError};
use crate::ports::EventDispatcher;

/// Declarative description of the world to build.
#[derive(Debug, Clone)]
pub struct WorldFixture {
    pub organization_id: OrganizationId,
    pub activity_id: ActivityId,
    pub user_id: UserId,
    pub service_id: ServiceId,
    pub package_service_id: ServiceId,
    pub pro_plan_id: PlanId,
    pub business_plan_id: PlanId,
    pub free_plan_id: PlanId,
    pub service_active: bool,

    org_detached: bool,
    with_free_plan: bool,
    org_package_plan: Option<String>,
    direct_subscription: Option<(String, i64)>,
    trial_days_left: Option<i64>,
}

impl Default for WorldFixture {
    fn default() -> Self {
        Self {
            organization_id: OrganizationId::new(),
            activity_id: ActivityId::new(),
            user_id: UserId::new(),
            service_id: ServiceId::new(),
            package_service_id: ServiceId::new(),
            pro_plan_id: PlanId::new(),
            business_plan_id: PlanId::new(),
            free_plan_id: PlanId::new(),
            service_active: true,
            org_detached: false,
            with_free_plan: false,
            org_package_plan: None,
            direct_subscription: None,
            trial_days_left: None,
        }
    }
}

impl WorldFixture {
    /// Organization holds a package whose grants cover `smart_review` at
    /// the given tier.
    pub fn with_org_package(&mut self, plan_code: &str) -> &mut Self {
        self.org_package_plan = Some(plan_code.to_string());
        self
    }

    /// Activity holds a direct Active subscription to `smart_review`; the
    /// period ends `days_left` days from now (negative = already lapsed).
    pub fn with_direct_subscription(&mut self, plan_code: &str, days_left: i64) -> &mut Self {
        self.direct_subscription = Some((plan_code.to_string(), days_left));
        self
    }

    /// Activity holds a direct Trial subscription to `smart_review` ending
    /// `days_left` days from now (negative = already lapsed).
    pub fn with_trial_subscription(&mut self, days_left: i64) -> &mut Self {
        self.trial_days_left = Some(days_left);
        self
    }

    /// Catalog defines a free plan for `smart_review`.
    pub fn with_free_plan(&mut self) -> &mut Self {
        self.with_free_plan = true;
        self
    }

    /// Activity has no organization link (pre-backfill data).
    pub fn detach_organization(&mut self) -> &mut Self {
        self.org_detached = true;
        self
    }
}

/// Event dispatcher that records instead of delivering.
#[derive(Default)]
pub struct RecordingDispatcher {
    events: Mutex<Vec<LicenseEvent>>,
    fail: bool,
}

impl RecordingDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispatcher whose `dispatch` always errors, for fire-and-forget tests.
    pub fn failing() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn events(&self) -> Vec<LicenseEvent> {
        self.events.lock().expect("dispatcher lock poisoned").clone()
    }
}

#[async_trait]
impl EventDispatcher for RecordingDispatcher {
    async fn dispatch(&self, event: LicenseEvent) -> Result<(), WebhookError> {
        if self.fail {
            return Err(WebhookError::QueueClosed);
        }
        self.events
            .lock()
            .expect("dispatcher lock poisoned")
            .push(event);
        Ok(())
    }
}

/// The wired-up in-memory world.
pub struct InMemoryWorld {
    pub fixture: WorldFixture,
    pub tenants: Arc<InMemoryTenantReader>,
    pub catalog: Arc<InMemoryCatalogReader>,
    pub subscriptions: Arc<InMemorySubscriptionRepository>,
    pub memberships: Arc<InMemoryMembershipReader>,
    pub deliveries: Arc<InMemoryDeliveryLog>,
    pub dispatcher: Arc<RecordingDispatcher>,
}

impl InMemoryWorld {
    pub fn new(fixture: WorldFixture) -> Self {
        let now = Timestamp::now();
        let tenants = Arc::new(InMemoryTenantReader::new());
        let catalog = Arc::new(InMemoryCatalogReader::new());
        let subscriptions = Arc::new(InMemorySubscriptionRepository::new());
        let memberships = Arc::new(InMemoryMembershipReader::new());

        tenants.insert_organization(Organization {
            id: fixture.organization_id,
            name: "O1 Holdings".to_string(),
            account_type: AccountType::Agency,
            max_activities: 10,
            created_at: now,
        });
        tenants.insert_activity(Activity {
            id: fixture.activity_id,
            organization_id: if fixture.org_detached {
                None
            } else {
                Some(fixture.organization_id)
            },
            name: "Main Street Store".to_string(),
            status: ActivityStatus::Active,
            created_at: now,
        });
        tenants.insert_user(User {
            id: fixture.user_id,
            email: EmailAddress::new("owner@example.com").expect("fixture email"),
            name: "Owner".to_string(),
            created_at: now,
        });

        memberships.grant_activity_role(
            fixture.user_id,
            fixture.activity_id,
            ActivityRole::Owner,
        );
        memberships.grant_org_role(fixture.user_id, fixture.organization_id, OrgRole::Owner);

        let service_code = ServiceCode::new("smart_review").expect("fixture code");
        catalog.insert_service(Service {
            id: fixture.service_id,
            code: service_code.clone(),
            name: "Smart Review".to_string(),
            base_app_url: "https://review.example.com".to_string(),
            kind: ServiceKind::App,
            active: fixture.service_active,
        });
        catalog.insert_service(Service {
            id: fixture.package_service_id,
            code: ServiceCode::new("org_package").expect("fixture code"),
            name: "Organization Package".to_string(),
            base_app_url: String::new(),
            kind: ServiceKind::Package,
            active: true,
        });

        catalog.insert_plan(Plan {
            id: fixture.pro_plan_id,
            service_id: fixture.service_id,
            code: "pro".to_string(),
            name: "Pro".to_string(),
            price_monthly_cents: 2900,
            price_yearly_cents: 29000,
            trial_days: 14,
            features: PlanFeatures::default(),
        });
        catalog.insert_plan(Plan {
            id: fixture.business_plan_id,
            service_id: fixture.service_id,
            code: "business".to_string(),
            name: "Business".to_string(),
            price_monthly_cents: 7900,
            price_yearly_cents: 79000,
            trial_days: 0,
            features: PlanFeatures::default(),
        });
        if fixture.with_free_plan {
            catalog.insert_plan(Plan {
                id: fixture.free_plan_id,
                service_id: fixture.service_id,
                code: "free".to_string(),
                name: "Free".to_string(),
                price_monthly_cents: 0,
                price_yearly_cents: 0,
                trial_days: 0,
                features: PlanFeatures::default(),
            });
        }

        if let Some(tier) = &fixture.org_package_plan {
            let package_plan_id = PlanId::new();
            catalog.insert_plan(Plan {
                id: package_plan_id,
                service_id: fixture.package_service_id,
                code: tier.clone(),
                name: format!("Agency {}", capitalize(tier)),
                price_monthly_cents: 9900,
                price_yearly_cents: 99000,
                trial_days: 0,
                features: PlanFeatures {
                    grants: vec![PackageGrant {
                        service_code: service_code.clone(),
                        plan_code: tier.clone(),
                    }],
                    flags: vec![],
                },
            });
            let mut package = Subscription::start_paid(
                fixture.activity_id,
                Some(fixture.organization_id),
                fixture.package_service_id,
                package_plan_id,
                BillingCycle::Yearly,
                now.minus_days(10),
            );
            package.inherited_from_org = true;
            subscriptions.seed(package);
        }

        if let Some((plan_code, days_left)) = &fixture.direct_subscription {
            let plan_id = match plan_code.as_str() {
                "business" => fixture.business_plan_id,
                _ => fixture.pro_plan_id,
            };
            let mut sub = Subscription::start_paid(
                fixture.activity_id,
                Some(fixture.organization_id),
                fixture.service_id,
                plan_id,
                BillingCycle::Monthly,
                now.minus_days(30),
            );
            sub.current_period_end = now.plus_days(*days_left);
            subscriptions.seed(sub);
        }

        if let Some(days_left) = fixture.trial_days_left {
            let mut sub = Subscription::start_trial(
                fixture.activity_id,
                Some(fixture.organization_id),
                fixture.service_id,
                fixture.pro_plan_id,
                14,
                now.minus_days(14),
            );
            let trial_end = now.plus_days(days_left);
            sub.trial_ends_at = Some(trial_end);
            sub.current_period_end = trial_end;
            subscriptions.seed(sub);
        }

        Self {
            fixture,
            tenants,
            catalog,
            subscriptions,
            memberships,
            deliveries: Arc::new(InMemoryDeliveryLog::new()),
            dispatcher: Arc::new(RecordingDispatcher::new()),
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
