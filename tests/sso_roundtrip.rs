//! Integration tests for the SSO token round trip.
//!
//! These tests drive the full issue/authenticate flow through the public
//! handlers: the platform mints a token for a licensed activity member, the
//! downstream service presents it back, and the nonce store enforces single
//! use. Uses in-memory adapters so the flow runs without Postgres or Redis.

use std::sync::Arc;

use secrecy::SecretString;

use doid::adapters::memory::{
    InMemoryCatalogReader, InMemoryMembershipReader, InMemoryNonceStore,
    InMemorySubscriptionRepository, InMemoryTenantReader,
};
use doid::application::handlers::entitlement::ResolveEntitlementHandler;
use doid::application::handlers::sso::{
    AuthenticateTokenCommand, AuthenticateTokenHandler, IssueTokenCommand, IssueTokenHandler,
};
use doid::domain::catalog::{BillingCycle, Plan, PlanFeatures, Service, ServiceKind};
use doid::domain::entitlement::{Entitlement, EntitlementStatus};
use doid::domain::foundation::{
    ActivityId, EmailAddress, OrganizationId, PlanId, ServiceCode, ServiceId, Timestamp, UserId,
};
use doid::domain::sso::{SsoError, SsoTokenIssuer, SsoTokenVerifier};
use doid::domain::subscription::Subscription;
use doid::domain::tenant::{
    AccountType, Activity, ActivityRole, ActivityStatus, Organization, User,
};

const SSO_SECRET: &str = "integration-sso-secret-32-bytes!";
const TOKEN_TTL_SECS: i64 = 120;

// =============================================================================
// Test Infrastructure
// =============================================================================

/// One organization owning one activity, one owner user, and the
/// `smart_review` service with a `pro` plan. Subscriptions are seeded per
/// test.
struct World {
    tenants: Arc<InMemoryTenantReader>,
    memberships: Arc<InMemoryMembershipReader>,
    catalog: Arc<InMemoryCatalogReader>,
    subscriptions: Arc<InMemorySubscriptionRepository>,
    nonces: Arc<InMemoryNonceStore>,
    organization_id: OrganizationId,
    activity_id: ActivityId,
    user_id: UserId,
    service_id: ServiceId,
    pro_plan_id: PlanId,
}

impl World {
    fn new() -> Self {
        let now = Timestamp::now();
        let world = Self {
            tenants: Arc::new(InMemoryTenantReader::new()),
            memberships: Arc::new(InMemoryMembershipReader::new()),
            catalog: Arc::new(InMemoryCatalogReader::new()),
            subscriptions: Arc::new(InMemorySubscriptionRepository::new()),
            nonces: Arc::new(InMemoryNonceStore::new()),
            organization_id: OrganizationId::new(),
            activity_id: ActivityId::new(),
            user_id: UserId::new(),
            service_id: ServiceId::new(),
            pro_plan_id: PlanId::new(),
        };

        world.tenants.insert_organization(Organization {
            id: world.organization_id,
            name: "Acme Group".to_string(),
            account_type: AccountType::Agency,
            max_activities: 10,
            created_at: now,
        });
        world.tenants.insert_activity(Activity {
            id: world.activity_id,
            organization_id: Some(world.organization_id),
            name: "Acme Downtown".to_string(),
            status: ActivityStatus::Active,
            created_at: now,
        });
        world.tenants.insert_user(User {
            id: world.user_id,
            email: EmailAddress::new("owner@acme.example").unwrap(),
            name: "Acme Owner".to_string(),
            created_at: now,
        });
        world.memberships.grant_activity_role(
            world.user_id,
            world.activity_id,
            ActivityRole::Owner,
        );

        world.catalog.insert_service(Service {
            id: world.service_id,
            code: smart_review(),
            name: "Smart Review".to_string(),
            base_app_url: "https://review.example.com".to_string(),
            kind: ServiceKind::App,
            active: true,
        });
        world.catalog.insert_plan(Plan {
            id: world.pro_plan_id,
            service_id: world.service_id,
            code: "pro".to_string(),
            name: "Pro".to_string(),
            price_monthly_cents: 2900,
            price_yearly_cents: 29000,
            trial_days: 14,
            features: PlanFeatures::default(),
        });

        world
    }

    /// Direct paid subscription started `days_ago` days back, monthly cycle.
    /// Anything older than a month is therefore already lapsed.
    fn seed_paid_subscription(&self, days_ago: i64) {
        self.subscriptions.seed(Subscription::start_paid(
            self.activity_id,
            Some(self.organization_id),
            self.service_id,
            self.pro_plan_id,
            BillingCycle::Monthly,
            Timestamp::now().minus_days(days_ago),
        ));
    }

    fn resolver(&self) -> ResolveEntitlementHandler {
        ResolveEntitlementHandler::new(
            self.tenants.clone(),
            self.catalog.clone(),
            self.subscriptions.clone(),
        )
    }

    fn issue_handler(&self) -> IssueTokenHandler {
        IssueTokenHandler::new(
            self.tenants.clone(),
            self.memberships.clone(),
            self.catalog.clone(),
            self.resolver(),
            Arc::new(SsoTokenIssuer::new(
                &SecretString::new(SSO_SECRET.to_string()),
                TOKEN_TTL_SECS,
            )),
        )
    }

    fn authenticate_handler(&self) -> AuthenticateTokenHandler {
        AuthenticateTokenHandler::new(
            Arc::new(SsoTokenVerifier::new(&SecretString::new(
                SSO_SECRET.to_string(),
            ))),
            self.nonces.clone(),
            self.tenants.clone(),
            self.resolver(),
        )
    }

    async fn issue(&self) -> String {
        self.issue_handler()
            .handle(IssueTokenCommand {
                user_id: self.user_id,
                activity_id: self.activity_id,
                service_code: smart_review(),
            })
            .await
            .unwrap()
            .token
    }
}

fn smart_review() -> ServiceCode {
    ServiceCode::new("smart_review").unwrap()
}

fn present(token: String) -> AuthenticateTokenCommand {
    AuthenticateTokenCommand {
        token,
        presented_by: smart_review(),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn issued_token_authenticates_exactly_once() {
    let world = World::new();
    world.seed_paid_subscription(1);

    let issued = world
        .issue_handler()
        .handle(IssueTokenCommand {
            user_id: world.user_id,
            activity_id: world.activity_id,
            service_code: smart_review(),
        })
        .await
        .unwrap();
    assert!(issued
        .redirect_url
        .starts_with("https://review.example.com/sso?token="));
    assert!(issued.expires_at.is_after(&Timestamp::now()));

    let handler = world.authenticate_handler();
    let session = handler.handle(present(issued.token.clone())).await.unwrap();
    assert_eq!(session.user.id, world.user_id);
    assert_eq!(session.activity.id, world.activity_id);
    assert_eq!(session.role, "owner");
    assert_eq!(session.entitlement.status, EntitlementStatus::Active);
    assert_eq!(session.entitlement.plan_code.as_deref(), Some("pro"));
    assert!(session.entitlement.is_valid());
    assert_eq!(
        session.org.as_ref().map(|o| o.name.as_str()),
        Some("Acme Group")
    );

    // Same token again is a replay regardless of remaining lifetime.
    let replay = handler.handle(present(issued.token)).await;
    assert!(matches!(replay, Err(SsoError::TokenReplayed)));
}

#[tokio::test]
async fn misdirected_token_stays_usable_by_the_intended_service() {
    let world = World::new();
    world.seed_paid_subscription(1);
    world.catalog.insert_service(Service {
        id: ServiceId::new(),
        code: ServiceCode::new("smart_booking").unwrap(),
        name: "Smart Booking".to_string(),
        base_app_url: "https://booking.example.com".to_string(),
        kind: ServiceKind::App,
        active: true,
    });

    let token = world.issue().await;
    let handler = world.authenticate_handler();

    let misdirected = handler
        .handle(AuthenticateTokenCommand {
            token: token.clone(),
            presented_by: ServiceCode::new("smart_booking").unwrap(),
        })
        .await;
    assert!(matches!(misdirected, Err(SsoError::ServiceMismatch { .. })));

    // The mismatch is detected before the nonce is consumed.
    assert!(handler.handle(present(token)).await.is_ok());
}

#[tokio::test]
async fn expired_token_is_rejected_downstream() {
    let world = World::new();
    world.seed_paid_subscription(1);

    let issuer = SsoTokenIssuer::new(&SecretString::new(SSO_SECRET.to_string()), TOKEN_TTL_SECS);
    let entitlement = Entitlement::none(world.activity_id, smart_review());
    let (token, _) = issuer
        .mint(
            world.user_id,
            world.activity_id,
            smart_review(),
            "owner".to_string(),
            None,
            &entitlement,
            Timestamp::now().minus_days(1),
        )
        .unwrap();

    let result = world.authenticate_handler().handle(present(token)).await;
    assert!(matches!(result, Err(SsoError::TokenExpired)));
}

#[tokio::test]
async fn unlicensed_activity_is_refused_a_token() {
    let world = World::new();

    let result = world
        .issue_handler()
        .handle(IssueTokenCommand {
            user_id: world.user_id,
            activity_id: world.activity_id,
            service_code: smart_review(),
        })
        .await;
    assert!(matches!(result, Err(SsoError::NoEntitlement(_))));
}

#[tokio::test]
async fn lapsed_license_round_trips_but_reports_invalid() {
    let world = World::new();
    world.seed_paid_subscription(60);

    // Issuance goes through so the downstream service can run renewal UX.
    let token = world.issue().await;
    let session = world
        .authenticate_handler()
        .handle(present(token))
        .await
        .unwrap();
    assert_eq!(session.entitlement.status, EntitlementStatus::Expired);
    assert!(!session.entitlement.is_valid());
}
