//! Integration tests for the signed webhook delivery pipeline.
//!
//! Wires the real dispatcher/worker pair into the subscription command
//! handlers and verifies the contract end to end: commands commit even when
//! the downstream endpoint is unreachable, every dispatched event ends in
//! exactly one audit record, and the HMAC signature verifies over the exact
//! bytes the downstream service received.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use secrecy::SecretString;
use tokio::sync::watch;

use doid::adapters::memory::{
    InMemoryCatalogReader, InMemoryDeliveryLog, InMemoryMembershipReader,
    InMemorySubscriptionRepository, InMemoryTenantReader,
};
use doid::adapters::webhook::{delivery_pipeline, DeliveryWorker};
use doid::application::handlers::subscription::{
    CancelSubscriptionCommand, CancelSubscriptionHandler, ChangePlanCommand, ChangePlanHandler,
    CommandSupport,
};
use doid::domain::catalog::{BillingCycle, Plan, PlanFeatures, Service, ServiceKind};
use doid::domain::foundation::{
    ActivityId, EmailAddress, OrganizationId, PlanId, ServiceCode, ServiceId, Timestamp, UserId,
};
use doid::domain::subscription::SubscriptionStatus;
use doid::domain::tenant::{
    AccountType, Activity, ActivityRole, ActivityStatus, Organization, User,
};
use doid::domain::webhook::{DeliveryOutcome, LicenseAction, RetryPolicy, WebhookSigner};
use doid::ports::{TransportResponse, WebhookHeaders, WebhookTransport};

const WEBHOOK_SECRET: &str = "integration-webhook-secret-32-b!";
const ENDPOINT: &str = "https://review.example.com/webhooks/license";

// =============================================================================
// Test Infrastructure
// =============================================================================

/// Transport scripted with a fixed sequence of responses; once the script
/// runs out every attempt fails as a connection error.
struct ScriptedTransport {
    responses: Mutex<Vec<Result<TransportResponse, String>>>,
    seen: Mutex<Vec<(String, WebhookHeaders, Vec<u8>)>>,
}

impl ScriptedTransport {
    fn new(responses: Vec<Result<TransportResponse, String>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            seen: Mutex::new(Vec::new()),
        }
    }

    fn ok(count: usize) -> Self {
        Self::new(
            (0..count)
                .map(|_| {
                    Ok(TransportResponse {
                        status: 200,
                        body: "ok".to_string(),
                    })
                })
                .collect(),
        )
    }

    fn requests(&self) -> Vec<(String, WebhookHeaders, Vec<u8>)> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl WebhookTransport for ScriptedTransport {
    async fn post(
        &self,
        url: &str,
        headers: &WebhookHeaders,
        body: &[u8],
        _timeout: Duration,
    ) -> Result<TransportResponse, String> {
        self.seen
            .lock()
            .unwrap()
            .push((url.to_string(), headers.clone(), body.to_vec()));
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Err("connection refused".to_string())
        } else {
            responses.remove(0)
        }
    }

    async fn health_check(&self, _url: &str, _timeout: Duration) -> Result<u16, String> {
        Ok(200)
    }
}

/// The tenant/catalog fixture plus the real delivery pipeline wired into
/// `CommandSupport`.
struct World {
    subscriptions: Arc<InMemorySubscriptionRepository>,
    log: Arc<InMemoryDeliveryLog>,
    support: CommandSupport,
    worker: DeliveryWorker,
    shutdown: watch::Sender<bool>,
    activity_id: ActivityId,
    user_id: UserId,
}

impl World {
    fn new(transport: Arc<ScriptedTransport>) -> Self {
        let now = Timestamp::now();
        let tenants = Arc::new(InMemoryTenantReader::new());
        let memberships = Arc::new(InMemoryMembershipReader::new());
        let catalog = Arc::new(InMemoryCatalogReader::new());
        let subscriptions = Arc::new(InMemorySubscriptionRepository::new());
        let log = Arc::new(InMemoryDeliveryLog::new());

        let organization_id = OrganizationId::new();
        let activity_id = ActivityId::new();
        let user_id = UserId::new();
        let service_id = ServiceId::new();

        tenants.insert_organization(Organization {
            id: organization_id,
            name: "Acme Group".to_string(),
            account_type: AccountType::Agency,
            max_activities: 10,
            created_at: now,
        });
        tenants.insert_activity(Activity {
            id: activity_id,
            organization_id: Some(organization_id),
            name: "Acme Downtown".to_string(),
            status: ActivityStatus::Active,
            created_at: now,
        });
        tenants.insert_user(User {
            id: user_id,
            email: EmailAddress::new("owner@acme.example").unwrap(),
            name: "Acme Owner".to_string(),
            created_at: now,
        });
        memberships.grant_activity_role(user_id, activity_id, ActivityRole::Owner);

        catalog.insert_service(Service {
            id: service_id,
            code: smart_review(),
            name: "Smart Review".to_string(),
            base_app_url: "https://review.example.com".to_string(),
            kind: ServiceKind::App,
            active: true,
        });
        catalog.insert_plan(Plan {
            id: PlanId::new(),
            service_id,
            code: "pro".to_string(),
            name: "Pro".to_string(),
            price_monthly_cents: 2900,
            price_yearly_cents: 29000,
            trial_days: 14,
            features: PlanFeatures::default(),
        });

        let mut endpoints = HashMap::new();
        endpoints.insert(smart_review(), ENDPOINT.to_string());
        let (shutdown, shutdown_rx) = watch::channel(false);
        let (dispatcher, worker) = delivery_pipeline(
            WebhookSigner::new(SecretString::new(WEBHOOK_SECRET.to_string())),
            endpoints,
            transport,
            log.clone(),
            RetryPolicy::new(3, Duration::from_millis(1)),
            Duration::from_secs(5),
            "doid".to_string(),
            shutdown_rx,
        );

        let support = CommandSupport::new(
            tenants,
            memberships,
            catalog,
            subscriptions.clone(),
            Arc::new(dispatcher),
        );

        Self {
            subscriptions,
            log,
            support,
            worker,
            shutdown,
            activity_id,
            user_id,
        }
    }

    async fn purchase_pro(&self) {
        ChangePlanHandler::new(self.support.clone())
            .handle(ChangePlanCommand {
                user_id: self.user_id,
                activity_id: self.activity_id,
                service_code: smart_review(),
                plan_code: "pro".to_string(),
                billing_cycle: BillingCycle::Monthly,
            })
            .await
            .unwrap();
    }

    /// Signals shutdown and lets the worker drain whatever was queued.
    async fn drain(self) -> Arc<InMemoryDeliveryLog> {
        self.shutdown.send(true).unwrap();
        self.worker.run().await;
        self.log
    }
}

fn smart_review() -> ServiceCode {
    ServiceCode::new("smart_review").unwrap()
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn command_commits_even_when_the_endpoint_is_unreachable() {
    let transport = Arc::new(ScriptedTransport::new(vec![])); // always errors
    let world = World::new(transport.clone());

    world.purchase_pro().await;

    // The subscription is committed before delivery is even attempted.
    let subs = world.subscriptions.all();
    assert_eq!(subs.len(), 1);
    assert_eq!(subs[0].status, SubscriptionStatus::Active);

    let log = world.drain().await;
    let records = log.all();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].outcome, DeliveryOutcome::Failed);
    assert_eq!(records[0].attempt_count, 3);
    assert_eq!(transport.requests().len(), 3);
}

#[tokio::test]
async fn delivered_payload_carries_a_verifiable_signature() {
    let transport = Arc::new(ScriptedTransport::ok(1));
    let world = World::new(transport.clone());

    world.purchase_pro().await;
    let log = world.drain().await;

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    let (url, headers, body) = &requests[0];
    assert_eq!(url, ENDPOINT);
    assert_eq!(headers.event, "license.updated");
    assert_eq!(headers.source, "doid");

    // The signature verifies over the exact bytes that went on the wire.
    let signer = WebhookSigner::new(SecretString::new(WEBHOOK_SECRET.to_string()));
    assert!(signer.verify(body, &headers.signature));

    let payload: serde_json::Value = serde_json::from_slice(body).unwrap();
    assert_eq!(payload["event"], "license.updated");
    assert_eq!(payload["action"], "activated");
    assert_eq!(payload["service"], "smart_review");
    assert_eq!(payload["license"]["planCode"], "pro");

    // The audit record holds the same bytes and signature.
    let records = log.all();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].payload.as_bytes(), body.as_slice());
    assert_eq!(records[0].signature, headers.signature);
    assert_eq!(records[0].http_status, Some(200));
}

#[tokio::test]
async fn successive_commands_produce_ordered_audit_records() {
    let transport = Arc::new(ScriptedTransport::ok(2));
    let world = World::new(transport.clone());

    world.purchase_pro().await;
    CancelSubscriptionHandler::new(world.support.clone())
        .handle(CancelSubscriptionCommand {
            user_id: world.user_id,
            activity_id: world.activity_id,
            service_code: smart_review(),
            immediate: true,
        })
        .await
        .unwrap();

    let log = world.drain().await;
    let records = log.all();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].action, LicenseAction::Activated);
    assert_eq!(records[1].action, LicenseAction::Cancelled);
    assert!(records
        .iter()
        .all(|r| r.outcome == DeliveryOutcome::Succeeded));
}
