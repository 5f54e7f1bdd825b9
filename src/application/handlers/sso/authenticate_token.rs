//! AuthenticateTokenHandler - verifies SSO tokens presented by services.

use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use crate::application::handlers::entitlement::{
    ResolveEntitlementHandler, ResolveEntitlementQuery,
};
use crate::domain::entitlement::Entitlement;
use crate::domain::foundation::{ServiceCode, Timestamp};
use crate::domain::sso::{OrgSnapshot, SsoError, SsoTokenVerifier};
use crate::domain::tenant::{Activity, User};
use crate::ports::{NonceStore, TenantReader};

/// Command to authenticate a token presented by a downstream service.
#[derive(Debug, Clone)]
pub struct AuthenticateTokenCommand {
    pub token: String,
    /// The service presenting the token, taken from its authenticated
    /// channel, never from the token itself.
    pub presented_by: ServiceCode,
}

/// The session established for a verified token.
///
/// The entitlement here is re-resolved at verification time; the license
/// snapshot inside the token is never trusted for authorization.
#[derive(Debug, Clone)]
pub struct AuthenticatedSession {
    pub user: User,
    pub activity: Activity,
    pub org: Option<OrgSnapshot>,
    pub role: String,
    pub entitlement: Entitlement,
    pub authenticated_at: Timestamp,
}

/// Handler for token verification on the service-to-service path.
///
/// Check order is fixed: signature and expiry, then service match, then
/// nonce consumption, then entitlement re-resolution. The nonce marker is
/// only written once everything cheaper has passed, so a forged or
/// misdirected token never burns a legitimate one.
pub struct AuthenticateTokenHandler {
    verifier: Arc<SsoTokenVerifier>,
    nonces: Arc<dyn NonceStore>,
    tenants: Arc<dyn TenantReader>,
    resolver: ResolveEntitlementHandler,
}

impl AuthenticateTokenHandler {
    pub fn new(
        verifier: Arc<SsoTokenVerifier>,
        nonces: Arc<dyn NonceStore>,
        tenants: Arc<dyn TenantReader>,
        resolver: ResolveEntitlementHandler,
    ) -> Self {
        Self {
            verifier,
            nonces,
            tenants,
            resolver,
        }
    }

    pub async fn handle(
        &self,
        cmd: AuthenticateTokenCommand,
    ) -> Result<AuthenticatedSession, SsoError> {
        match self.authenticate(cmd).await {
            Ok(session) => Ok(session),
            Err(err) => {
                if err.is_security_signal() {
                    warn!(code = err.code(), "SSO token rejected");
                }
                Err(err)
            }
        }
    }

    async fn authenticate(
        &self,
        cmd: AuthenticateTokenCommand,
    ) -> Result<AuthenticatedSession, SsoError> {
        let claims = self.verifier.verify(&cmd.token)?;

        if claims.svc != cmd.presented_by {
            return Err(SsoError::ServiceMismatch {
                expected: claims.svc,
                presented: cmd.presented_by,
            });
        }

        // Marker only needs to outlive the token itself.
        let now = Timestamp::now();
        let ttl_secs = now.secs_until(&Timestamp::from_unix_secs(claims.exp)).max(1);
        let first_use = self
            .nonces
            .consume(&claims.jti.to_string(), Duration::from_secs(ttl_secs as u64))
            .await?;
        if !first_use {
            return Err(SsoError::TokenReplayed);
        }

        let user = self
            .tenants
            .get_user(&claims.sub)
            .await?
            .ok_or(SsoError::UserNotFound(claims.sub))?;
        let activity = self
            .tenants
            .get_activity(&claims.activity_id)
            .await?
            .ok_or(SsoError::ActivityNotFound(claims.activity_id))?;

        // Fresh org name, not the snapshot frozen at issuance.
        let org = match activity.organization_id {
            Some(org_id) => self
                .tenants
                .get_organization(&org_id)
                .await?
                .map(|o| OrgSnapshot {
                    id: o.id,
                    name: o.name,
                }),
            None => None,
        };

        let entitlement = self
            .resolver
            .handle(ResolveEntitlementQuery {
                activity_id: activity.id,
                service_code: claims.svc,
            })
            .await?;

        Ok(AuthenticatedSession {
            user,
            activity,
            org,
            role: claims.role,
            entitlement,
            authenticated_at: now,
        })
    }
}
