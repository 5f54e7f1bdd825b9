//! IssueTokenHandler - mints SSO tokens for downstream services.

use std::sync::Arc;

use crate::application::handlers::entitlement::{
    ResolveEntitlementHandler, ResolveEntitlementQuery,
};
use crate::domain::entitlement::EntitlementStatus;
use crate::domain::foundation::{ActivityId, ServiceCode, Timestamp, UserId};
use crate::domain::sso::{OrgSnapshot, SsoError, SsoTokenIssuer};
use crate::ports::{CatalogReader, MembershipReader, TenantReader};

/// Command to issue an SSO token.
#[derive(Debug, Clone)]
pub struct IssueTokenCommand {
    pub user_id: UserId,
    pub activity_id: ActivityId,
    pub service_code: ServiceCode,
}

/// A freshly minted token plus where to send the browser.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub redirect_url: String,
    pub expires_at: Timestamp,
}

/// Handler for SSO token issuance.
///
/// Issuance is stateless: the membership check and entitlement resolution
/// happen here, the nonce is only enforced at verification time. Tokens are
/// refused only when the entitlement status is `None`; an expired license
/// still gets a token whose payload reports `isValid = false`, letting the
/// downstream service drive its own renewal UX.
pub struct IssueTokenHandler {
    tenants: Arc<dyn TenantReader>,
    memberships: Arc<dyn MembershipReader>,
    catalog: Arc<dyn CatalogReader>,
    resolver: ResolveEntitlementHandler,
    issuer: Arc<SsoTokenIssuer>,
}

impl IssueTokenHandler {
    pub fn new(
        tenants: Arc<dyn TenantReader>,
        memberships: Arc<dyn MembershipReader>,
        catalog: Arc<dyn CatalogReader>,
        resolver: ResolveEntitlementHandler,
        issuer: Arc<SsoTokenIssuer>,
    ) -> Self {
        Self {
            tenants,
            memberships,
            catalog,
            resolver,
            issuer,
        }
    }

    pub async fn handle(&self, cmd: IssueTokenCommand) -> Result<IssuedToken, SsoError> {
        let activity = self
            .tenants
            .get_activity(&cmd.activity_id)
            .await?
            .ok_or(SsoError::ActivityNotFound(cmd.activity_id))?;

        // Membership: a direct activity role, or failing that a role on the
        // owning organization.
        let role = match self
            .memberships
            .activity_role(&cmd.user_id, &activity.id)
            .await?
        {
            Some(role) => role.to_string(),
            None => match activity.organization_id {
                Some(org_id) => self
                    .memberships
                    .organization_role(&cmd.user_id, &org_id)
                    .await?
                    .map(|r| r.to_string())
                    .ok_or(SsoError::Forbidden)?,
                None => return Err(SsoError::Forbidden),
            },
        };

        let service = self
            .catalog
            .get_service_by_code(&cmd.service_code)
            .await?
            .filter(|s| s.active)
            .ok_or_else(|| SsoError::ServiceNotFound(cmd.service_code.clone()))?;

        let entitlement = self
            .resolver
            .handle(ResolveEntitlementQuery {
                activity_id: activity.id,
                service_code: cmd.service_code.clone(),
            })
            .await?;

        if entitlement.status == EntitlementStatus::None {
            return Err(SsoError::NoEntitlement(cmd.service_code));
        }

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

        let (token, expires_at) = self.issuer.mint(
            cmd.user_id,
            activity.id,
            cmd.service_code,
            role,
            org,
            &entitlement,
            Timestamp::now(),
        )?;

        Ok(IssuedToken {
            redirect_url: service.sso_redirect_url(&token),
            token,
            expires_at,
        })
    }
}
