//! JSON request/response shapes for the SSO endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::sso::{AuthenticatedSession, IssuedToken};
use crate::domain::entitlement::EntitlementStatus;
use crate::domain::foundation::ServiceCode;

/// Request to mint an SSO token for the caller's activity.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueTokenRequest {
    pub service_code: String,
}

/// A freshly minted token and where to send the browser.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueTokenResponse {
    pub token: String,
    pub redirect_url: String,
    pub expires_at: String,
}

impl From<IssuedToken> for IssueTokenResponse {
    fn from(issued: IssuedToken) -> Self {
        Self {
            token: issued.token,
            redirect_url: issued.redirect_url,
            expires_at: issued.expires_at.to_rfc3339(),
        }
    }
}

/// Request from a downstream service presenting a token.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthenticateRequest {
    pub token: String,
    /// The presenting service, from its authenticated channel.
    pub service: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: String,
    pub email: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationDto {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityDto {
    pub id: String,
    pub name: String,
}

/// Where the license comes from.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionOriginDto {
    pub inherited: bool,
    pub package_name: Option<String>,
}

/// The re-resolved license, not the snapshot frozen in the token.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseDto {
    pub is_valid: bool,
    pub status: EntitlementStatus,
    pub plan_code: Option<String>,
    pub expires_at: Option<String>,
    pub subscription: SubscriptionOriginDto,
}

/// Session payload returned to the downstream service.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticateResponse {
    pub user: UserDto,
    pub organization: Option<OrganizationDto>,
    pub activity: ActivityDto,
    pub license: LicenseDto,
    pub role: String,
    pub service: ServiceCode,
    pub authenticated_at: String,
}

impl From<AuthenticatedSession> for AuthenticateResponse {
    fn from(session: AuthenticatedSession) -> Self {
        let entitlement = session.entitlement;
        Self {
            user: UserDto {
                id: session.user.id.to_string(),
                email: session.user.email.to_string(),
                name: session.user.name,
            },
            organization: session.org.map(|o| OrganizationDto {
                id: o.id.to_string(),
                name: o.name,
            }),
            activity: ActivityDto {
                id: session.activity.id.to_string(),
                name: session.activity.name,
            },
            license: LicenseDto {
                is_valid: entitlement.is_valid(),
                status: entitlement.status,
                plan_code: entitlement.plan_code,
                expires_at: entitlement.expires_at.map(|t| t.to_rfc3339()),
                subscription: SubscriptionOriginDto {
                    inherited: entitlement.inherited,
                    package_name: entitlement.package_name,
                },
            },
            role: session.role,
            service: entitlement.service_code,
            authenticated_at: session.authenticated_at.to_rfc3339(),
        }
    }
}
