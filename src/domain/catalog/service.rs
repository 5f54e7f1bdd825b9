//! Service catalog entry.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ServiceCode, ServiceId};

/// What kind of product a catalog entry is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceKind {
    /// A downstream application activities subscribe to directly
    /// (e.g. `smart_review`, `page_builder`).
    App,

    /// An organization-level package whose plans grant covered app services
    /// to every activity the organization owns.
    Package,
}

/// A service in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    /// Catalog identifier.
    pub id: ServiceId,

    /// Unique slug, the stable cross-system name of the service.
    pub code: ServiceCode,

    /// Human-readable display name.
    pub name: String,

    /// Base URL of the downstream application; SSO redirect URLs are
    /// assembled from it. Empty for package services.
    pub base_app_url: String,

    /// App or package.
    pub kind: ServiceKind,

    /// Inactive services resolve as not found.
    pub active: bool,
}

impl Service {
    /// Builds the SSO redirect URL for a freshly minted token.
    pub fn sso_redirect_url(&self, token: &str) -> String {
        format!("{}/sso?token={}", self.base_app_url.trim_end_matches('/'), token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redirect_url_strips_trailing_slash() {
        let service = Service {
            id: ServiceId::new(),
            code: ServiceCode::new("smart_review").unwrap(),
            name: "Smart Review".to_string(),
            base_app_url: "https://review.example.com/".to_string(),
            kind: ServiceKind::App,
            active: true,
        };
        assert_eq!(
            service.sso_redirect_url("abc"),
            "https://review.example.com/sso?token=abc"
        );
    }
}
