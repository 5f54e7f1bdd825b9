//! Service code value object - validated slug identifying a service.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Unique slug identifying a service in the catalog (e.g. `smart_review`).
///
/// Lowercase ASCII letters, digits and underscores; must start with a letter.
/// Stored and compared in this canonical form so tokens, webhook payloads
/// and catalog rows always agree on the spelling.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ServiceCode(String);

impl ServiceCode {
    /// Creates a ServiceCode, validating the slug format.
    pub fn new(code: impl Into<String>) -> Result<Self, ValidationError> {
        let code = code.into();
        if code.is_empty() {
            return Err(ValidationError::empty_field("service_code"));
        }
        let mut chars = code.chars();
        let first = chars.next().unwrap_or('_');
        if !first.is_ascii_lowercase() {
            return Err(ValidationError::invalid_format(
                "service_code",
                "must start with a lowercase letter",
            ));
        }
        if !code
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        {
            return Err(ValidationError::invalid_format(
                "service_code",
                "only lowercase letters, digits and underscores are allowed",
            ));
        }
        Ok(Self(code))
    }

    /// Returns the inner slug.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ServiceCode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ServiceCode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ServiceCode> for String {
    fn from(code: ServiceCode) -> Self {
        code.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_slugs() {
        assert!(ServiceCode::new("smart_review").is_ok());
        assert!(ServiceCode::new("page_builder2").is_ok());
    }

    #[test]
    fn rejects_empty_and_malformed_slugs() {
        assert!(ServiceCode::new("").is_err());
        assert!(ServiceCode::new("Smart_Review").is_err());
        assert!(ServiceCode::new("2fast").is_err());
        assert!(ServiceCode::new("smart-review").is_err());
    }

    #[test]
    fn deserializes_with_validation() {
        let ok: Result<ServiceCode, _> = serde_json::from_str("\"smart_review\"");
        assert!(ok.is_ok());
        let bad: Result<ServiceCode, _> = serde_json::from_str("\"Not A Slug\"");
        assert!(bad.is_err());
    }
}
