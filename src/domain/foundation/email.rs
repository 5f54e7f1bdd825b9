//! Email address value object with case-insensitive identity.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Email address, stored lowercased so equality is case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates an EmailAddress, normalizing to lowercase.
    ///
    /// Validation is intentionally shallow (single `@`, non-empty parts);
    /// deliverability is the identity provider's concern.
    pub fn new(email: impl Into<String>) -> Result<Self, ValidationError> {
        let email = email.into().trim().to_lowercase();
        if email.is_empty() {
            return Err(ValidationError::empty_field("email"));
        }
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && domain.contains('.') => {
                Ok(Self(email))
            }
            _ => Err(ValidationError::invalid_format(
                "email",
                "expected local@domain form",
            )),
        }
    }

    /// Returns the normalized address.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EmailAddress> for String {
    fn from(email: EmailAddress) -> Self {
        email.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_ignores_case() {
        let a = EmailAddress::new("Owner@Example.COM").unwrap();
        let b = EmailAddress::new("owner@example.com").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "owner@example.com");
    }

    #[test]
    fn rejects_obviously_invalid_addresses() {
        assert!(EmailAddress::new("").is_err());
        assert!(EmailAddress::new("no-at-sign").is_err());
        assert!(EmailAddress::new("@example.com").is_err());
        assert!(EmailAddress::new("user@nodot").is_err());
    }
}
