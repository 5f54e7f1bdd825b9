//! User entity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{EmailAddress, Timestamp, UserId};

/// A platform user. Authentication itself lives upstream; this engine only
/// needs identity, email, and membership roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: EmailAddress,
    pub name: String,
    pub created_at: Timestamp,
}
