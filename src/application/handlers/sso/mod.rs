//! SSO command handlers: token issuance and verification.

mod authenticate_token;
mod issue_token;

pub use authenticate_token::{
    AuthenticateTokenCommand, AuthenticateTokenHandler, AuthenticatedSession,
};
pub use issue_token::{IssueTokenCommand, IssueTokenHandler, IssuedToken};
