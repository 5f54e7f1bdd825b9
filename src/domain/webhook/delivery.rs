//! Webhook delivery log record.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DeliveryId, ServiceCode, Timestamp};

use super::LicenseAction;

/// Terminal outcome of a dispatch job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryOutcome {
    Succeeded,
    Failed,
}

/// Append-only audit record of one dispatch job.
///
/// Exactly one record is written per job, after the terminal outcome
/// (including all retries); never mutated afterwards. The raw payload is
/// kept so a failed delivery can be replayed byte-identically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryRecord {
    pub id: DeliveryId,

    /// Event type, `license.updated`.
    pub event_type: String,

    pub action: LicenseAction,
    pub service_code: ServiceCode,

    /// Destination the payload was POSTed to.
    pub target_url: String,

    /// Exact serialized payload bytes, as signed.
    pub payload: String,

    /// SHA-256 hex of the payload bytes.
    pub payload_hash: String,

    /// Hex HMAC-SHA256 sent in the signature header.
    pub signature: String,

    pub outcome: DeliveryOutcome,

    /// Final HTTP status, when a response was received at all.
    pub http_status: Option<u16>,

    /// Truncated response body for diagnosis.
    pub response_snippet: Option<String>,

    /// Attempts made before the terminal outcome.
    pub attempt_count: u32,

    pub created_at: Timestamp,
}

impl DeliveryRecord {
    /// Maximum characters retained from a response body.
    pub const SNIPPET_MAX_CHARS: usize = 256;

    /// Truncates a response body to the stored snippet size.
    pub fn snippet_of(body: &str) -> String {
        body.chars().take(Self::SNIPPET_MAX_CHARS).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snippet_truncates_long_bodies() {
        let long = "x".repeat(1000);
        assert_eq!(
            DeliveryRecord::snippet_of(&long).len(),
            DeliveryRecord::SNIPPET_MAX_CHARS
        );
        assert_eq!(DeliveryRecord::snippet_of("ok"), "ok");
    }
}
