//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Checks if this timestamp is before another.
    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }

    /// Checks if this timestamp is after another.
    pub fn is_after(&self, other: &Timestamp) -> bool {
        self.0 > other.0
    }

    /// Creates a new timestamp by adding the specified number of seconds.
    pub fn plus_secs(&self, secs: i64) -> Self {
        Self(self.0 + Duration::seconds(secs))
    }

    /// Creates a new timestamp by adding the specified number of days.
    ///
    /// Negative values subtract days.
    pub fn plus_days(&self, days: i64) -> Self {
        Self(self.0 + Duration::days(days))
    }

    /// Creates a new timestamp by subtracting the specified number of days.
    pub fn minus_days(&self, days: i64) -> Self {
        Self(self.0 - Duration::days(days))
    }

    /// Creates a new timestamp by adding the specified number of months.
    ///
    /// Note: Uses 30 days per month approximation.
    pub fn plus_months(&self, months: i64) -> Self {
        Self(self.0 + Duration::days(months * 30))
    }

    /// Returns the number of whole seconds from this timestamp until another.
    ///
    /// Negative if `other` is in this timestamp's past.
    pub fn secs_until(&self, other: &Timestamp) -> i64 {
        other.0.signed_duration_since(self.0).num_seconds()
    }

    /// Creates a timestamp from Unix seconds.
    ///
    /// Out-of-range values clamp to the Unix epoch.
    pub fn from_unix_secs(secs: i64) -> Self {
        Self(
            Utc.timestamp_opt(secs, 0)
                .single()
                .unwrap_or_else(|| Utc.timestamp_opt(0, 0).unwrap()),
        )
    }

    /// Returns the timestamp as Unix seconds.
    pub fn as_unix_secs(&self) -> i64 {
        self.0.timestamp()
    }

    /// Returns an RFC 3339 rendering, used for API payloads.
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_follows_the_clock() {
        let earlier = Timestamp::now();
        let later = earlier.plus_days(1);
        assert!(earlier.is_before(&later));
        assert!(later.is_after(&earlier));
    }

    #[test]
    fn plus_and_minus_days_are_inverse() {
        let t = Timestamp::now();
        assert_eq!(t.plus_days(7).minus_days(7), t);
    }

    #[test]
    fn unix_secs_roundtrip() {
        let t = Timestamp::from_unix_secs(1_700_000_000);
        assert_eq!(t.as_unix_secs(), 1_700_000_000);
    }

    #[test]
    fn secs_until_is_signed() {
        let t = Timestamp::now();
        let later = t.plus_secs(300);
        assert_eq!(t.secs_until(&later), 300);
        assert_eq!(later.secs_until(&t), -300);
    }
}
