//! Authentication session records.
//!
//! A session is an ephemeral `{timestamp, hash}` record written to the
//! short-lived store on successful authentication. A record older than
//! the session duration is treated as absent; cleanup happens lazily on
//! the next authentication query, not via a background timer.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use keepsake_common::{Error, Result};

/// Storage key for the session record in the short-lived store.
pub const SESSION_KEY: &str = "memory_book_session";

/// Session lifetime: 30 minutes, in milliseconds.
pub const SESSION_DURATION_MS: i64 = 30 * 60 * 1000;

/// Ephemeral record of a successful authentication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Creation time, milliseconds since the Unix epoch.
    pub timestamp: i64,
    /// The verified password hash the session was opened with.
    pub hash: String,
}

impl SessionRecord {
    /// Create a record stamped with the current time.
    pub fn new(hash: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now().timestamp_millis(),
            hash: hash.into(),
        }
    }

    /// Create a record with an explicit timestamp.
    pub fn with_timestamp(timestamp: i64, hash: impl Into<String>) -> Self {
        Self {
            timestamp,
            hash: hash.into(),
        }
    }

    /// Whether the record had already expired at `now_ms`.
    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        now_ms.saturating_sub(self.timestamp) > SESSION_DURATION_MS
    }

    /// Whether the record has expired as of the current time.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now().timestamp_millis())
    }

    /// Serialize for the short-lived store.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Deserialize from the short-lived store.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_record_not_expired() {
        let record = SessionRecord::new("hash");
        assert!(!record.is_expired());
    }

    #[test]
    fn test_old_record_expired() {
        let now = Utc::now().timestamp_millis();
        let record = SessionRecord::with_timestamp(now - SESSION_DURATION_MS - 1, "hash");
        assert!(record.is_expired());
    }

    #[test]
    fn test_expiry_boundary() {
        let record = SessionRecord::with_timestamp(0, "hash");
        // Exactly at the limit is still valid; one past is not
        assert!(!record.is_expired_at(SESSION_DURATION_MS));
        assert!(record.is_expired_at(SESSION_DURATION_MS + 1));
    }

    #[test]
    fn test_future_timestamp_not_expired() {
        let now = Utc::now().timestamp_millis();
        let record = SessionRecord::with_timestamp(now + 10_000, "hash");
        assert!(!record.is_expired());
    }

    #[test]
    fn test_json_roundtrip() {
        let record = SessionRecord::with_timestamp(1_700_000_000_000, "abc123=");

        let json = record.to_json().unwrap();
        assert!(json.contains("\"timestamp\""));
        assert!(json.contains("\"hash\""));

        let restored = SessionRecord::from_json(&json).unwrap();
        assert_eq!(restored, record);
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(SessionRecord::from_json("not json").is_err());
        assert!(SessionRecord::from_json("{}").is_err());
    }
}
