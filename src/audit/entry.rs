//! Audit entry types.
//!
//! Defines the structure of audit log entries for authentication
//! attempts.

use serde::Serialize;
use uuid::Uuid;

/// A single audit log entry.
///
/// Records one authentication attempt: who claimed to be authenticating,
/// what the outcome was, and how long verification took. The entry never
/// contains the digest, the nonce, or the stored secret.
#[derive(Debug, Clone, Serialize)]
pub struct AuditEntry {
    /// ISO 8601 timestamp when the attempt was processed.
    pub timestamp: String,
    /// Unique identifier for the attempt.
    pub attempt_id: Uuid,
    /// Claimed username (sanitized), if the scheme carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Outcome of the attempt.
    pub outcome: AuditOutcome,
    /// Verification duration in milliseconds.
    pub duration_ms: u64,
}

impl AuditEntry {
    /// Create an entry for a successful authentication.
    pub fn success(
        timestamp: String,
        username: Option<String>,
        roles: Vec<String>,
        duration_ms: u64,
    ) -> Self {
        Self {
            timestamp,
            attempt_id: Uuid::new_v4(),
            username,
            outcome: AuditOutcome::Success { roles },
            duration_ms,
        }
    }

    /// Create an entry for a failed authentication.
    ///
    /// `failure_kind` is the stable code of the internal failure (e.g.
    /// `REPLAY_DETECTED`); replay events stay distinguishable in the
    /// trail even though callers only see "authentication failed".
    pub fn failure(
        timestamp: String,
        username: Option<String>,
        failure_kind: String,
        duration_ms: u64,
    ) -> Self {
        Self {
            timestamp,
            attempt_id: Uuid::new_v4(),
            username,
            outcome: AuditOutcome::Failure { failure_kind },
            duration_ms,
        }
    }
}

/// Outcome of an authentication attempt for audit purposes.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status")]
pub enum AuditOutcome {
    /// Verification succeeded.
    #[serde(rename = "success")]
    Success {
        /// Roles granted to the authenticated principal.
        roles: Vec<String>,
    },
    /// Verification failed.
    #[serde(rename = "failure")]
    Failure {
        /// Stable code of the internal failure kind.
        failure_kind: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_entry_serialization() {
        let entry = AuditEntry::success(
            "2024-01-01T00:00:00.000Z".to_string(),
            Some("alice".to_string()),
            vec!["ROLE_USER".to_string()],
            3,
        );

        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"status\":\"success\""));
        assert!(json.contains("\"username\":\"alice\""));
        assert!(json.contains("\"roles\":[\"ROLE_USER\"]"));
        assert!(json.contains("\"duration_ms\":3"));
    }

    #[test]
    fn test_failure_entry_serialization() {
        let entry = AuditEntry::failure(
            "2024-01-01T00:00:00.000Z".to_string(),
            Some("alice".to_string()),
            "REPLAY_DETECTED".to_string(),
            1,
        );

        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"status\":\"failure\""));
        assert!(json.contains("\"failure_kind\":\"REPLAY_DETECTED\""));
    }

    #[test]
    fn test_anonymous_entry_omits_username() {
        let entry = AuditEntry::failure(
            "2024-01-01T00:00:00.000Z".to_string(),
            None,
            "UNKNOWN_PRINCIPAL".to_string(),
            0,
        );

        let json = serde_json::to_string(&entry).unwrap();
        assert!(!json.contains("\"username\""));
    }
}
