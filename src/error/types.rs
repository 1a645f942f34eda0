//! Error types for WSSE verification.

use thiserror::Error;

/// Main error type for the verification engine.
#[derive(Error, Debug)]
pub enum GuardError {
    /// Configuration-related errors.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Authentication errors.
    #[error("Authentication error: {kind}")]
    Auth { kind: AuthErrorKind },

    /// I/O errors (audit log writing).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Authentication error kinds.
///
/// The per-kind messages below are for internal diagnostics only. At the
/// external boundary every kind collapses to the same undifferentiated
/// message (see [`AuthErrorKind::public_message`]) so a caller cannot
/// distinguish an unknown user from a wrong digest.
#[derive(Error, Debug)]
pub enum AuthErrorKind {
    #[error("Unknown principal")]
    UnknownPrincipal,

    #[error("Invalid timestamp: {reason}")]
    InvalidTimestamp { reason: String },

    #[error("Nonce already used (replay attack detected)")]
    ReplayDetected,

    #[error("Digest mismatch")]
    DigestMismatch,

    #[error("Malformed challenge: {message}")]
    MalformedChallenge { message: String },
}

impl AuthErrorKind {
    /// The message safe to surface to an unauthenticated caller.
    ///
    /// Identical for every kind: distinguishing "unknown user" from
    /// "wrong password" at the boundary enables username enumeration.
    pub fn public_message(&self) -> &'static str {
        "authentication failed"
    }

    /// Stable identifier for audit log entries.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownPrincipal => "UNKNOWN_PRINCIPAL",
            Self::InvalidTimestamp { .. } => "INVALID_TIMESTAMP",
            Self::ReplayDetected => "REPLAY_DETECTED",
            Self::DigestMismatch => "DIGEST_MISMATCH",
            Self::MalformedChallenge { .. } => "MALFORMED_CHALLENGE",
        }
    }
}

/// Result type alias for verification operations.
pub type GuardResult<T> = Result<T, GuardError>;
