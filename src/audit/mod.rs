//! Audit logging module.
//!
//! Provides a structured trail of authentication attempts in JSON lines
//! format for log analysis tools. Entries carry the claimed username and
//! the internal failure kind; secrets, digests, and raw nonces never
//! appear in the trail.

mod entry;
mod logger;
mod sanitize;

pub use entry::{AuditEntry, AuditOutcome};
pub use logger::AuditLogger;
pub use sanitize::sanitize_username;
