//! Authentication dispatch across schemes.

use std::sync::Arc;
use std::time::Instant;

use chrono::{SecondsFormat, Utc};
use tracing::{debug, warn};

use crate::audit::{sanitize_username, AuditEntry, AuditLogger};
use crate::error::GuardError;
use crate::token::{AuthenticatedToken, UnauthenticatedToken};

use super::authenticator::Authenticator;

/// Result of routing a token through the dispatch chain.
#[derive(Debug)]
pub enum DispatchOutcome {
    /// An authenticator claimed the token and verification succeeded.
    Authenticated(AuthenticatedToken),
    /// An authenticator claimed the token and verification failed.
    ///
    /// The carried error is for internal diagnostics; callers surface
    /// only the undifferentiated public message.
    Failed(GuardError),
    /// No registered authenticator supports the token.
    ///
    /// A routing outcome, not a verification failure: it lets multiple
    /// schemes (e.g. WSSE plus anonymous access) coexist on one
    /// endpoint.
    NoApplicableAuthenticator,
}

impl DispatchOutcome {
    /// Whether the token was successfully authenticated.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

/// Ordered chain of authenticators.
///
/// `dispatch` routes a token to the first authenticator whose `supports`
/// predicate matches; that authenticator's result is final, with no
/// fallthrough to later entries.
pub struct AuthenticationDispatcher {
    authenticators: Vec<Arc<dyn Authenticator>>,
    audit: Option<Arc<AuditLogger>>,
}

impl AuthenticationDispatcher {
    /// Create an empty dispatcher.
    pub fn new() -> Self {
        Self {
            authenticators: Vec::new(),
            audit: None,
        }
    }

    /// Attach an audit logger; every claimed attempt is recorded.
    pub fn with_audit(mut self, audit: Arc<AuditLogger>) -> Self {
        self.audit = Some(audit);
        self
    }

    /// Append an authenticator to the chain. Registration order is
    /// routing order.
    pub fn register(&mut self, authenticator: Arc<dyn Authenticator>) {
        self.authenticators.push(authenticator);
    }

    /// Route a token to the first supporting authenticator.
    pub fn dispatch(&self, token: &UnauthenticatedToken) -> DispatchOutcome {
        let started = Instant::now();

        for authenticator in &self.authenticators {
            if !authenticator.supports(token) {
                continue;
            }

            let result = authenticator.authenticate(token);
            let duration_ms = started.elapsed().as_millis() as u64;
            self.record_attempt(token, &result, duration_ms);

            return match result {
                Ok(authenticated) => {
                    debug!(principal = %authenticated.principal(), "Authentication succeeded");
                    DispatchOutcome::Authenticated(authenticated)
                }
                Err(error) => {
                    debug!(error = %error, "Authentication failed");
                    DispatchOutcome::Failed(error)
                }
            };
        }

        debug!("No applicable authenticator for token");
        DispatchOutcome::NoApplicableAuthenticator
    }

    /// Write an audit entry for a claimed attempt, if auditing is on.
    ///
    /// Audit trouble must not change the authentication outcome.
    fn record_attempt(
        &self,
        token: &UnauthenticatedToken,
        result: &Result<AuthenticatedToken, GuardError>,
        duration_ms: u64,
    ) {
        let Some(audit) = &self.audit else {
            return;
        };

        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let username = token.username().map(sanitize_username);

        let entry = match result {
            Ok(authenticated) => AuditEntry::success(
                timestamp,
                username,
                authenticated.roles().to_vec(),
                duration_ms,
            ),
            Err(GuardError::Auth { kind }) => {
                AuditEntry::failure(timestamp, username, kind.code().to_string(), duration_ms)
            }
            Err(_) => {
                AuditEntry::failure(timestamp, username, "INTERNAL".to_string(), duration_ms)
            }
        };

        if let Err(e) = audit.log(&entry) {
            warn!(error = %e, "Failed to write audit entry");
        }
    }
}

impl Default for AuthenticationDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
