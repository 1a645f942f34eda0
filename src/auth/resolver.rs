//! Credential resolution seam.
//!
//! Credential storage is an external collaborator: the engine only needs
//! to look up a principal's stored secret and roles by username. The
//! in-memory resolver here serves tests and small embedded deployments.

use std::collections::HashMap;
use std::fmt;

/// A stored shared secret.
///
/// Newtype so the value can never leak through `Debug` output or be
/// logged by accident; access to the bytes is explicit.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    /// Wrap a secret value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Expose the secret for digest computation.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret([REDACTED])")
    }
}

/// A resolved identity: identifier, stored secret, and granted roles.
#[derive(Debug, Clone)]
pub struct Principal {
    /// Unique identifier (the username the client claims).
    pub identifier: String,
    /// Shared secret used to recompute the digest. Never logged or echoed.
    pub secret: Secret,
    /// Roles granted on successful authentication.
    pub roles: Vec<String>,
}

impl Principal {
    /// Create a principal.
    pub fn new(
        identifier: impl Into<String>,
        secret: impl Into<String>,
        roles: Vec<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            secret: Secret::new(secret),
            roles,
        }
    }
}

/// Looks up a principal's stored credentials by username.
pub trait CredentialResolver: Send + Sync {
    /// Resolve a username to its principal, or `None` if unknown.
    fn lookup(&self, username: &str) -> Option<Principal>;
}

/// In-memory credential resolver backed by a map.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentialResolver {
    principals: HashMap<String, Principal>,
}

impl StaticCredentialResolver {
    /// Create a resolver from a list of principals.
    pub fn new(principals: Vec<Principal>) -> Self {
        Self {
            principals: principals
                .into_iter()
                .map(|p| (p.identifier.clone(), p))
                .collect(),
        }
    }
}

impl CredentialResolver for StaticCredentialResolver {
    fn lookup(&self, username: &str) -> Option<Principal> {
        self.principals.get(username).cloned()
    }
}
