//! Authentication token types.
//!
//! Tokens are plain data carriers passed through the dispatch chain. An
//! unauthenticated token holds the raw parsed fields of one scheme's
//! challenge; an authenticated token holds the resolved identity. Tokens
//! are replaced on success, never mutated, and discarded at the end of
//! the request.

/// Raw fields parsed from a WSSE `UsernameToken` header.
///
/// `created` is kept as the raw string: the digest is computed over its
/// exact bytes, so reformatting it would break verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WsseChallenge {
    /// Claimed username. Never empty after extraction.
    pub username: String,
    /// Client-supplied digest (base64).
    pub digest: String,
    /// Single-use nonce (base64).
    pub nonce: String,
    /// Creation timestamp as sent by the client (RFC 3339).
    pub created: String,
}

/// An unauthenticated token, tagged by scheme.
///
/// The dispatcher treats the scheme-specific fields as opaque; only the
/// matching authenticator interprets them.
#[derive(Debug, Clone)]
pub enum UnauthenticatedToken {
    /// No credentials were presented.
    Anonymous,
    /// A WSSE challenge extracted from the request header.
    Wsse(WsseChallenge),
}

impl UnauthenticatedToken {
    /// The claimed username, if the scheme carries one.
    pub fn username(&self) -> Option<&str> {
        match self {
            Self::Anonymous => None,
            Self::Wsse(challenge) => Some(&challenge.username),
        }
    }
}

/// A verified identity with its granted roles.
///
/// A token is authenticated if and only if it carries at least one role;
/// the flag is derived, never stored. Instances are only constructed by
/// authenticators after successful verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedToken {
    principal: String,
    roles: Vec<String>,
}

impl AuthenticatedToken {
    /// Build an authenticated token.
    ///
    /// Returns `None` if the principal is empty or no roles were granted;
    /// such a token could never satisfy the authenticated invariant.
    pub fn new(principal: impl Into<String>, roles: Vec<String>) -> Option<Self> {
        let principal = principal.into();
        if principal.is_empty() || roles.is_empty() {
            return None;
        }
        Some(Self { principal, roles })
    }

    /// The resolved principal identifier.
    pub fn principal(&self) -> &str {
        &self.principal
    }

    /// The roles granted to the principal.
    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    /// Whether this token represents an authenticated identity.
    ///
    /// Always true for a constructed instance; derived from the roles.
    pub fn is_authenticated(&self) -> bool {
        !self.roles.is_empty()
    }
}
