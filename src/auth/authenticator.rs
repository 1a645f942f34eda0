//! WSSE challenge verification.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock};
use crate::error::{AuthErrorKind, GuardError, GuardResult};
use crate::token::{AuthenticatedToken, UnauthenticatedToken, WsseChallenge};

use super::digest::{compute_digest, verify_digest};
use super::nonce::{NonceCache, NonceKey};
use super::resolver::CredentialResolver;

/// One authentication scheme in the dispatch chain.
///
/// An authenticator declares which unauthenticated tokens it can handle
/// and turns a supported token into an authenticated identity or a typed
/// failure.
pub trait Authenticator: Send + Sync {
    /// Whether this authenticator can handle the given token.
    fn supports(&self, token: &UnauthenticatedToken) -> bool;

    /// Verify a supported token.
    ///
    /// # Errors
    ///
    /// Returns a [`GuardError::Auth`] describing why verification
    /// failed. The per-kind detail is for internal logs; callers must
    /// surface only [`AuthErrorKind::public_message`].
    fn authenticate(&self, token: &UnauthenticatedToken) -> GuardResult<AuthenticatedToken>;
}

/// Verifies WSSE challenges against resolved credentials.
///
/// Checks, in order, short-circuiting on first failure:
/// 1. The claimed username resolves to a principal.
/// 2. The created timestamp is parseable, not in the future, and within
///    the lifetime window.
/// 3. The nonce has not been seen within the window (and is recorded
///    before the digest comparison, closing the concurrent-replay race).
/// 4. The recomputed digest matches the supplied one (constant time).
pub struct WsseAuthenticator {
    resolver: Arc<dyn CredentialResolver>,
    nonce_cache: Arc<NonceCache>,
    clock: Arc<dyn Clock>,
    /// Single window governing both timestamp freshness and nonce TTL.
    lifetime: Duration,
}

impl WsseAuthenticator {
    /// Create an authenticator using the system clock.
    pub fn new(
        resolver: Arc<dyn CredentialResolver>,
        nonce_cache: Arc<NonceCache>,
        lifetime: Duration,
    ) -> Self {
        Self::with_clock(resolver, nonce_cache, Arc::new(SystemClock), lifetime)
    }

    /// Create an authenticator with an injected clock (for deterministic
    /// timestamp-window tests).
    pub fn with_clock(
        resolver: Arc<dyn CredentialResolver>,
        nonce_cache: Arc<NonceCache>,
        clock: Arc<dyn Clock>,
        lifetime: Duration,
    ) -> Self {
        Self {
            resolver,
            nonce_cache,
            clock,
            lifetime,
        }
    }

    fn verify_challenge(&self, challenge: &WsseChallenge) -> GuardResult<AuthenticatedToken> {
        // 1. Resolve the principal. Unknown users get the same external
        // message as a digest mismatch (enumeration hardening).
        let principal = self
            .resolver
            .lookup(&challenge.username)
            .ok_or_else(|| {
                debug!(username = %challenge.username, "Unknown principal");
                GuardError::Auth {
                    kind: AuthErrorKind::UnknownPrincipal,
                }
            })?;

        // 2. Validate the time window.
        self.check_created(&challenge.created)?;

        // 3. Replay check. Recording must happen before the digest
        // comparison so two concurrent requests with the same nonce
        // cannot both observe "absent".
        let nonce_key = NonceKey::from_nonce(&challenge.nonce);
        if !self.nonce_cache.check_and_record(nonce_key, self.lifetime) {
            warn!(
                username = %challenge.username,
                nonce = %nonce_key.fingerprint(),
                "Replay attack detected: nonce already used"
            );
            return Err(GuardError::Auth {
                kind: AuthErrorKind::ReplayDetected,
            });
        }

        // 4. Recompute and compare the digest in constant time.
        let expected = compute_digest(
            &challenge.nonce,
            &challenge.created,
            principal.secret.expose(),
        )?;
        if !verify_digest(&challenge.digest, &expected) {
            debug!(username = %challenge.username, "Digest mismatch");
            return Err(GuardError::Auth {
                kind: AuthErrorKind::DigestMismatch,
            });
        }

        // 5. Success: a fresh token carrying the resolved roles. A
        // principal with no stored roles can never satisfy the
        // authenticated invariant, so it fails closed like an unknown
        // user.
        AuthenticatedToken::new(challenge.username.clone(), principal.roles).ok_or_else(|| {
            debug!(username = %challenge.username, "Principal has no roles");
            GuardError::Auth {
                kind: AuthErrorKind::UnknownPrincipal,
            }
        })
    }

    /// Reject unparseable, future-dated, or expired timestamps.
    ///
    /// Clock-skew-naive policy: any strictly future value fails, not
    /// just beyond a tolerance.
    fn check_created(&self, created: &str) -> GuardResult<()> {
        let created: DateTime<Utc> = DateTime::parse_from_rfc3339(created)
            .map_err(|e| GuardError::Auth {
                kind: AuthErrorKind::InvalidTimestamp {
                    reason: format!("unparseable created timestamp: {}", e),
                },
            })?
            .with_timezone(&Utc);

        let now = self.clock.now();

        if created > now {
            return Err(GuardError::Auth {
                kind: AuthErrorKind::InvalidTimestamp {
                    reason: "created timestamp is in the future".to_string(),
                },
            });
        }

        let age = now.signed_duration_since(created);
        let window = chrono::Duration::seconds(self.lifetime.as_secs() as i64);
        if age > window {
            return Err(GuardError::Auth {
                kind: AuthErrorKind::InvalidTimestamp {
                    reason: format!(
                        "created timestamp is {}s old, window is {}s",
                        age.num_seconds(),
                        window.num_seconds()
                    ),
                },
            });
        }

        Ok(())
    }
}

impl Authenticator for WsseAuthenticator {
    fn supports(&self, token: &UnauthenticatedToken) -> bool {
        matches!(token, UnauthenticatedToken::Wsse(_))
    }

    fn authenticate(&self, token: &UnauthenticatedToken) -> GuardResult<AuthenticatedToken> {
        match token {
            UnauthenticatedToken::Wsse(challenge) => self.verify_challenge(challenge),
            _ => Err(GuardError::Auth {
                kind: AuthErrorKind::MalformedChallenge {
                    message: "token scheme not supported by this authenticator".to_string(),
                },
            }),
        }
    }
}
