//! In-memory nonce cache for replay attack prevention.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use sha1::{Digest, Sha1};

/// Stable key for a nonce: SHA-1 of the raw nonce string.
///
/// Hashing bounds the cache's per-entry memory regardless of how long a
/// nonce the client sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NonceKey([u8; 20]);

impl NonceKey {
    /// Derive the key for a raw nonce value.
    pub fn from_nonce(nonce: &str) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(nonce.as_bytes());
        Self(hasher.finalize().into())
    }

    /// Short hex prefix for log correlation. Safe to log: the raw nonce
    /// cannot be recovered from it.
    pub fn fingerprint(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

/// Thread-safe in-memory nonce cache with TTL-based expiry.
///
/// The single shared mutable resource of the verification engine. The
/// check-then-insert in [`check_and_record`](Self::check_and_record) is
/// one critical section: two concurrent requests bearing the same nonce
/// can never both observe "absent".
///
/// Entries are not persisted across restarts; replay protection is a
/// best-effort, time-bounded mitigation.
pub struct NonceCache {
    /// Map of nonce key -> expiry time.
    seen: Mutex<HashMap<NonceKey, Instant>>,
}

impl NonceCache {
    /// Create an empty nonce cache.
    pub fn new() -> Self {
        Self {
            seen: Mutex::new(HashMap::new()),
        }
    }

    /// Check whether a nonce key has been seen, recording it if not.
    ///
    /// Returns `true` if the key was new (valid), `false` if already
    /// recorded. A recorded key keeps its original expiry; a replayed
    /// nonce does not extend its own rejection window.
    pub fn check_and_record(&self, key: NonceKey, ttl: Duration) -> bool {
        let mut seen = match self.seen.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(), // Recover from mutex poisoning
        };
        let now = Instant::now();

        // Clean up expired entries (lazy cleanup)
        seen.retain(|_, expiry| *expiry > now);

        if seen.contains_key(&key) {
            return false;
        }

        seen.insert(key, now + ttl);
        true
    }

    /// Get the current number of recorded nonces (for monitoring).
    pub fn len(&self) -> usize {
        match self.seen.lock() {
            Ok(guard) => guard.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Force cleanup of expired entries.
    pub fn cleanup(&self) {
        let mut seen = match self.seen.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let now = Instant::now();
        seen.retain(|_, expiry| *expiry > now);
    }

    /// Start a background cleanup task.
    ///
    /// This spawns a tokio task that periodically sweeps expired entries,
    /// bounding memory between requests on quiet deployments.
    pub fn start_cleanup_task(self: &std::sync::Arc<Self>, interval: Duration) {
        let cache = std::sync::Arc::clone(self);
        tokio::spawn(async move {
            let mut interval_timer = tokio::time::interval(interval);
            loop {
                interval_timer.tick().await;
                cache.cleanup();
            }
        });
    }
}

impl Default for NonceCache {
    fn default() -> Self {
        Self::new()
    }
}
