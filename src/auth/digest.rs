//! WSSE digest computation and constant-time comparison.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use sha1::{Digest, Sha1};
use subtle::ConstantTimeEq;

use crate::error::{AuthErrorKind, GuardError};

/// Compute the expected proof value for a challenge.
///
/// `base64(sha1(base64decode(nonce) || created || secret))`, with the
/// decoded nonce, the raw created string, and the secret concatenated in
/// that fixed order with no separators. The construction is wire-format:
/// existing WSSE clients compute exactly this, so it must be preserved
/// byte for byte.
///
/// # Errors
///
/// Returns an [`AuthErrorKind::MalformedChallenge`] error if the nonce
/// is not decodable base64 (fail closed rather than hashing the raw
/// nonce bytes).
pub fn compute_digest(nonce: &str, created: &str, secret: &str) -> Result<String, GuardError> {
    let nonce_bytes = BASE64.decode(nonce).map_err(|_| GuardError::Auth {
        kind: AuthErrorKind::MalformedChallenge {
            message: "nonce is not valid base64".to_string(),
        },
    })?;

    let mut hasher = Sha1::new();
    hasher.update(&nonce_bytes);
    hasher.update(created.as_bytes());
    hasher.update(secret.as_bytes());

    Ok(BASE64.encode(hasher.finalize()))
}

/// Compare a supplied digest against the expected one in constant time.
///
/// Uses `subtle::ConstantTimeEq` over the full byte strings so a
/// mismatch position cannot be recovered from response timing.
pub fn verify_digest(supplied: &str, expected: &str) -> bool {
    supplied.as_bytes().ct_eq(expected.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    // Known-good vector: secret "s3cr3t", created "2024-01-01T00:00:00Z".
    const NONCE: &str = "d36e316282959a9ed4c89851497a717f";
    const CREATED: &str = "2024-01-01T00:00:00Z";
    const SECRET: &str = "s3cr3t";
    const EXPECTED: &str = "kWsbFoDYFa3ZWvNNFx50vTUCmRs=";

    #[test]
    fn test_known_vector() {
        let digest = compute_digest(NONCE, CREATED, SECRET).unwrap();
        assert_eq!(digest, EXPECTED);
    }

    #[test]
    fn test_digest_is_deterministic() {
        let a = compute_digest(NONCE, CREATED, SECRET).unwrap();
        let b = compute_digest(NONCE, CREATED, SECRET).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_digest_changes_with_any_input() {
        let base = compute_digest(NONCE, CREATED, SECRET).unwrap();
        assert_ne!(
            base,
            compute_digest("YWJjZGVmZ2hpamts", CREATED, SECRET).unwrap()
        );
        assert_ne!(
            base,
            compute_digest(NONCE, "2024-01-01T00:00:01Z", SECRET).unwrap()
        );
        assert_ne!(base, compute_digest(NONCE, CREATED, "s3cr3t!").unwrap());
    }

    #[test]
    fn test_undecodable_nonce_fails_closed() {
        // Valid alphabet but impossible length for base64.
        let result = compute_digest("abcde", CREATED, SECRET);
        assert!(matches!(
            result,
            Err(GuardError::Auth {
                kind: AuthErrorKind::MalformedChallenge { .. }
            })
        ));
    }

    #[test]
    fn test_verify_accepts_equal() {
        assert!(verify_digest(EXPECTED, EXPECTED));
    }

    #[test]
    fn test_verify_rejects_single_byte_difference() {
        let mut perturbed = EXPECTED.as_bytes().to_vec();
        for i in 0..perturbed.len() {
            perturbed[i] ^= 0x01;
            let candidate = String::from_utf8_lossy(&perturbed).into_owned();
            assert!(!verify_digest(&candidate, EXPECTED), "byte {} accepted", i);
            perturbed[i] ^= 0x01;
        }
    }

    #[test]
    fn test_verify_rejects_length_mismatch() {
        assert!(!verify_digest("short", EXPECTED));
        assert!(!verify_digest("", EXPECTED));
    }
}
