//! Username sanitization for audit logging.
//!
//! The claimed username is attacker-controlled text. Before it reaches
//! the audit trail it is stripped of control characters (which would
//! corrupt JSON-lines tooling) and truncated.

/// Maximum length for a logged username.
const MAX_USERNAME_LENGTH: usize = 64;

/// Sanitize a claimed username for audit logging.
///
/// Control characters are replaced with `?` and the result is truncated
/// to 64 characters. Digests, nonces, and secrets must never be passed
/// through here; they are excluded from the trail entirely.
pub fn sanitize_username(username: &str) -> String {
    username
        .chars()
        .map(|c| if c.is_control() { '?' } else { c })
        .take(MAX_USERNAME_LENGTH)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_username_unchanged() {
        assert_eq!(sanitize_username("alice"), "alice");
        assert_eq!(sanitize_username("alice@example.com"), "alice@example.com");
    }

    #[test]
    fn test_control_characters_replaced() {
        assert_eq!(sanitize_username("ali\nce"), "ali?ce");
        assert_eq!(sanitize_username("\u{1b}[31malice"), "?[31malice");
    }

    #[test]
    fn test_long_username_truncated() {
        let long = "a".repeat(200);
        let sanitized = sanitize_username(&long);
        assert_eq!(sanitized.len(), 64);
    }

    #[test]
    fn test_exact_length_kept() {
        let exact = "a".repeat(64);
        assert_eq!(sanitize_username(&exact), exact);
    }
}
