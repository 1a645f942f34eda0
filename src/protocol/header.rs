//! WSSE header grammar parsing.

use crate::token::WsseChallenge;

/// Scheme word that opens a WSSE challenge header.
const SCHEME: &str = "UsernameToken";

/// Parse a raw header value into a structured challenge.
///
/// Returns `None` when the header does not match the grammar
/// `UsernameToken Username="U", PasswordDigest="D", Nonce="N", Created="C"`.
/// Malformed headers are treated identically to absent ones: no partial
/// acceptance, so ambiguous credentials never reach an authenticator.
///
/// The nonce must be base64 alphabet (letters, digits, `+`, `/`, up to
/// two trailing `=`); the other fields are arbitrary non-quote text.
pub fn extract_challenge(header: &str) -> Option<WsseChallenge> {
    let rest = header.trim().strip_prefix(SCHEME)?;
    let rest = rest.strip_prefix(' ')?;

    let (username, rest) = take_quoted_field(rest, "Username")?;
    let rest = rest.strip_prefix(", ")?;
    let (digest, rest) = take_quoted_field(rest, "PasswordDigest")?;
    let rest = rest.strip_prefix(", ")?;
    let (nonce, rest) = take_quoted_field(rest, "Nonce")?;
    let rest = rest.strip_prefix(", ")?;
    let (created, rest) = take_quoted_field(rest, "Created")?;

    if !rest.trim().is_empty() {
        return None;
    }

    if username.is_empty() || digest.is_empty() || created.is_empty() {
        return None;
    }

    if !is_base64_nonce(nonce) {
        return None;
    }

    Some(WsseChallenge {
        username: username.to_string(),
        digest: digest.to_string(),
        nonce: nonce.to_string(),
        created: created.to_string(),
    })
}

/// Consume `Name="value"` from the front of `input`.
///
/// The value runs up to the next quote, so it can never contain one.
fn take_quoted_field<'a>(input: &'a str, name: &str) -> Option<(&'a str, &'a str)> {
    let rest = input.strip_prefix(name)?;
    let rest = rest.strip_prefix("=\"")?;
    rest.split_once('"')
}

/// Check that a nonce uses the base64 alphabet with valid padding.
fn is_base64_nonce(nonce: &str) -> bool {
    let body = nonce.trim_end_matches('=');
    if body.is_empty() || nonce.len() - body.len() > 2 {
        return false;
    }
    body.bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'+' || b == b'/')
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_HEADER: &str = "UsernameToken Username=\"alice\", \
        PasswordDigest=\"kWsbFoDYFa3ZWvNNFx50vTUCmRs=\", \
        Nonce=\"d36e316282959a9ed4c89851497a717f\", \
        Created=\"2024-01-01T00:00:00Z\"";

    #[test]
    fn test_extract_valid_header() {
        let challenge = extract_challenge(VALID_HEADER).unwrap();
        assert_eq!(challenge.username, "alice");
        assert_eq!(challenge.digest, "kWsbFoDYFa3ZWvNNFx50vTUCmRs=");
        assert_eq!(challenge.nonce, "d36e316282959a9ed4c89851497a717f");
        assert_eq!(challenge.created, "2024-01-01T00:00:00Z");
    }

    #[test]
    fn test_extract_tolerates_surrounding_whitespace() {
        let header = format!("  {}  ", VALID_HEADER);
        assert!(extract_challenge(&header).is_some());
    }

    #[test]
    fn test_missing_nonce_field_is_absent() {
        let header = "UsernameToken Username=\"alice\", \
            PasswordDigest=\"digest\", Created=\"2024-01-01T00:00:00Z\"";
        assert!(extract_challenge(header).is_none());
    }

    #[test]
    fn test_wrong_scheme_word_is_absent() {
        let header = VALID_HEADER.replace("UsernameToken", "BearerToken");
        assert!(extract_challenge(&header).is_none());
    }

    #[test]
    fn test_misordered_fields_are_absent() {
        let header = "UsernameToken PasswordDigest=\"d\", Username=\"alice\", \
            Nonce=\"bm9uY2U=\", Created=\"2024-01-01T00:00:00Z\"";
        assert!(extract_challenge(header).is_none());
    }

    #[test]
    fn test_empty_username_is_absent() {
        let header = "UsernameToken Username=\"\", PasswordDigest=\"d\", \
            Nonce=\"bm9uY2U=\", Created=\"2024-01-01T00:00:00Z\"";
        assert!(extract_challenge(header).is_none());
    }

    #[test]
    fn test_non_base64_nonce_is_absent() {
        let header = "UsernameToken Username=\"alice\", PasswordDigest=\"d\", \
            Nonce=\"not a nonce!\", Created=\"2024-01-01T00:00:00Z\"";
        assert!(extract_challenge(header).is_none());

        // More than two padding characters.
        let header = "UsernameToken Username=\"alice\", PasswordDigest=\"d\", \
            Nonce=\"bm9uY2U===\", Created=\"2024-01-01T00:00:00Z\"";
        assert!(extract_challenge(header).is_none());
    }

    #[test]
    fn test_trailing_garbage_is_absent() {
        let header = format!("{}, Extra=\"field\"", VALID_HEADER);
        assert!(extract_challenge(&header).is_none());
    }

    #[test]
    fn test_empty_header_is_absent() {
        assert!(extract_challenge("").is_none());
        assert!(extract_challenge("UsernameToken").is_none());
        assert!(extract_challenge("UsernameToken ").is_none());
    }

    #[test]
    fn test_nonce_padding_accepted() {
        let header = "UsernameToken Username=\"alice\", PasswordDigest=\"d\", \
            Nonce=\"bm9uY2U=\", Created=\"2024-01-01T00:00:00Z\"";
        let challenge = extract_challenge(header).unwrap();
        assert_eq!(challenge.nonce, "bm9uY2U=");
    }
}
