//! Short code generation and custom code validation.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;
use regex::Regex;
use sha2::{Digest, Sha256};
use std::sync::LazyLock;

use crate::domain::LinkError;

/// Characters accepted in any short code: the base64url alphabet.
static CODE_ALPHABET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap());

/// Generates a candidate short code for `target`.
///
/// Hashes 32 random bytes followed by the target with SHA-256 and keeps the
/// first `length` characters of the unpadded base64url digest (at most 43).
pub fn generate_code(target: &str, length: usize) -> String {
    let mut nonce = [0u8; 32];
    rand::rng().fill_bytes(&mut nonce);

    let mut hasher = Sha256::new();
    hasher.update(nonce);
    hasher.update(target.as_bytes());

    let mut encoded = URL_SAFE_NO_PAD.encode(hasher.finalize());
    encoded.truncate(length);
    encoded
}

/// Returns true if every character of `code` is in the base64url alphabet.
pub fn is_url_safe(code: &str) -> bool {
    CODE_ALPHABET_REGEX.is_match(code)
}

/// Validates a caller-supplied code against the length bounds and alphabet.
///
/// Length is checked first so that over- and under-length codes always report
/// [`LinkError::CodeTooLong`] / [`LinkError::CodeTooShort`].
pub fn validate_custom_code(code: &str, min: usize, max: usize) -> Result<(), LinkError> {
    let len = code.chars().count();

    if len < min {
        return Err(LinkError::CodeTooShort { min });
    }
    if len > max {
        return Err(LinkError::CodeTooLong { max });
    }
    if !is_url_safe(code) {
        return Err(LinkError::CodeInvalidCharacters);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generated_code_has_requested_length() {
        for length in [4, 8, 16] {
            let code = generate_code("https://example.com", length);
            assert_eq!(code.len(), length);
            assert!(is_url_safe(&code), "unexpected character in {code}");
        }
    }

    #[test]
    fn test_generated_codes_differ_for_same_target() {
        let codes: HashSet<String> = (0..200)
            .map(|_| generate_code("https://example.com", 8))
            .collect();

        assert_eq!(codes.len(), 200);
    }

    #[test]
    fn test_length_caps_at_digest_size() {
        let code = generate_code("https://example.com", 100);
        assert_eq!(code.len(), 43);
    }

    #[test]
    fn test_validate_custom_code_bounds() {
        assert!(matches!(
            validate_custom_code("abc", 4, 16),
            Err(LinkError::CodeTooShort { min: 4 })
        ));
        assert!(matches!(
            validate_custom_code("abcdefghijklmnopq", 4, 16),
            Err(LinkError::CodeTooLong { max: 16 })
        ));
        assert!(validate_custom_code("abcd", 4, 16).is_ok());
        assert!(validate_custom_code("abcdefghijklmnop", 4, 16).is_ok());
    }

    #[test]
    fn test_validate_custom_code_alphabet() {
        assert!(validate_custom_code("my-link_01", 4, 16).is_ok());
        assert!(matches!(
            validate_custom_code("with space", 4, 16),
            Err(LinkError::CodeInvalidCharacters)
        ));
        assert!(matches!(
            validate_custom_code("a/b/c/d", 4, 16),
            Err(LinkError::CodeInvalidCharacters)
        ));
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // Four characters, eight bytes: passes the length check, fails the alphabet.
        assert!(matches!(
            validate_custom_code("ääää", 4, 16),
            Err(LinkError::CodeInvalidCharacters)
        ));
    }
}
