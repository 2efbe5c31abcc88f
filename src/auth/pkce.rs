//! PKCE S256 verifier/challenge generation
//!
//! This module implements the Proof Key for Code Exchange (PKCE) extension
//! to OAuth 2.0 as defined in RFC 7636, using the `S256` challenge method.
//!
//! # How PKCE works
//!
//! 1. The client generates a high-entropy random string called the `code_verifier`.
//! 2. The client computes a SHA-256 hash of the verifier and base64url-encodes
//!    it to produce the `code_challenge`.
//! 3. The authorization request includes `code_challenge` and
//!    `code_challenge_method=S256`.
//! 4. The token exchange request includes the original `code_verifier`,
//!    proving that the requester who started the flow is the one completing
//!    it.
//!
//! A fresh pair is generated per login attempt and never persisted; its
//! lifetime is a single authorization flow.
//!
//! # References
//!
//! - RFC 7636 <https://www.rfc-editor.org/rfc/rfc7636>

use base64::Engine as _;
use sha2::{Digest, Sha256};

// ---------------------------------------------------------------------------
// PkcePair
// ---------------------------------------------------------------------------

/// A PKCE S256 pair consisting of a verifier and its derived challenge.
///
/// Created by [`generate`] and consumed by the login flow in
/// `src/auth/flow.rs`: the challenge goes into the authorization request,
/// the verifier into the token exchange.
///
/// # Examples
///
/// ```
/// use itmo_schedule::auth::pkce::generate;
///
/// let pair = generate();
/// assert_eq!(pair.verifier.len(), 43);
/// assert_ne!(pair.verifier, pair.challenge);
/// ```
#[derive(Debug, Clone)]
pub struct PkcePair {
    /// The code verifier: a base64url-encoded (no padding) random string of
    /// exactly 43 characters derived from 32 random bytes.
    pub verifier: String,

    /// The code challenge: the base64url-encoded (no padding) SHA-256 digest
    /// of the UTF-8 representation of [`Self::verifier`].
    pub challenge: String,
}

// ---------------------------------------------------------------------------
// Public functions
// ---------------------------------------------------------------------------

/// Generates a fresh PKCE S256 pair.
///
/// The verifier is 32 cryptographically random bytes encoded as a base64url
/// string without padding (43 characters). The challenge is the
/// base64url-encoded SHA-256 digest of the verifier string's UTF-8 bytes,
/// as specified in RFC 7636 section 4.2:
/// `BASE64URL(SHA256(ASCII(code_verifier)))`.
///
/// Both values contain only URL-safe base64 characters (`[A-Za-z0-9_-]`)
/// and carry no `=` padding.
pub fn generate() -> PkcePair {
    use rand::RngCore as _;

    let mut random_bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut random_bytes);

    let verifier = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(random_bytes);
    let challenge = challenge_for(&verifier);

    PkcePair {
        verifier,
        challenge,
    }
}

/// Computes the S256 challenge for a given verifier string.
///
/// Exposed so the challenge derivation is testable against fixed verifiers;
/// [`generate`] uses the same transform internally.
pub fn challenge_for(verifier: &str) -> String {
    let digest = Sha256::digest(verifier.as_bytes());
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(digest.as_slice())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_produces_correct_verifier_length() {
        let pair = generate();
        assert_eq!(
            pair.verifier.len(),
            43,
            "32 random bytes in base64url without padding produces 43 chars"
        );
    }

    #[test]
    fn test_challenge_is_correct_s256_of_verifier() {
        let pair = generate();

        let digest = Sha256::digest(pair.verifier.as_bytes());
        let expected_challenge =
            base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(digest.as_slice());

        assert_eq!(
            pair.challenge, expected_challenge,
            "challenge must equal base64url(SHA256(verifier))"
        );
    }

    #[test]
    fn test_generate_produces_unique_verifiers() {
        let a = generate();
        let b = generate();
        assert_ne!(
            a.verifier, b.verifier,
            "successive calls must produce distinct verifiers"
        );
    }

    #[test]
    fn test_generate_produces_unique_challenges() {
        let a = generate();
        let b = generate();
        assert_ne!(
            a.challenge, b.challenge,
            "successive calls must produce distinct challenges"
        );
    }

    #[test]
    fn test_verifier_uses_url_safe_base64_no_padding() {
        let pair = generate();
        // base64url characters are [A-Za-z0-9_-]; no '+', '/', or '=' allowed.
        assert!(
            pair.verifier
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'),
            "verifier must only contain base64url characters, got: {}",
            pair.verifier
        );
        assert!(
            !pair.verifier.contains('='),
            "verifier must not contain padding '='"
        );
    }

    #[test]
    fn test_challenge_uses_url_safe_base64_no_padding() {
        let pair = generate();
        assert!(
            pair.challenge
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'),
            "challenge must only contain base64url characters, got: {}",
            pair.challenge
        );
        assert!(
            !pair.challenge.contains('='),
            "challenge must not contain padding '='"
        );
    }

    #[test]
    fn test_verifier_and_challenge_are_distinct() {
        let pair = generate();
        assert_ne!(pair.verifier, pair.challenge);
    }

    #[test]
    fn test_challenge_for_is_deterministic() {
        let verifier = "fixed-verifier-value";
        assert_eq!(challenge_for(verifier), challenge_for(verifier));
    }

    /// Verifies the S256 transform against the known test vector from
    /// RFC 7636 Appendix B.
    ///
    /// RFC 7636 Appendix B specifies:
    ///   code_verifier = "dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk"
    ///   code_challenge = "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM"
    #[test]
    fn test_s256_known_answer_rfc7636_appendix_b() {
        let verifier = "dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk";
        assert_eq!(
            challenge_for(verifier),
            "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM",
            "S256 challenge must match RFC 7636 Appendix B test vector"
        );
    }
}
