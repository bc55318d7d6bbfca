//! Password hashing, verification, and generation.
//!
//! The stored verification hash is a plain SHA-256 digest of the password,
//! base64 encoded. It is intentionally unsalted to stay compatible with
//! hashes written by earlier versions of the application; the tradeoff is
//! recorded in DESIGN.md.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Default length for generated passwords.
pub const DEFAULT_PASSWORD_LEN: usize = 16;

/// Alphabet for generated passwords: letters, digits, and a small symbol
/// set (70 characters).
const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*";

/// One-way digest of a password for verification without storing it.
///
/// Deterministic: the same password always produces the same hash. The
/// hash alone does not allow recovering the password or any derived key.
pub fn hash_password(password: &str) -> String {
    let digest = Sha256::digest(password.as_bytes());
    STANDARD.encode(digest)
}

/// Verify a candidate password against a stored hash.
///
/// Recomputes the hash and compares in constant time.
pub fn verify_password_hash(password: &str, stored_hash: &str) -> bool {
    let computed = hash_password(password);
    computed.as_bytes().ct_eq(stored_hash.as_bytes()).into()
}

/// Generate a random password from the fixed 70-character alphabet.
///
/// Each output character is one cryptographically random byte reduced
/// modulo the alphabet size. A convenience for users who want a strong
/// password; not used for key derivation.
pub fn generate_password(length: usize) -> String {
    use rand::RngCore;

    let mut bytes = vec![0u8; length];
    rand::thread_rng().fill_bytes(&mut bytes);

    bytes
        .iter()
        .map(|b| CHARSET[*b as usize % CHARSET.len()] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_deterministic() {
        assert_eq!(hash_password("Tr0ub4dor&3"), hash_password("Tr0ub4dor&3"));
    }

    #[test]
    fn test_hash_distinguishes_passwords() {
        assert_ne!(hash_password("password1"), hash_password("password2"));
    }

    #[test]
    fn test_verify_accepts_correct_password() {
        let hash = hash_password("secret");
        assert!(verify_password_hash("secret", &hash));
    }

    #[test]
    fn test_verify_rejects_wrong_password() {
        let hash = hash_password("secret");
        assert!(!verify_password_hash("Secret", &hash));
        assert!(!verify_password_hash("", &hash));
    }

    #[test]
    fn test_hash_is_base64_of_sha256() {
        // 32 digest bytes encode to 44 base64 characters with padding
        assert_eq!(hash_password("anything").len(), 44);
    }

    #[test]
    fn test_generate_password_length() {
        assert_eq!(generate_password(DEFAULT_PASSWORD_LEN).len(), 16);
        assert_eq!(generate_password(32).len(), 32);
        assert!(generate_password(0).is_empty());
    }

    #[test]
    fn test_generate_password_charset() {
        let password = generate_password(256);
        assert!(password.bytes().all(|b| CHARSET.contains(&b)));
    }

    #[test]
    fn test_generated_passwords_differ() {
        assert_ne!(generate_password(16), generate_password(16));
    }
}
