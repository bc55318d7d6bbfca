//! Encrypted blob framing and transport encoding.
//!
//! The persisted unit is salt || nonce || ciphertext-with-tag, base64
//! encoded so it can live in any text-valued key-value store. The payload
//! is an opaque JSON document; this module has no knowledge of its schema.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{de::DeserializeOwned, Serialize};
use std::fmt;

use crate::aead::{self, NONCE_LEN, TAG_LEN};
use crate::kdf::{derive_key, Salt, SALT_LEN};
use keepsake_common::{Error, Result};

/// A self-contained encrypted document: salt || nonce || ciphertext,
/// base64 encoded.
///
/// Everything needed for decryption except the password travels inside
/// the blob, so a blob plus the right password is always recoverable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedBlob(String);

impl EncryptedBlob {
    /// Wrap an already-encoded blob, e.g. one read back from storage.
    pub fn from_encoded(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Get the base64 text representation.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the blob, returning the base64 text.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for EncryptedBlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Encrypt a document with a password.
///
/// Serializes the document to JSON, generates a fresh random salt and
/// nonce, derives a key, and performs authenticated encryption.
///
/// # Postconditions
/// - Two calls with identical inputs produce different blobs
/// - Never returns partial output
///
/// # Errors
/// - Returns `Error::Encryption` if serialization or the cipher fails
pub fn encrypt<T: Serialize>(document: &T, password: &str) -> Result<EncryptedBlob> {
    let plaintext = serde_json::to_vec(document)
        .map_err(|e| Error::Encryption(format!("Serialization failure: {}", e)))?;

    let salt = Salt::generate();
    let key = derive_key(password, &salt)?;

    let sealed = aead::encrypt(key.as_bytes(), &plaintext)?;

    let mut combined = Vec::with_capacity(SALT_LEN + sealed.len());
    combined.extend_from_slice(salt.as_bytes());
    combined.extend_from_slice(&sealed);

    Ok(EncryptedBlob(STANDARD.encode(combined)))
}

/// Decrypt a blob with a password.
///
/// Splits the decoded bytes into salt, nonce, and ciphertext, derives the
/// key, verifies and decrypts, then parses the JSON payload.
///
/// # Errors
/// - Returns `Error::Decryption` on malformed encoding, authentication
///   failure, or invalid payload. Wrong password and corrupted data are
///   deliberately indistinguishable.
pub fn decrypt<T: DeserializeOwned>(blob: &EncryptedBlob, password: &str) -> Result<T> {
    let combined = STANDARD.decode(blob.as_str()).map_err(|_| Error::Decryption)?;

    if combined.len() < SALT_LEN + NONCE_LEN + TAG_LEN {
        return Err(Error::Decryption);
    }

    let (salt_bytes, sealed) = combined.split_at(SALT_LEN);
    let mut salt = [0u8; SALT_LEN];
    salt.copy_from_slice(salt_bytes);

    let key = derive_key(password, &Salt::from_bytes(salt))?;
    let plaintext = aead::decrypt(key.as_bytes(), sealed)?;

    serde_json::from_slice(&plaintext).map_err(|_| Error::Decryption)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_encrypt_decrypt_roundtrip() {
        let document = json!({"pages": [{"id": 1, "title": "hello"}]});

        let blob = encrypt(&document, "correct horse").unwrap();
        let restored: serde_json::Value = decrypt(&blob, "correct horse").unwrap();

        assert_eq!(restored, document);
    }

    #[test]
    fn test_wrong_password_rejected() {
        let document = json!(["a", "b"]);

        let blob = encrypt(&document, "password-one").unwrap();
        let result: Result<serde_json::Value> = decrypt(&blob, "password-two");

        assert!(matches!(result, Err(Error::Decryption)));
    }

    #[test]
    fn test_ciphertext_nondeterministic() {
        let document = json!({"k": "v"});

        let blob1 = encrypt(&document, "same-password").unwrap();
        let blob2 = encrypt(&document, "same-password").unwrap();

        assert_ne!(blob1, blob2);
    }

    #[test]
    fn test_tampered_blob_rejected() {
        let document = json!({"secret": 42});
        let blob = encrypt(&document, "pw").unwrap();

        let mut raw = STANDARD.decode(blob.as_str()).unwrap();
        // Flip one byte in the ciphertext region, past salt and nonce
        let idx = SALT_LEN + NONCE_LEN + 2;
        raw[idx] ^= 0x01;
        let tampered = EncryptedBlob::from_encoded(STANDARD.encode(raw));

        let result: Result<serde_json::Value> = decrypt(&tampered, "pw");
        assert!(matches!(result, Err(Error::Decryption)));
    }

    #[test]
    fn test_garbage_blob_rejected() {
        let blob = EncryptedBlob::from_encoded("not base64 at all!!");
        let result: Result<serde_json::Value> = decrypt(&blob, "pw");
        assert!(matches!(result, Err(Error::Decryption)));
    }

    #[test]
    fn test_short_blob_rejected() {
        let blob = EncryptedBlob::from_encoded(STANDARD.encode([0u8; 8]));
        let result: Result<serde_json::Value> = decrypt(&blob, "pw");
        assert!(matches!(result, Err(Error::Decryption)));
    }

    proptest! {
        // PBKDF2 at full strength dominates runtime, so keep the case
        // count low.
        #![proptest_config(ProptestConfig::with_cases(8))]

        #[test]
        fn prop_roundtrip_arbitrary_document(
            text in ".{0,64}",
            n in 0u64..1_000_000,
            password in "[a-zA-Z0-9]{1,24}",
        ) {
            let document = json!({"text": text, "n": n});

            let blob = encrypt(&document, &password).unwrap();
            let restored: serde_json::Value = decrypt(&blob, &password).unwrap();

            prop_assert_eq!(restored, document);
        }
    }
}
