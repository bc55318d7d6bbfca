//! Authenticated encryption using AES-256-GCM.
//!
//! AES-GCM provides both confidentiality and authenticity: decryption
//! fails verifiably when the ciphertext or tag has been altered.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Key, Nonce,
};

use crate::kdf::KEY_LEN;
use keepsake_common::{Error, Result};

/// Nonce size for AES-GCM (12 bytes).
pub const NONCE_LEN: usize = 12;

/// Authentication tag size (16 bytes).
pub const TAG_LEN: usize = 16;

/// Encrypt plaintext using AES-256-GCM.
///
/// # Postconditions
/// - Returns nonce || ciphertext || tag
/// - The nonce is randomly generated, never reused with the same key
///
/// # Errors
/// - Returns `Error::Encryption` if the cipher call fails
pub fn encrypt(key: &[u8; KEY_LEN], plaintext: &[u8]) -> Result<Vec<u8>> {
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));

    use rand::RngCore;
    let mut nonce_bytes = [0u8; NONCE_LEN];
    rand::thread_rng().fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, plaintext)
        .map_err(|e| Error::Encryption(format!("Cipher failure: {}", e)))?;

    // Prepend nonce to ciphertext
    let mut result = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    result.extend_from_slice(&nonce_bytes);
    result.extend_from_slice(&ciphertext);

    Ok(result)
}

/// Decrypt ciphertext using AES-256-GCM.
///
/// # Preconditions
/// - `ciphertext` must be at least NONCE_LEN + TAG_LEN bytes
/// - Ciphertext format: nonce || encrypted_data || tag
///
/// # Errors
/// - Returns `Error::Decryption` on short input or authentication failure.
///   Wrong key and tampered data are indistinguishable from the error.
pub fn decrypt(key: &[u8; KEY_LEN], ciphertext: &[u8]) -> Result<Vec<u8>> {
    if ciphertext.len() < NONCE_LEN + TAG_LEN {
        return Err(Error::Decryption);
    }

    let (nonce_bytes, encrypted) = ciphertext.split_at(NONCE_LEN);
    let nonce = Nonce::from_slice(nonce_bytes);

    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));

    cipher.decrypt(nonce, encrypted).map_err(|_| Error::Decryption)
}
