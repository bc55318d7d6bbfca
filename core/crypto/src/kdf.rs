//! Key derivation using PBKDF2-HMAC-SHA256.
//!
//! A deliberately high iteration count makes brute-force password guessing
//! expensive while a single legitimate derivation stays fast to verify.

use pbkdf2::pbkdf2_hmac;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

use keepsake_common::{Error, Result};

/// Length of the per-encryption salt in bytes.
pub const SALT_LEN: usize = 16;

/// Length of derived encryption keys in bytes (256-bit).
pub const KEY_LEN: usize = 32;

/// PBKDF2 iteration count.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// Symmetric key derived from a password and salt.
///
/// Exists only transiently during one encrypt/decrypt call and is
/// zeroized on drop. Never persisted.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_LEN],
}

impl DerivedKey {
    /// Get the key bytes.
    ///
    /// # Security
    /// The returned slice should be used immediately and not stored.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.key
    }
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DerivedKey([REDACTED])")
    }
}

/// Salt for key derivation.
///
/// Not secret; generated fresh per encryption and stored alongside the
/// ciphertext so identical passwords never yield identical keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Salt(pub [u8; SALT_LEN]);

impl Salt {
    /// Generate a random salt.
    pub fn generate() -> Self {
        use rand::RngCore;
        let mut salt = [0u8; SALT_LEN];
        rand::thread_rng().fill_bytes(&mut salt);
        Self(salt)
    }

    /// Create from bytes.
    pub fn from_bytes(bytes: [u8; SALT_LEN]) -> Self {
        Self(bytes)
    }

    /// Get the salt bytes.
    pub fn as_bytes(&self) -> &[u8; SALT_LEN] {
        &self.0
    }
}

/// Derive a symmetric key from a password and salt.
///
/// # Preconditions
/// - `password` must not be empty
///
/// # Postconditions
/// - Returns a 256-bit key, deterministic given the same inputs
///
/// # Errors
/// - Returns error if password is empty
pub fn derive_key(password: &str, salt: &Salt) -> Result<DerivedKey> {
    if password.is_empty() {
        return Err(Error::InvalidInput("Password cannot be empty".to_string()));
    }

    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(
        password.as_bytes(),
        salt.as_bytes(),
        PBKDF2_ITERATIONS,
        &mut key,
    );

    Ok(DerivedKey { key })
}
