//! Vault operations over the password hash, encrypted blob, and session.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, warn};

use crate::session::{SessionRecord, SESSION_KEY};
use keepsake_common::{Error, Result};
use keepsake_crypto::{self as crypto, EncryptedBlob};
use keepsake_storage::KeyValueStore;

/// Storage key for the password verification hash in the long-lived store.
pub const AUTH_KEY: &str = "memory_book_auth";

/// Storage key for the encrypted document blob in the long-lived store.
pub const DATA_KEY: &str = "encrypted_memory_book";

/// Minimum length for a new password in `change_password`.
pub const MIN_PASSWORD_LEN: usize = 8;

/// How long an issued wipe token stays valid, in milliseconds.
const WIPE_TOKEN_TTL_MS: i64 = 2 * 60 * 1000;

/// Single-use confirmation token for a destructive wipe.
///
/// Issued by [`Vault::request_wipe`] and consumed by
/// [`Vault::confirm_wipe`]. Replaces the blocking confirmation dialogs of
/// the original design with a testable two-step contract.
pub struct WipeToken {
    value: String,
}

impl WipeToken {
    fn issue() -> (Self, PendingWipe) {
        let value = crypto::generate_password(32);
        let pending = PendingWipe {
            value: value.clone(),
            issued_at: Utc::now().timestamp_millis(),
        };
        (Self { value }, pending)
    }
}

struct PendingWipe {
    value: String,
    issued_at: i64,
}

/// Password-protected store for a single encrypted document.
///
/// Owns the persisted password hash and encrypted blob in a long-lived
/// store, and the session record in a short-lived store; it is the sole
/// writer of both. All cryptographic work is delegated to
/// `keepsake-crypto`; the caller owns the plaintext password.
pub struct Vault {
    /// Long-lived store: password hash and encrypted blob.
    data: Arc<dyn KeyValueStore>,
    /// Short-lived store: session record, dropped with the process.
    session: Arc<dyn KeyValueStore>,
    /// Outstanding wipe confirmation, if any.
    pending_wipe: Mutex<Option<PendingWipe>>,
}

impl Vault {
    /// Create a vault over a long-lived and a short-lived store.
    pub fn new(data: Arc<dyn KeyValueStore>, session: Arc<dyn KeyValueStore>) -> Self {
        Self {
            data,
            session,
            pending_wipe: Mutex::new(None),
        }
    }

    /// Check whether a master password has been set up.
    pub async fn has_password(&self) -> Result<bool> {
        self.data.contains(AUTH_KEY).await
    }

    /// Check whether an encrypted document is stored.
    pub async fn has_data(&self) -> Result<bool> {
        self.data.contains(DATA_KEY).await
    }

    /// Check whether a valid, unexpired session exists.
    ///
    /// # Postconditions
    /// - An absent, malformed, or expired record yields `false`
    /// - A malformed or expired record is deleted (lazy cleanup)
    ///
    /// Storage failures fail closed.
    pub async fn is_authenticated(&self) -> bool {
        let raw = match self.session.get(SESSION_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return false,
            Err(e) => {
                warn!(error = %e, "Session read failed, treating as unauthenticated");
                return false;
            }
        };

        let valid = match SessionRecord::from_json(&raw) {
            Ok(record) => {
                if record.is_expired() {
                    debug!("Session expired");
                    false
                } else {
                    true
                }
            }
            Err(_) => {
                warn!("Malformed session record");
                false
            }
        };

        if !valid {
            if let Err(e) = self.session.remove(SESSION_KEY).await {
                warn!(error = %e, "Failed to clear stale session");
            }
        }

        valid
    }

    /// Set the master password and open a session.
    ///
    /// Persists a verification hash; the password itself is never stored.
    /// Calling this when a hash already exists overwrites it
    /// unconditionally; gating to first-time setup is the caller's
    /// responsibility.
    pub async fn set_password(&self, password: &str) -> Result<()> {
        let hash = crypto::hash_password(password);
        self.data.put(AUTH_KEY, &hash).await?;
        self.open_session(&hash).await?;

        info!("Master password set");
        Ok(())
    }

    /// Verify a candidate password against the stored hash.
    ///
    /// # Postconditions
    /// - Fails closed (`Ok(false)`) when no password has been set
    /// - On success a fresh session record is written, so verifying while
    ///   already logged in refreshes the session
    pub async fn verify_password(&self, password: &str) -> Result<bool> {
        let Some(stored) = self.data.get(AUTH_KEY).await? else {
            return Ok(false);
        };

        let valid = crypto::verify_password_hash(password, &stored);
        if valid {
            self.open_session(&stored).await?;
        }

        Ok(valid)
    }

    /// Encrypt a document and persist it as the vault blob.
    ///
    /// # Errors
    /// - `Error::Encryption` on serialization or cipher failure
    /// - `Error::Storage` when the blob cannot be written
    pub async fn save_data<T: Serialize>(&self, document: &T, password: &str) -> Result<()> {
        let blob = crypto::encrypt(document, password)?;
        self.data.put(DATA_KEY, blob.as_str()).await?;

        debug!(bytes = blob.as_str().len(), "Document saved");
        Ok(())
    }

    /// Load and decrypt the stored document.
    ///
    /// # Postconditions
    /// - Returns `Ok(None)` when no blob has been stored yet
    ///
    /// # Errors
    /// - `Error::Decryption` propagates so the caller can tell a wrong
    ///   password apart from an empty vault
    pub async fn load_data<T: DeserializeOwned>(&self, password: &str) -> Result<Option<T>> {
        let Some(encoded) = self.data.get(DATA_KEY).await? else {
            return Ok(None);
        };

        let blob = EncryptedBlob::from_encoded(encoded);
        let document = crypto::decrypt(&blob, password)?;
        Ok(Some(document))
    }

    /// Re-encrypt the document under a new password and update the hash.
    ///
    /// Steps run strictly in sequence: verify the old password, policy
    /// checks, load the document, persist the re-encrypted blob, then
    /// overwrite the hash and refresh the session.
    ///
    /// This is not atomic: a crash after the blob rewrite but before the
    /// hash update leaves the blob encrypted under the new password while
    /// the stored hash still matches the old one, making the vault
    /// unopenable until restored from an export.
    ///
    /// # Errors
    /// - `Error::NotSetUp` when no password exists
    /// - `Error::Mismatch` when the old password is wrong, the new one
    ///   equals the old, or the new one is shorter than
    ///   [`MIN_PASSWORD_LEN`]
    /// - `Error::Storage` when there is no document to re-encrypt
    pub async fn change_password(&self, old_password: &str, new_password: &str) -> Result<()> {
        let Some(stored) = self.data.get(AUTH_KEY).await? else {
            return Err(Error::NotSetUp);
        };

        if !crypto::verify_password_hash(old_password, &stored) {
            return Err(Error::Mismatch("old password is incorrect".to_string()));
        }
        if new_password == old_password {
            return Err(Error::Mismatch(
                "new password must differ from the old one".to_string(),
            ));
        }
        if new_password.chars().count() < MIN_PASSWORD_LEN {
            return Err(Error::Mismatch(format!(
                "new password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }

        let Some(document) = self.load_data::<serde_json::Value>(old_password).await? else {
            return Err(Error::Storage(
                "no encrypted data to re-encrypt".to_string(),
            ));
        };

        self.save_data(&document, new_password).await?;
        self.set_password(new_password).await?;

        info!("Master password changed");
        Ok(())
    }

    /// Close the current session, if any.
    pub async fn logout(&self) -> Result<()> {
        self.session.remove(SESSION_KEY).await?;
        debug!("Session closed");
        Ok(())
    }

    /// Begin a destructive wipe, returning a single-use confirmation
    /// token.
    ///
    /// Nothing is deleted until the token is passed to
    /// [`Vault::confirm_wipe`]. Requesting again invalidates any earlier
    /// token.
    pub fn request_wipe(&self) -> WipeToken {
        let (token, pending) = WipeToken::issue();
        *self.pending_wipe.lock().unwrap() = Some(pending);
        token
    }

    /// Irreversibly delete the password hash, the encrypted blob, and the
    /// session record.
    ///
    /// # Preconditions
    /// - `token` must come from the most recent [`Vault::request_wipe`]
    ///   call and be no older than its short validity window
    ///
    /// # Errors
    /// - `Error::InvalidInput` when no wipe is pending or the token is
    ///   stale or mismatched
    pub async fn confirm_wipe(&self, token: WipeToken) -> Result<()> {
        {
            let mut pending = self.pending_wipe.lock().unwrap();
            let Some(expected) = pending.take() else {
                return Err(Error::InvalidInput("no wipe pending".to_string()));
            };
            let now = Utc::now().timestamp_millis();
            if now.saturating_sub(expected.issued_at) > WIPE_TOKEN_TTL_MS {
                return Err(Error::InvalidInput("wipe token expired".to_string()));
            }
            if expected.value != token.value {
                return Err(Error::InvalidInput("wipe token mismatch".to_string()));
            }
        }

        self.data.remove(AUTH_KEY).await?;
        self.data.remove(DATA_KEY).await?;
        self.session.remove(SESSION_KEY).await?;

        info!("Vault wiped");
        Ok(())
    }

    async fn open_session(&self, hash: &str) -> Result<()> {
        let record = SessionRecord::new(hash);
        self.session.put(SESSION_KEY, &record.to_json()?).await
    }
}
