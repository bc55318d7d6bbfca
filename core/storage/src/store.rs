//! Key-value store trait definition.

use async_trait::async_trait;

use keepsake_common::Result;

/// Text-valued key-value store.
///
/// All persisted vault state is text (base64 blobs, JSON records), so the
/// interface trades in `String` values. Implementations must be safe to
/// share across tasks.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Get the store name (e.g., "memory", "local").
    fn name(&self) -> &str;

    /// Read the value for a key.
    ///
    /// # Postconditions
    /// - Returns `Ok(None)` when the key is absent
    ///
    /// # Errors
    /// - I/O failure
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous value for the key.
    ///
    /// # Postconditions
    /// - A subsequent `get` observes the new value
    ///
    /// # Errors
    /// - I/O failure, quota exceeded
    async fn put(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a key. Deleting an absent key is a no-op.
    async fn remove(&self, key: &str) -> Result<()>;

    /// Check whether a key is present.
    async fn contains(&self, key: &str) -> Result<bool>;
}
