//! Common error types for Keepsake.

use thiserror::Error;

/// Top-level error type for Keepsake operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Serialization or cipher failure during encryption.
    #[error("Encryption error: {0}")]
    Encryption(String),

    /// Authentication-tag failure or invalid decrypted content.
    ///
    /// Wrong password and corrupted data deliberately map to the same
    /// error so the failure mode leaks nothing about the cause.
    #[error("invalid password or corrupted data")]
    Decryption,

    /// Operation requiring an existing master password attempted before
    /// one was set up.
    #[error("no master password has been set")]
    NotSetUp,

    /// Change-password policy failure: wrong old password, new password
    /// equal to the old one, or new password below the minimum length.
    #[error("Password mismatch: {0}")]
    Mismatch(String),

    /// Storage operation failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid input provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using the common Error.
pub type Result<T> = std::result::Result<T, Error>;
