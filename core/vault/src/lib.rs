//! Vault orchestration for Keepsake.
//!
//! This module provides:
//! - Session records with lazy 30-minute expiry
//! - Master password setup, verification, and change
//! - Save/load of the encrypted document blob
//! - Two-step destructive wipe
//! - Export/import envelope handling
//!
//! # Architecture
//! The vault sits between the presentation layer and the key-value
//! stores, delegating all cryptographic work to `keepsake-crypto`. It is
//! the only component that knows whether someone is logged in and where
//! the data lives.

pub mod export;
pub mod session;
pub mod vault;

pub use export::{export_document, import_document, ExportEnvelope, EXPORT_VERSION};
pub use session::{SessionRecord, SESSION_DURATION_MS, SESSION_KEY};
pub use vault::{Vault, WipeToken, AUTH_KEY, DATA_KEY, MIN_PASSWORD_LEN};
