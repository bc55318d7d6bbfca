//! Cryptographic primitives for Keepsake.
//!
//! This module provides:
//! - Key derivation using PBKDF2-HMAC-SHA256
//! - Authenticated encryption using AES-256-GCM
//! - Blob framing and base64 transport encoding
//! - Password hashing and constant-time verification
//! - Random password generation
//!
//! # Security Guarantees
//! - Derived key material is automatically zeroized on drop
//! - No plaintext, password, or key material is ever logged
//! - Constant-time comparison for password hash verification
//! - Decryption failure never reveals whether the password was wrong or
//!   the data was tampered with

pub mod aead;
pub mod blob;
pub mod kdf;
pub mod password;

pub use blob::{decrypt, encrypt, EncryptedBlob};
pub use kdf::{derive_key, DerivedKey, Salt, KEY_LEN, PBKDF2_ITERATIONS, SALT_LEN};
pub use password::{generate_password, hash_password, verify_password_hash};
