//! Storage abstraction for Keepsake.
//!
//! This module provides a trait-based interface over text-valued key-value
//! stores. The vault layer composes two of them: a long-lived store for the
//! password hash and encrypted blob, and a short-lived store for the
//! session record.
//!
//! # Design Principles
//! - Store isolation: no storage-specific logic in vault or crypto modules
//! - Async operations: all I/O is async
//! - Absent keys are an ordinary result, never an error

pub mod local;
pub mod memory;
pub mod store;

pub use local::LocalStore;
pub use memory::MemoryStore;
pub use store::KeyValueStore;
