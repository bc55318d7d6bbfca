//! Common utilities and types shared across Keepsake modules.
//!
//! This module provides the error type used throughout the workspace and
//! the page document model consumed by the export layer and tests.

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{ImagePosition, Page};
