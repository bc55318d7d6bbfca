//! Common types used throughout Keepsake.

use serde::{Deserialize, Serialize};

/// Position of an embedded image on a page, in pixels relative to its
/// default layout slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImagePosition {
    pub x: f64,
    pub y: f64,
}

/// A single dated page of the memory book.
///
/// This is the canonical payload shape produced by the presentation layer.
/// The crypto layer never depends on it; encryption is generic over any
/// serializable document. Field names stay camelCase on the wire so blobs
/// written by earlier versions of the application still parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Creation timestamp in milliseconds, used as a stable identifier.
    pub id: u64,
    /// Display date, kept as the free-form string the UI produced.
    pub date: String,
    pub title: String,
    pub text: String,
    /// Embedded images as data URLs.
    #[serde(default)]
    pub images: Vec<String>,
    /// Per-image drag offsets, parallel to `images`.
    #[serde(default)]
    pub image_positions: Vec<ImagePosition>,
}

impl Page {
    /// Create a page with no images.
    pub fn new(id: u64, date: impl Into<String>, title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id,
            date: date.into(),
            title: title.into(),
            text: text.into(),
            images: Vec::new(),
            image_positions: Vec::new(),
        }
    }
}
