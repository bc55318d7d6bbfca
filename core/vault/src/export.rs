//! Export and import of the encrypted document.
//!
//! The export format is a JSON envelope carrying the encrypted blob plus
//! enough metadata to recognize it on import. Import also accepts a bare
//! JSON array of page objects, the plaintext format of early versions.

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use keepsake_common::{Error, Result};
use keepsake_crypto::{self as crypto, EncryptedBlob};

/// Envelope format version.
pub const EXPORT_VERSION: &str = "1.0";

/// Export envelope: `{version, encrypted, data, timestamp}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportEnvelope {
    pub version: String,
    pub encrypted: bool,
    /// The encrypted blob in its base64 text representation.
    pub data: String,
    /// Export time, serialized as an ISO-8601 string.
    pub timestamp: DateTime<Utc>,
}

/// Encrypt a document and wrap it in an export envelope.
///
/// Returns pretty-printed JSON suitable for writing to a backup file.
pub fn export_document<T: Serialize>(document: &T, password: &str) -> Result<String> {
    let blob = crypto::encrypt(document, password)?;

    let envelope = ExportEnvelope {
        version: EXPORT_VERSION.to_string(),
        encrypted: true,
        data: blob.into_string(),
        timestamp: Utc::now(),
    };

    serde_json::to_string_pretty(&envelope).map_err(|e| Error::Serialization(e.to_string()))
}

/// Parse an exported file and recover the document.
///
/// Accepts either the encrypted envelope (decrypted with `password`) or a
/// bare JSON array of page objects treated as already-plaintext.
///
/// # Errors
/// - `Error::Decryption` when the envelope does not open with `password`
/// - `Error::InvalidInput` when the input is neither format
pub fn import_document<T: DeserializeOwned>(json: &str, password: &str) -> Result<T> {
    let value: serde_json::Value =
        serde_json::from_str(json).map_err(|e| Error::Serialization(e.to_string()))?;

    if value.get("encrypted").and_then(|v| v.as_bool()) == Some(true) {
        let Some(data) = value.get("data").and_then(|v| v.as_str()) else {
            return Err(Error::InvalidInput(
                "encrypted export is missing its data field".to_string(),
            ));
        };
        debug!("Importing encrypted envelope");
        let blob = EncryptedBlob::from_encoded(data);
        return crypto::decrypt(&blob, password);
    }

    if value.is_array() {
        debug!("Importing legacy plaintext array");
        return serde_json::from_value(value).map_err(|e| Error::Serialization(e.to_string()));
    }

    Err(Error::InvalidInput(
        "unrecognized import format".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use keepsake_common::Page;

    fn sample_pages() -> Vec<Page> {
        vec![Page::new(1, "2024-01-01", "title", "text")]
    }

    #[test]
    fn test_export_import_roundtrip() {
        let pages = sample_pages();

        let exported = export_document(&pages, "Tr0ub4dor&3").unwrap();
        let imported: Vec<Page> = import_document(&exported, "Tr0ub4dor&3").unwrap();

        assert_eq!(imported, pages);
    }

    #[test]
    fn test_export_envelope_shape() {
        let exported = export_document(&sample_pages(), "pw").unwrap();
        let value: serde_json::Value = serde_json::from_str(&exported).unwrap();

        assert_eq!(value["version"], EXPORT_VERSION);
        assert_eq!(value["encrypted"], true);
        assert!(value["data"].is_string());
        // chrono serializes DateTime<Utc> as an ISO-8601 / RFC 3339 string
        assert!(value["timestamp"].as_str().unwrap().contains('T'));
    }

    #[test]
    fn test_import_wrong_password() {
        let exported = export_document(&sample_pages(), "right").unwrap();
        let result: Result<Vec<Page>> = import_document(&exported, "wrong");

        assert!(matches!(result, Err(Error::Decryption)));
    }

    #[test]
    fn test_import_legacy_plaintext_array() {
        let legacy = r#"[{"id":1,"date":"2024-01-01","title":"t","text":"x"}]"#;

        let imported: Vec<Page> = import_document(legacy, "ignored").unwrap();
        assert_eq!(imported.len(), 1);
        assert_eq!(imported[0].title, "t");
    }

    #[test]
    fn test_import_rejects_unknown_shape() {
        let result: Result<Vec<Page>> = import_document(r#"{"foo": 1}"#, "pw");
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_import_envelope_missing_data() {
        let result: Result<Vec<Page>> =
            import_document(r#"{"encrypted": true, "version": "1.0"}"#, "pw");
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_import_rejects_invalid_json() {
        let result: Result<Vec<Page>> = import_document("not json", "pw");
        assert!(matches!(result, Err(Error::Serialization(_))));
    }
}
