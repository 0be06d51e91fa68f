use super::jsonlike::document_to_value;
use crate::error::{Result, SpdxError};
use crate::model::Document;

/// Writes `document` as pretty-printed SPDX JSON.
pub fn write_json(document: &Document) -> Result<String> {
    serde_json::to_string_pretty(&document_to_value(document))
        .map_err(|e| SpdxError::Serialization(format!("JSON: {e}")))
}
