use super::jsonlike::document_to_value;
use crate::error::{Result, SpdxError};
use crate::model::Document;

/// Writes `document` as SPDX YAML.
pub fn write_yaml(document: &Document) -> Result<String> {
    serde_yaml::to_string(&document_to_value(document))
        .map_err(|e| SpdxError::Serialization(format!("YAML: {e}")))
}
