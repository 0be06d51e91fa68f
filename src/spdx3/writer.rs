use super::model::Payload;
use crate::error::{Result, SpdxError};
use std::path::Path;
use tracing::debug;

/// Serializes `payload` as pretty-printed JSON-LD.
pub fn write_payload_json(payload: &Payload) -> Result<String> {
    serde_json::to_string_pretty(payload)
        .map_err(|err| SpdxError::Serialization(format!("SPDX 3 JSON-LD: {err}")))
}

pub fn write_payload_file(payload: &Payload, path: &Path) -> Result<()> {
    let json = write_payload_json(payload)?;
    std::fs::write(path, json).map_err(|err| SpdxError::io(path, err))?;
    debug!(path = %path.display(), elements = payload.len(), "wrote SPDX 3 payload");
    Ok(())
}
