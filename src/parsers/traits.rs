//! The parser seam shared by every SPDX 2 serialization.

use crate::error::{ErrorContext, Result, SpdxError};
use crate::model::Document;
use std::path::Path;

/// Maximum input size (512 MB); parsers read the whole file into memory.
pub const MAX_SPDX_FILE_SIZE: u64 = 512 * 1024 * 1024;

/// SPDX 2 versions the parsers understand.
pub const SUPPORTED_VERSIONS: &[&str] = &["SPDX-2.2", "SPDX-2.3"];

/// A reader for one SPDX 2 serialization.
///
/// Implementors provide `parse_str`; reading from a path adds the size limit
/// and the path as error context.
pub trait SpdxParser {
    /// Parse a document from a file path
    fn parse(&self, path: &Path) -> Result<Document> {
        let metadata = std::fs::metadata(path).map_err(|e| SpdxError::io(path, e))?;
        if metadata.len() > MAX_SPDX_FILE_SIZE {
            let err = std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!(
                    "SPDX file is {} MB, exceeding the {} MB limit",
                    metadata.len() / (1024 * 1024),
                    MAX_SPDX_FILE_SIZE / (1024 * 1024),
                ),
            );
            return Err(SpdxError::io(path, err));
        }
        let content = std::fs::read_to_string(path).map_err(|e| SpdxError::io(path, e))?;
        self.parse_str(&content)
            .with_context(|| format!("parsing {}", path.display()))
    }

    /// Parse a document from string content
    fn parse_str(&self, content: &str) -> Result<Document>;

    /// Get format name
    fn format_name(&self) -> &'static str;

    /// Get supported SPDX versions
    fn supported_versions(&self) -> &'static [&'static str] {
        SUPPORTED_VERSIONS
    }
}
