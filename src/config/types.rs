//! Configuration types for spdx-tools.

use serde::{Deserialize, Serialize};

// ============================================================================
// Top-level Configuration
// ============================================================================

/// Settings shared by the command-line tools.
///
/// Every section has defaults, so an empty file (or no file at all) is a
/// valid configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Validation of parsed documents
    pub validation: ValidationConfig,
    /// Writing documents
    pub output: OutputConfig,
    /// SPDX 2 → SPDX 3 conversion
    pub bump: BumpConfig,
}

// ============================================================================
// Sections
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Run validation after parsing
    pub enabled: bool,
    /// Validate against this version instead of the document's own
    /// (`SPDX-2.2` or `SPDX-2.3`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spdx_version: Option<String>,
    /// Treat any validation message as a failure
    pub strict: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            spdx_version: None,
            strict: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Refuse to write a document that does not validate
    pub validate_before_write: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            validate_before_write: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BumpConfig {
    /// Log every field the conversion had to drop
    pub warn_missing_conversions: bool,
}

impl Default for BumpConfig {
    fn default() -> Self {
        Self {
            warn_missing_conversions: true,
        }
    }
}

impl BumpConfig {
    #[must_use]
    pub fn options(&self) -> crate::spdx3::BumpOptions {
        crate::spdx3::BumpOptions {
            log_warnings: self.warn_missing_conversions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ToolConfig::default();
        assert!(config.validation.enabled);
        assert!(config.validation.strict);
        assert_eq!(config.validation.spdx_version, None);
        assert!(config.output.validate_before_write);
        assert!(config.bump.options().log_warnings);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config: ToolConfig = serde_yaml::from_str("validation:\n  strict: false\n").unwrap();
        assert!(!config.validation.strict);
        assert!(config.validation.enabled);
        assert!(config.output.validate_before_write);
    }
}
