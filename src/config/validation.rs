//! Validation of configuration values.

use super::types::{BumpConfig, OutputConfig, ToolConfig, ValidationConfig};
use crate::parsers::SUPPORTED_VERSIONS;

// ============================================================================
// Configuration Error
// ============================================================================

/// A configuration value that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for ToolConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = self.validation.validate();
        errors.extend(self.output.validate());
        errors.extend(self.bump.validate());
        errors
    }
}

impl Validatable for ValidationConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if let Some(version) = &self.spdx_version {
            if !SUPPORTED_VERSIONS.contains(&version.as_str()) {
                errors.push(ConfigError {
                    field: "validation.spdx_version".to_string(),
                    message: format!(
                        "Unsupported version '{}'. Valid options: {}",
                        version,
                        SUPPORTED_VERSIONS.join(", ")
                    ),
                });
            }
        }
        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        Vec::new()
    }
}

impl Validatable for BumpConfig {
    fn validate(&self) -> Vec<ConfigError> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ToolConfig::default().is_valid());
    }

    #[test]
    fn test_unsupported_version_override() {
        let mut config = ToolConfig::default();
        config.validation.spdx_version = Some("SPDX-2.1".to_string());
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "validation.spdx_version");
        assert!(errors[0].to_string().contains("SPDX-2.2, SPDX-2.3"));
    }

    #[test]
    fn test_supported_version_override() {
        let mut config = ToolConfig::default();
        config.validation.spdx_version = Some("SPDX-2.2".to_string());
        assert!(config.is_valid());
    }
}
