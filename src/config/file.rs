//! Configuration file loading and discovery.

use super::types::ToolConfig;
use crate::error::{Result, SpdxError};
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
const CONFIG_FILE_NAMES: &[&str] = &[
    ".spdx-tools.yaml",
    ".spdx-tools.yml",
    "spdx-tools.yaml",
    "spdx-tools.yml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. User config directory (~/.config/spdx-tools/)
/// 4. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    if let Some(path) = std::env::current_dir()
        .ok()
        .and_then(|cwd| find_config_in_dir(&cwd))
    {
        return Some(path);
    }

    if let Some(path) =
        dirs::config_dir().and_then(|config_dir| find_config_in_dir(&config_dir.join("spdx-tools")))
    {
        return Some(path);
    }

    dirs::home_dir().and_then(|home| find_config_in_dir(&home))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Load a `ToolConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<ToolConfig> {
    let content = std::fs::read_to_string(path).map_err(|err| SpdxError::io(path, err))?;
    serde_yaml::from_str(&content)
        .map_err(|err| SpdxError::config(format!("{}: {err}", path.display())))
}

/// Load config from discovered file, or return default.
///
/// A file that cannot be read or parsed is reported and skipped.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (ToolConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (ToolConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (ToolConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate an example config file content.
#[must_use]
pub fn generate_example_config() -> String {
    format!(
        r"# spdx-tools configuration
# Place this file at .spdx-tools.yaml in your project root or ~/.config/spdx-tools/

{}",
        serde_yaml::to_string(&ToolConfig::default()).unwrap_or_default()
    )
}

// ============================================================================
// Tests
// ============================================================================
