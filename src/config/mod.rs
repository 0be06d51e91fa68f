//! Configuration for the spdx-tools binaries.
//!
//! Settings come from an optional YAML file; command-line flags override
//! them.
//!
//! ```yaml
//! validation:
//!   enabled: true
//!   spdx_version: SPDX-2.3
//!   strict: true
//! output:
//!   validate_before_write: true
//! bump:
//!   warn_missing_conversions: true
//! ```
//!
//! The file is looked up as `.spdx-tools.yaml` (or `.yml`, with or without
//! the leading dot) in the current directory, `~/.config/spdx-tools/` and the
//! home directory.

pub mod file;
mod types;
mod validation;

pub use file::{discover_config_file, generate_example_config, load_config_file, load_or_default};
pub use types::{BumpConfig, OutputConfig, ToolConfig, ValidationConfig};
pub use validation::{ConfigError, Validatable};
