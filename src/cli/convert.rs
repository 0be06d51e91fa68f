use super::{check_document, print_messages, Outcome};
use crate::config::ToolConfig;
use crate::error::SpdxError;
use crate::formats::{parse_file, write_file, FileFormat};
use anyhow::{Context, Result};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct ConvertArgs {
    pub infile: PathBuf,
    pub outfile: PathBuf,
    /// Skip validation of the input and the write-side gate
    pub novalidation: bool,
    pub version: Option<String>,
}

/// Reads `infile` and writes it to `outfile`; both formats come from the
/// file suffixes.
pub fn run_convert(
    args: &ConvertArgs,
    config: &ToolConfig,
    out: &mut dyn Write,
) -> Result<Outcome> {
    let output_format = FileFormat::detect(&args.outfile)?;
    let document = parse_file(&args.infile)
        .with_context(|| format!("Failed to parse {}", args.infile.display()))?;

    let validate = !args.novalidation && config.validation.enabled;
    if validate {
        let version = args
            .version
            .as_deref()
            .or(config.validation.spdx_version.as_deref());
        let outcome = check_document(&document, version, config.validation.strict, out)?;
        if outcome != Outcome::Success {
            return Ok(outcome);
        }
    }

    let gate = !args.novalidation && config.output.validate_before_write;
    match write_file(&document, &args.outfile, gate) {
        Ok(()) => {}
        Err(SpdxError::Validation { messages }) => {
            print_messages(&messages, out)?;
            return Ok(Outcome::ValidationFailed);
        }
        Err(err) => {
            return Err(err).with_context(|| format!("Failed to write {}", args.outfile.display()))
        }
    }
    info!(
        "converted {} to {} ({})",
        args.infile.display(),
        args.outfile.display(),
        output_format
    );
    Ok(Outcome::Success)
}
