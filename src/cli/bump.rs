use super::{check_document, Outcome};
use crate::config::ToolConfig;
use crate::formats::parse_file;
use crate::spdx3::{bump_document_with, write_payload_file, write_payload_json};
use anyhow::{Context, Result};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct BumpArgs {
    pub infile: PathBuf,
    /// JSON-LD destination; the payload goes to the report writer when unset
    pub outfile: Option<PathBuf>,
    pub novalidation: bool,
}

/// Parses an SPDX 2 document and converts it to an SPDX 3 payload.
pub fn run_bump(args: &BumpArgs, config: &ToolConfig, out: &mut dyn Write) -> Result<Outcome> {
    let document = parse_file(&args.infile)
        .with_context(|| format!("Failed to parse {}", args.infile.display()))?;

    if !args.novalidation && config.validation.enabled {
        let version = config.validation.spdx_version.as_deref();
        let outcome = check_document(&document, version, config.validation.strict, out)?;
        if outcome != Outcome::Success {
            return Ok(outcome);
        }
    }

    let result = bump_document_with(&document, config.bump.options());
    info!(
        elements = result.payload.len(),
        warnings = result.warnings.len(),
        "converted {} to SPDX 3",
        args.infile.display()
    );
    match &args.outfile {
        Some(path) => write_payload_file(&result.payload, path)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => writeln!(out, "{}", write_payload_json(&result.payload)?)?,
    }
    Ok(Outcome::Success)
}
