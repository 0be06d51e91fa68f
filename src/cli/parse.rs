use super::{check_document, Outcome};
use crate::config::ToolConfig;
use crate::formats::parse_file;
use crate::writers::write_tag_value;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct ParseArgs {
    pub file: PathBuf,
    /// Validate against this version instead of the document's own
    pub version: Option<String>,
    pub validate: bool,
    /// Print the parsed document as tag-value
    pub printout: bool,
}

/// Parses one file, optionally printing and validating it.
pub fn run_parse(args: &ParseArgs, config: &ToolConfig, out: &mut dyn Write) -> Result<Outcome> {
    let document = parse_file(&args.file)
        .with_context(|| format!("Failed to parse {}", args.file.display()))?;
    info!(
        packages = document.packages.len(),
        files = document.files.len(),
        relationships = document.relationships.len(),
        "parsed {}",
        args.file.display()
    );

    if args.printout {
        out.write_all(write_tag_value(&document).as_bytes())?;
    }
    if !args.validate {
        return Ok(Outcome::Success);
    }
    let version = args
        .version
        .as_deref()
        .or(config.validation.spdx_version.as_deref());
    check_document(&document, version, config.validation.strict, out)
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::{write, VALID_TAG_VALUE};
    use super::*;
    use tempfile::TempDir;

    fn args(file: PathBuf) -> ParseArgs {
        ParseArgs {
            file,
            validate: true,
            ..ParseArgs::default()
        }
    }

    #[test]
    fn test_valid_document() {
        let tmp = TempDir::new().unwrap();
        let path = write(tmp.path(), "doc.spdx", VALID_TAG_VALUE);
        let mut out = Vec::new();
        let outcome = run_parse(&args(path), &ToolConfig::default(), &mut out).unwrap();
        assert_eq!(outcome, Outcome::Success);
        assert!(out.is_empty());
    }

    #[test]
    fn test_printout() {
        let tmp = TempDir::new().unwrap();
        let path = write(tmp.path(), "doc.spdx", VALID_TAG_VALUE);
        let mut out = Vec::new();
        let parse_args = ParseArgs {
            printout: true,
            ..args(path)
        };
        run_parse(&parse_args, &ToolConfig::default(), &mut out).unwrap();
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("PackageName: example"));
    }

    #[test]
    fn test_version_mismatch_fails_strictly() {
        let tmp = TempDir::new().unwrap();
        let path = write(tmp.path(), "doc.spdx", VALID_TAG_VALUE);
        let parse_args = ParseArgs {
            version: Some("SPDX-2.2".to_string()),
            ..args(path)
        };
        let mut out = Vec::new();
        let outcome = run_parse(&parse_args, &ToolConfig::default(), &mut out).unwrap();
        assert_eq!(outcome, Outcome::ValidationFailed);
        assert_eq!(outcome.exit_code(), 1);
        assert!(String::from_utf8(out).unwrap().contains("does not match"));

        let mut lenient = ToolConfig::default();
        lenient.validation.strict = false;
        let outcome = run_parse(&parse_args, &lenient, &mut Vec::new()).unwrap();
        assert_eq!(outcome, Outcome::Success);
    }

    #[test]
    fn test_parse_error_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let path = write(tmp.path(), "doc.spdx", "SPDXVersion: SPDX-2.3\nPackageName\n");
        assert!(run_parse(&args(path), &ToolConfig::default(), &mut Vec::new()).is_err());

        let unknown = write(tmp.path(), "doc.txt", VALID_TAG_VALUE);
        let err = run_parse(&args(unknown), &ToolConfig::default(), &mut Vec::new()).unwrap_err();
        assert!(format!("{err:#}").contains("Unsupported file format"));
    }
}
