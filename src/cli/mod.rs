//! Command handlers behind the `spdx-tools`, `spdx-convert` and
//! `spdx-tools3` binaries.
//!
//! Handlers take plain option structs and a writer for their report, so they
//! can be driven from tests. The binaries only parse arguments, install
//! logging and map the [`Outcome`] to an exit code.

mod bump;
mod convert;
mod parse;

pub use bump::{run_bump, BumpArgs};
pub use convert::{run_convert, ConvertArgs};
pub use parse::{run_parse, ParseArgs};

use crate::model::Document;
use crate::validation::validate_full_spdx_document;
use std::io::Write;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Exit code for parse, I/O and other fatal errors.
pub const EXIT_ERROR: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// Validation produced messages and the configuration is strict
    ValidationFailed,
}

impl Outcome {
    #[must_use]
    pub const fn exit_code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::ValidationFailed => 1,
        }
    }
}

/// Installs the `tracing` subscriber. `RUST_LOG` wins over `verbose`.
pub fn init_logging(verbose: bool) {
    let log_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

/// Validates `document` and prints any messages to `out`.
///
/// Returns `ValidationFailed` only when messages were found and `strict` is
/// set; otherwise the messages are reported as warnings.
fn check_document(
    document: &Document,
    spdx_version: Option<&str>,
    strict: bool,
    out: &mut dyn Write,
) -> anyhow::Result<Outcome> {
    let messages = validate_full_spdx_document(document, spdx_version);
    if messages.is_empty() {
        info!("The document is valid.");
        return Ok(Outcome::Success);
    }
    print_messages(&messages, out)?;
    if strict {
        Ok(Outcome::ValidationFailed)
    } else {
        warn!(count = messages.len(), "validation found issues, continuing");
        Ok(Outcome::Success)
    }
}

fn print_messages<M: std::fmt::Display>(messages: &[M], out: &mut dyn Write) -> std::io::Result<()> {
    writeln!(out, "The document is invalid. The following issues have been found:")?;
    for message in messages {
        writeln!(out, "{message}")?;
    }
    Ok(())
}
