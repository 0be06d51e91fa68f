//! spdx-convert: convert SPDX 2 documents between serializations.

use clap::Parser;
use spdx_tools::cli::{self, ConvertArgs, EXIT_ERROR};
use spdx_tools::config::{load_or_default, Validatable};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "spdx-convert")]
#[command(author = "Binarly.io")]
#[command(about = "Convert SPDX documents between formats", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success
    1  The document did not validate and nothing was written
    2  Parse, I/O or configuration error

EXAMPLES:
    spdx-convert --infile sbom.spdx --outfile sbom.spdx.json
    spdx-convert --infile sbom.json --outfile sbom.rdf.xml --novalidation")]
struct Cli {
    /// Input file
    #[arg(short, long)]
    infile: PathBuf,

    /// Output file; its suffix selects the format
    #[arg(short, long)]
    outfile: PathBuf,

    /// Write the document even if it does not validate
    #[arg(long)]
    novalidation: bool,

    /// Validate against this version (SPDX-2.2 or SPDX-2.3)
    #[arg(long)]
    version: Option<String>,

    /// Configuration file
    #[arg(long, env = "SPDX_TOOLS_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    cli::init_logging(cli.verbose);

    let (config, _) = load_or_default(cli.config.as_deref());
    let errors = config.validate();
    if !errors.is_empty() {
        for error in &errors {
            eprintln!("Error: {error}");
        }
        return ExitCode::from(EXIT_ERROR);
    }

    let args = ConvertArgs {
        infile: cli.infile,
        outfile: cli.outfile,
        novalidation: cli.novalidation,
        version: cli.version,
    };
    match cli::run_convert(&args, &config, &mut std::io::stdout().lock()) {
        Ok(outcome) => ExitCode::from(outcome.exit_code()),
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}
