//! spdx-tools: parse, print and validate SPDX 2 documents.

use clap::Parser;
use spdx_tools::cli::{self, ParseArgs, EXIT_ERROR};
use spdx_tools::config::{load_or_default, Validatable};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "spdx-tools")]
#[command(author = "Binarly.io")]
#[command(about = "Parse and validate SPDX documents", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success
    1  Validation found issues (strict mode)
    2  Parse, I/O or configuration error

The format is inferred from the file suffix: .spdx/.tag (tag-value), .json,
.yaml/.yml, .xml, .rdf/.rdf.xml (RDF/XML).")]
struct Cli {
    /// SPDX file to read
    #[arg(short, long)]
    file: PathBuf,

    /// Validate against this version (SPDX-2.2 or SPDX-2.3) instead of the
    /// document's own
    #[arg(long)]
    version: Option<String>,

    /// Validate the parsed document
    #[arg(long)]
    validate: bool,

    /// Print the parsed document as tag-value
    #[arg(long)]
    printout: bool,

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

    let args = ParseArgs {
        file: cli.file,
        version: cli.version,
        validate: cli.validate,
        printout: cli.printout,
    };
    match cli::run_parse(&args, &config, &mut std::io::stdout().lock()) {
        Ok(outcome) => ExitCode::from(outcome.exit_code()),
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}
