//! spdx-tools3: upgrade an SPDX 2 document to an SPDX 3 JSON-LD payload.

use clap::Parser;
use spdx_tools::cli::{self, BumpArgs, EXIT_ERROR};
use spdx_tools::config::{load_or_default, Validatable};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "spdx-tools3")]
#[command(author = "Binarly.io")]
#[command(version, about = "Convert SPDX 2 documents to SPDX 3", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success
    1  The input did not validate (strict mode)
    2  Parse, I/O or configuration error

Fields without an SPDX 3 counterpart are reported as warnings and dropped.")]
struct Cli {
    /// SPDX 2 input file
    #[arg(short, long)]
    infile: PathBuf,

    /// JSON-LD output file (stdout if omitted)
    #[arg(short, long)]
    outfile: Option<PathBuf>,

    /// Convert without validating the input
    #[arg(long)]
    novalidation: bool,

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

    let args = BumpArgs {
        infile: cli.infile,
        outfile: cli.outfile,
        novalidation: cli.novalidation,
    };
    match cli::run_bump(&args, &config, &mut std::io::stdout().lock()) {
        Ok(outcome) => ExitCode::from(outcome.exit_code()),
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}
