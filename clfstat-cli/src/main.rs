//! clfstat -- Common Log Format access log summarizer
//!
//! Reads one access log, writes `events.csv` and `summary.json`, and
//! prints a completion banner on stdout. Diagnostics go to stderr.

mod cli;
mod commands;
mod error;
mod logging;
mod output;

use clap::Parser;
use clap::error::ErrorKind;

use crate::cli::{Cli, USAGE};
use crate::error::CliError;
use crate::output::OutputWriter;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => {
                eprint!("{e}");
                println!("{USAGE}");
                std::process::exit(CliError::Usage(e.to_string()).exit_code());
            }
        },
    };

    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = commands::analyze::resolve_config(&cli)?;

    logging::init_tracing(&config.general).map_err(|e| CliError::Logging(e.to_string()))?;

    tracing::info!(
        log_file = %cli.log_file.display(),
        config = ?cli.config,
        "clfstat starting"
    );

    let writer = OutputWriter::new(cli.output);
    commands::analyze::execute(&cli, &config, &writer)
}
