//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use clfstat_core::types::DecodeErrorPolicy;

/// Usage line printed when the positional arguments are wrong.
pub const USAGE: &str = "Usage: clfstat <path_to_log_file>";

/// clfstat -- summarize a Common Log Format access log.
///
/// Writes `events.csv` and `summary.json` to the output directory.
#[derive(Parser, Debug)]
#[command(name = "clfstat", version, about, long_about = None)]
pub struct Cli {
    /// Path to the access log file.
    pub log_file: PathBuf,

    /// Path to a clfstat.toml configuration file (optional).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Directory for events.csv and summary.json (default: output).
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// How to handle bytes that are not valid UTF-8 (skip, replace, fail).
    #[arg(long)]
    pub on_decode_error: Option<DecodeErrorPolicy>,

    /// Aggregate in a single pass without keeping events in memory.
    #[arg(long)]
    pub stream: bool,

    /// Completion report format.
    #[arg(long, default_value = "text")]
    pub output: OutputFormat,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable completion banner.
    Text,
    /// Machine-readable JSON.
    Json,
}
