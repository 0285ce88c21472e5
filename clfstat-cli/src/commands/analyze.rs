//! `clfstat <LOG_FILE>` command handler

use std::io::Write;

use tracing::{debug, info};

use clfstat_core::config::ClfstatConfig;
use clfstat_log_pipeline::{AccessLogPipeline, PipelineConfig, RunReport};

use crate::cli::Cli;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Resolve the effective configuration.
///
/// Priority: CLI flag > environment variable > config file > built-in default.
/// A missing `--config` flag means defaults plus environment overrides.
pub fn resolve_config(cli: &Cli) -> Result<ClfstatConfig, CliError> {
    let mut config = ClfstatConfig::load_or_default(cli.config.as_deref())?;

    if let Some(level) = &cli.log_level {
        config.general.log_level = level.to_lowercase();
    }
    if let Some(dir) = &cli.output_dir {
        config.report.output_dir = dir.to_string_lossy().into_owned();
    }
    if let Some(policy) = cli.on_decode_error {
        config.parser.on_decode_error = policy;
    }
    if cli.stream {
        config.report.retain_events = false;
    }

    config.validate()?;
    Ok(config)
}

/// Execute the analysis: parse, aggregate, write reports, print the completion banner.
pub fn execute(cli: &Cli, config: &ClfstatConfig, writer: &OutputWriter) -> Result<(), CliError> {
    let mut pipeline_config = PipelineConfig::from_core(config);
    if let Some(dir) = &cli.output_dir {
        // keep the original path; the config copy above is lossy for non-UTF-8 names
        pipeline_config.output_dir = dir.clone();
    }
    debug!(?pipeline_config, "pipeline configuration resolved");

    let pipeline = AccessLogPipeline::new(pipeline_config)?;
    let report = pipeline.run(&cli.log_file)?;

    info!(
        path = %cli.log_file.display(),
        events = report.events_parsed,
        "analysis complete"
    );

    writer.render(&report)?;
    Ok(())
}

impl Render for RunReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "{}", "✅ Done".green().bold())?;
        writeln!(w, "- Parsed events: {}", self.events_parsed)?;
        writeln!(w, "- CSV: {}", self.csv_path.display())?;
        writeln!(w, "- Summary: {}", self.summary_path.display())?;
        Ok(())
    }
}
