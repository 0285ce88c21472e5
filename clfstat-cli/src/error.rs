//! CLI-specific error types and exit code mapping

use clfstat_core::error::ClfstatError;
use clfstat_log_pipeline::LogPipelineError;

/// CLI-specific error type.
///
/// Each variant carries enough context for a user-friendly message.
/// The `exit_code()` method maps errors to process exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Wrong command-line arguments.
    #[error("{0}")]
    Usage(String),

    /// Logging subscriber could not be installed.
    #[error("logging error: {0}")]
    Logging(String),

    /// Access log processing failed.
    #[error("{0}")]
    Pipeline(#[from] LogPipelineError),

    /// Wrapped domain error from clfstat-core (configuration loading and validation).
    #[error("{0}")]
    Core(#[from] ClfstatError),

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                                   |
    /// |------|-------------------------------------------|
    /// | 0    | Success                                   |
    /// | 1    | Usage / general error                     |
    /// | 2    | Configuration error                       |
    /// | 3    | Undecodable input under the `fail` policy |
    /// | 10   | IO error (input missing, output unwritable) |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Usage(_) | Self::Logging(_) | Self::JsonSerialize(_) => 1,
            Self::Io(_) => 10,
            Self::Core(e) => match e {
                ClfstatError::Config(_) => 2,
                ClfstatError::Io(_) => 10,
                ClfstatError::Pipeline(_) => 1,
            },
            Self::Pipeline(e) => match e {
                LogPipelineError::Decode { .. } => 3,
                LogPipelineError::Config { .. } => 2,
                LogPipelineError::Open { .. } | LogPipelineError::Io(_) => 10,
                LogPipelineError::Csv(csv_err) if csv_err.is_io_error() => 10,
                LogPipelineError::Json(json_err) if json_err.is_io() => 10,
                _ => 1,
            },
        }
    }
}
