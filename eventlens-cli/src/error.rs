//! CLI-specific error types and exit code mapping

use eventlens_core::error::EventlensError;
use eventlens_log_pipeline::LogPipelineError;

/// CLI-specific error type.
///
/// Each variant carries enough context for a user-friendly message.
/// The `exit_code()` method maps errors to process exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// A subcommand-specific operation failed.
    #[error("{0}")]
    Command(String),

    /// Analyzer or parser construction failed (e.g. an invalid pattern).
    #[error("analysis error: {0}")]
    Analysis(String),

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error while writing output.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped domain error from eventlens-core (log input failures).
    #[error("{0}")]
    Core(#[from] EventlensError),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                                    |
    /// |------|--------------------------------------------|
    /// | 0    | Success (an incomplete funnel included)    |
    /// | 1    | Command / analysis / log input error       |
    /// | 2    | Configuration error                        |
    /// | 10   | IO error                                   |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::Io(_) => 10,
            Self::JsonSerialize(_) | Self::Command(_) | Self::Analysis(_) | Self::Core(_) => 1,
        }
    }
}

impl From<LogPipelineError> for CliError {
    fn from(e: LogPipelineError) -> Self {
        Self::Analysis(e.to_string())
    }
}
