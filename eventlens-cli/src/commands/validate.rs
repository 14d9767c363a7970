//! `eventlens validate` command handler

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use eventlens_core::config::{FunnelConfig, ParserConfig};
use eventlens_core::error::{ConfigError, EventlensError};
use eventlens_log_pipeline::{FunnelAnalyzer, parser};

use crate::cli::ValidateArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `validate` command.
///
/// Every requested file is checked and reported before the command fails,
/// so one invalid file does not hide problems in the other.
pub fn execute(args: ValidateArgs, writer: &OutputWriter) -> Result<(), CliError> {
    let mut report = ValidationReport::default();

    if let Some(path) = args.parser_config.as_deref() {
        report.files.push(validate_parser(path));
    }
    if let Some(path) = args.funnel_config.as_deref() {
        report.files.push(validate_funnel(path));
    }

    if report.files.is_empty() {
        return Err(CliError::Command(
            "nothing to validate: pass --parser-config and/or --funnel-config".to_owned(),
        ));
    }

    writer.render(&report)?;

    if !report.valid() {
        return Err(CliError::Config("configuration is invalid".to_owned()));
    }
    Ok(())
}

/// Load the parser document and build the parser it describes.
fn validate_parser(path: &Path) -> FileValidation {
    info!(path = %path.display(), "validating parser configuration");

    let result = ParserConfig::load(path).and_then(|config| {
        parser::build(&config)?;
        Ok(())
    });
    FileValidation::from_result(ConfigKind::Parser, path, result)
}

/// Load the funnel document and compile every step.
fn validate_funnel(path: &Path) -> FileValidation {
    info!(path = %path.display(), "validating funnel configuration");

    let result = FunnelConfig::load(path).and_then(|config| {
        FunnelAnalyzer::new(&config)?;
        Ok(())
    });
    FileValidation::from_result(ConfigKind::Funnel, path, result)
}

/// Flatten an error into one message per violation.
fn error_messages(err: EventlensError) -> Vec<String> {
    match err {
        EventlensError::Config(ConfigError::Multiple(errors)) => {
            errors.iter().map(ToString::to_string).collect()
        }
        other => vec![other.to_string()],
    }
}

/// Kind of configuration document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigKind {
    Parser,
    Funnel,
}

impl ConfigKind {
    fn label(self) -> &'static str {
        match self {
            Self::Parser => "Parser config",
            Self::Funnel => "Funnel config",
        }
    }
}

/// Validation result for one file.
#[derive(Debug, Serialize)]
pub struct FileValidation {
    /// Document kind
    pub kind: ConfigKind,
    /// File path as given on the command line
    pub source: String,
    /// Whether the file is valid
    pub valid: bool,
    /// Validation error messages (empty if valid)
    pub errors: Vec<String>,
}

impl FileValidation {
    fn from_result(kind: ConfigKind, path: &Path, result: Result<(), EventlensError>) -> Self {
        let errors = match result {
            Ok(()) => Vec::new(),
            Err(e) => error_messages(e),
        };
        Self {
            kind,
            source: path.display().to_string(),
            valid: errors.is_empty(),
            errors,
        }
    }
}

/// Validation report for all requested files.
#[derive(Debug, Default, Serialize)]
pub struct ValidationReport {
    /// Per-file results, parser first
    pub files: Vec<FileValidation>,
}

impl ValidationReport {
    /// True when every file is valid.
    pub fn valid(&self) -> bool {
        self.files.iter().all(|f| f.valid)
    }
}

impl Render for ValidationReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        for file in &self.files {
            writeln!(w, "{}: {}", file.kind.label(), file.source.bold())?;
            if file.valid {
                writeln!(w, "  Result: {}", "VALID".green().bold())?;
            } else {
                writeln!(w, "  Result: {}", "INVALID".red().bold())?;
                for err in &file.errors {
                    writeln!(w, "  Error: {}", err.red())?;
                }
            }
        }

        Ok(())
    }
}
