//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// eventlens -- funnel and event count analysis for application logs.
///
/// Use `eventlens <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "eventlens", version, about, long_about = None)]
pub struct Cli {
    /// Output format.
    #[arg(short, long, global = true, default_value = "text")]
    pub output: OutputFormat,

    /// Override log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Diagnostic log format, written to stderr.
    #[arg(long, global = true, default_value = "pretty")]
    pub log_format: LogOutputFormat,

    /// Enable debug diagnostics (same as `--log-level debug`).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

/// Supported diagnostic log formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogOutputFormat {
    /// Human-readable multi-line output.
    Pretty,
    /// JSON lines.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a sequential funnel analysis over a log.
    Funnel(FunnelArgs),

    /// Count log entries matching each pattern.
    Count(CountArgs),

    /// Validate parser and funnel configuration files.
    Validate(ValidateArgs),

    /// Show version and build information.
    Version,
}

// ---- funnel ----

/// Run a funnel analysis.
#[derive(Args, Debug)]
pub struct FunnelArgs {
    /// Parser configuration file (YAML).
    #[arg(short = 'p', long = "parser-config")]
    pub parser_config: PathBuf,

    /// Funnel configuration file (YAML).
    #[arg(short = 'f', long = "funnel-config")]
    pub funnel_config: PathBuf,

    /// Log file to analyze (default: stdin).
    #[arg(short = 'l', long = "log-file", alias = "log")]
    pub log_file: Option<PathBuf>,

    /// Stop after this many completed conversions (0 = unlimited).
    #[arg(long, default_value_t = 0)]
    pub limit: usize,
}

// ---- count ----

/// Count pattern matches.
#[derive(Args, Debug)]
pub struct CountArgs {
    /// Parser configuration file (YAML).
    #[arg(short = 'p', long = "parser-config")]
    pub parser_config: PathBuf,

    /// Log file to analyze (default: stdin).
    #[arg(short = 'l', long = "log-file", alias = "log")]
    pub log_file: Option<PathBuf>,

    /// Event patterns (regular expressions), reported in the given order.
    #[arg(required = true, num_args = 1..)]
    pub patterns: Vec<String>,
}

// ---- validate ----

/// Validate configuration files without running an analysis.
#[derive(Args, Debug)]
#[command(group(
    clap::ArgGroup::new("target")
        .required(true)
        .multiple(true)
        .args(["parser_config", "funnel_config"])
))]
pub struct ValidateArgs {
    /// Parser configuration file (YAML).
    #[arg(short = 'p', long = "parser-config")]
    pub parser_config: Option<PathBuf>,

    /// Funnel configuration file (YAML).
    #[arg(short = 'f', long = "funnel-config")]
    pub funnel_config: Option<PathBuf>,
}
