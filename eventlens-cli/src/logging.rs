//! Logging initialization for the eventlens CLI.
//!
//! Configures `tracing-subscriber` from the global CLI flags. Diagnostics
//! always go to stderr so stdout carries only the result document.

use anyhow::Result;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::cli::{Cli, LogOutputFormat};

/// Filter directive used when neither `RUST_LOG` nor a CLI flag asks for logs.
const QUIET_FILTER: &str = "off";

/// Resolve the filter directive from the CLI flags.
///
/// `--log-level` wins over `--verbose`; without either, logging is disabled.
pub fn filter_directive(cli: &Cli) -> String {
    match (&cli.log_level, cli.verbose) {
        (Some(level), _) => level.clone(),
        (None, true) => "debug".to_owned(),
        (None, false) => QUIET_FILTER.to_owned(),
    }
}

/// Initialize the global tracing subscriber.
///
/// Must be called exactly once, before any tracing macros are used.
/// `RUST_LOG` takes precedence over every CLI flag.
pub fn init_tracing(cli: &Cli) -> Result<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(filter_directive(cli)).map_err(|e| {
            anyhow::anyhow!("invalid log level '{}': {}", filter_directive(cli), e)
        })?,
    };

    match cli.log_format {
        LogOutputFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .try_init()
                .map_err(|e| {
                    anyhow::anyhow!("failed to initialize JSON tracing subscriber: {}", e)
                })?;
        }
        LogOutputFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .pretty()
                        .with_writer(std::io::stderr),
                )
                .try_init()
                .map_err(|e| {
                    anyhow::anyhow!("failed to initialize pretty tracing subscriber: {}", e)
                })?;
        }
    }

    Ok(())
}
