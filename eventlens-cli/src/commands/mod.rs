//! Command handlers -- one module per subcommand

pub mod count;
pub mod funnel;
pub mod validate;
pub mod version;

use std::path::Path;

use tracing::{info, warn};

use eventlens_core::config::ParserConfig;
use eventlens_core::pipeline::LogParser;
use eventlens_core::types::LogEntry;
use eventlens_log_pipeline::parser;

use crate::error::CliError;

/// Load the parser configuration and build the matching parser.
pub(crate) fn load_parser(path: &Path) -> Result<Box<dyn LogParser>, CliError> {
    let config = ParserConfig::load(path).map_err(|e| CliError::Config(e.to_string()))?;
    Ok(parser::build(&config)?)
}

/// Read every entry from the log file, or from stdin when no file is given.
pub(crate) fn read_entries(
    parser: &dyn LogParser,
    log_file: Option<&Path>,
) -> Result<Vec<LogEntry>, CliError> {
    let entries = match log_file {
        Some(path) => {
            info!(path = %path.display(), format = parser.format_name(), "reading log file");
            parser.parse_file(path)?
        }
        None => {
            info!(format = parser.format_name(), "reading log from stdin");
            let stdin = std::io::stdin();
            let mut handle = stdin.lock();
            parser.parse_reader(&mut handle)?
        }
    };

    if entries.is_empty() {
        warn!("no log entries parsed from input");
    }
    Ok(entries)
}
