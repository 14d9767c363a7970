//! `eventlens funnel` command handler

use tracing::info;

use eventlens_core::config::FunnelConfig;
use eventlens_log_pipeline::FunnelAnalyzer;

use super::{load_parser, read_entries};
use crate::cli::FunnelArgs;
use crate::error::CliError;
use crate::output::OutputWriter;

/// Execute the `funnel` command.
///
/// An incomplete funnel is a normal result and does not produce an error.
pub fn execute(args: FunnelArgs, writer: &OutputWriter) -> Result<(), CliError> {
    let parser = load_parser(&args.parser_config)?;
    let funnel_config =
        FunnelConfig::load(&args.funnel_config).map_err(|e| CliError::Config(e.to_string()))?;
    let analyzer = FunnelAnalyzer::new(&funnel_config)?;

    let entries = read_entries(parser.as_ref(), args.log_file.as_deref())?;
    let result = analyzer.analyze(&entries, args.limit);

    info!(
        funnel = %result.funnel_name,
        entries = result.total_events_analyzed,
        completed = result.funnel_completed,
        "funnel analysis finished"
    );

    writer.render(&result)
}
