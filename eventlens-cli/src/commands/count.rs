//! `eventlens count` command handler

use tracing::info;

use eventlens_log_pipeline::CountAnalyzer;

use super::{load_parser, read_entries};
use crate::cli::CountArgs;
use crate::error::CliError;
use crate::output::OutputWriter;

/// Execute the `count` command.
pub fn execute(args: CountArgs, writer: &OutputWriter) -> Result<(), CliError> {
    if args.patterns.is_empty() {
        return Err(CliError::Command(
            "at least one pattern is required".to_owned(),
        ));
    }

    let parser = load_parser(&args.parser_config)?;
    let analyzer = CountAnalyzer::new(&args.patterns)?;

    let entries = read_entries(parser.as_ref(), args.log_file.as_deref())?;
    let result = analyzer.analyze(&entries);

    info!(
        entries = result.total_events_analyzed,
        patterns = analyzer.pattern_count(),
        matches = result.total_matches(),
        "count analysis finished"
    );

    writer.render(&result)
}
