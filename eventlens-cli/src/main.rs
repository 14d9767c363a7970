//! eventlens CLI entry point
//!
//! Parses arguments, initialises logging, dispatches to the subcommand
//! handler and maps failures to process exit codes.

mod cli;
mod commands;
mod error;
mod logging;
mod output;

use clap::Parser;
use colored::Colorize;

use crate::cli::{Cli, Commands};
use crate::error::CliError;
use crate::output::OutputWriter;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init_tracing(&cli) {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }

    let writer = OutputWriter::new(cli.output);

    if let Err(e) = run(cli.command, &writer) {
        tracing::error!(error = %e, exit_code = e.exit_code(), "command failed");
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(e.exit_code());
    }
}

fn run(command: Commands, writer: &OutputWriter) -> Result<(), CliError> {
    match command {
        Commands::Funnel(args) => commands::funnel::execute(args, writer),
        Commands::Count(args) => commands::count::execute(args, writer),
        Commands::Validate(args) => commands::validate::execute(args, writer),
        Commands::Version => commands::version::execute(writer),
    }
}
