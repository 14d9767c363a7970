//! `eventlens version` command handler

use std::io::Write;

use serde::Serialize;

use crate::error::CliError;
use crate::output::{OutputWriter, Render};

const UNKNOWN: &str = "unknown";

/// Execute the `version` command.
pub fn execute(writer: &OutputWriter) -> Result<(), CliError> {
    writer.render(&VersionInfo::current())
}

/// Version and build information.
#[derive(Debug, Serialize)]
pub struct VersionInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub build_date: &'static str,
    pub git_commit: &'static str,
}

impl VersionInfo {
    /// Build information baked in at compile time.
    pub fn current() -> Self {
        Self {
            name: "eventlens",
            version: env!("CARGO_PKG_VERSION"),
            build_date: option_env!("EVENTLENS_BUILD_DATE").unwrap_or(UNKNOWN),
            git_commit: option_env!("EVENTLENS_GIT_COMMIT").unwrap_or(UNKNOWN),
        }
    }
}

impl Render for VersionInfo {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        writeln!(w, "{} {}", self.name, self.version)?;
        writeln!(w, "Build Date: {}", self.build_date)?;
        writeln!(w, "Git Commit: {}", self.git_commit)?;
        Ok(())
    }
}
