//! Output formatting abstraction for text vs JSON rendering
//!
//! All subcommand output flows through [`OutputWriter`] which handles format switching.
//! Analysis results are rendered here as well, so command handlers never format text.

use std::io::Write;

use colored::Colorize;
use serde::Serialize;

use eventlens_log_pipeline::{CountResult, FunnelResult};

use crate::cli::OutputFormat;
use crate::error::CliError;

/// Abstraction for writing CLI output in different formats.
///
/// Subcommand handlers call `writer.render(&payload)` where `payload`
/// implements both `Serialize` (for JSON) and `Render` (for text).
pub struct OutputWriter {
    format: OutputFormat,
}

impl OutputWriter {
    /// Create a new output writer with the specified format.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Render a payload to stdout.
    pub fn render<T: Render + Serialize>(&self, payload: &T) -> Result<(), CliError> {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        self.render_to(payload, &mut handle)
    }

    /// Render a payload to an arbitrary writer.
    ///
    /// For `Text` format, delegates to `Render::render_text()`.
    /// For `Json` format, pretty-prints via `serde_json` followed by a newline.
    pub fn render_to<T: Render + Serialize>(
        &self,
        payload: &T,
        w: &mut dyn Write,
    ) -> Result<(), CliError> {
        match self.format {
            OutputFormat::Text => {
                payload.render_text(w)?;
            }
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *w, payload)?;
                writeln!(w)?;
            }
        }
        w.flush()?;
        Ok(())
    }
}

/// Trait for human-readable text rendering.
///
/// Implemented by every CLI output payload alongside `serde::Serialize`.
pub trait Render {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()>;
}

impl Render for FunnelResult {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        if self.total_events_analyzed == 0 {
            return writeln!(w, "{}", "❌ No events found".red());
        }

        let header = "Funnel Analysis Complete";
        if self.funnel_completed {
            writeln!(w, "✅ {}", header.green().bold())?;
        } else {
            writeln!(w, "❌ {}", header.yellow().bold())?;
        }
        writeln!(w)?;
        writeln!(w, "Funnel: {}", self.funnel_name.bold())?;
        writeln!(w, "Total Events Analyzed: {}", self.total_events_analyzed)?;
        writeln!(
            w,
            "Funnel Completed: {}",
            if self.funnel_completed { "Yes" } else { "No" }
        )?;
        writeln!(w)?;

        writeln!(w, "{}", "Step Breakdown:".bold())?;
        for (i, step) in self.steps.iter().enumerate() {
            writeln!(
                w,
                "  {}. {}: {} events ({:.1}%)",
                i + 1,
                step.name,
                step.event_count,
                step.percentage
            )?;
        }

        if !self.drop_offs.is_empty() {
            writeln!(w)?;
            writeln!(w, "{}", "Drop-off Analysis:".bold())?;
            for drop in &self.drop_offs {
                writeln!(
                    w,
                    "  - {} → {}: {} events lost ({:.1}% drop-off)",
                    drop.from, drop.to, drop.events_lost, drop.drop_off_rate
                )?;
            }
        }

        Ok(())
    }
}

impl Render for CountResult {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        if self.total_events_analyzed == 0 {
            return writeln!(w, "{}", "❌ No events found".red());
        }

        writeln!(w, "📊 {}", "Event Count Analysis Complete".green().bold())?;
        writeln!(w)?;
        writeln!(w, "Total Events Analyzed: {}", self.total_events_analyzed)?;
        writeln!(w)?;

        writeln!(w, "{}", "Pattern Counts:".bold())?;
        let total = self.total_events_analyzed as f64;
        for (i, pc) in self.pattern_counts.iter().enumerate() {
            writeln!(
                w,
                "  {}. {}: {} matches ({:.1}%)",
                i + 1,
                pc.pattern,
                pc.count,
                pc.count as f64 / total * 100.0
            )?;
        }
        writeln!(w)?;
        writeln!(w, "Total Matches: {}", self.total_matches())?;

        Ok(())
    }
}
