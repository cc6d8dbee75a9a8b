//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use anyhow::Result;
use console::Term;
use console::style;
use std::path::Path;
use std::time::Duration;
use unnest_core::RunSummary;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }

    fn format_duration(duration: Duration) -> String {
        let secs = duration.as_secs_f64();
        if secs >= 60.0 {
            let whole = duration.as_secs();
            format!("{}m {:02}s", whole / 60, whole % 60)
        } else if secs >= 1.0 {
            format!("{secs:.1}s")
        } else {
            format!("{}ms", duration.as_millis())
        }
    }

    fn headline(&self, summary: &RunSummary) -> String {
        match (summary.has_errors(), self.use_colors) {
            (false, true) => format!("{} Extraction complete", style("✓").green().bold()),
            (false, false) => "Extraction complete".to_string(),
            (true, true) => format!(
                "{} Extraction finished with errors",
                style("!").yellow().bold()
            ),
            (true, false) => "Extraction finished with errors".to_string(),
        }
    }

    fn lines(&self, work_dir: &Path, summary: &RunSummary) -> Vec<String> {
        let mut lines = vec![
            self.headline(summary),
            format!("  Directory:  {}", work_dir.display()),
            format!("  Extracted:  {}", summary.successes),
            format!("  Errors:     {}", summary.errors),
            format!("  Archives:   {}", summary.archives_considered),
            format!(
                "  Passes:     {} ({})",
                summary.iterations, summary.stop_reason
            ),
        ];

        if self.verbose {
            lines.push(format!(
                "  Duration:   {}",
                Self::format_duration(summary.duration)
            ));
            for pass in &summary.passes {
                lines.push(format!(
                    "    pass {}: {} found, {} attempted, {} ok, {} failed",
                    pass.iteration, pass.archives_found, pass.attempted, pass.successes, pass.errors
                ));
            }
        }

        lines
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_run_summary(&self, work_dir: &Path, summary: &RunSummary) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        for line in self.lines(work_dir, summary) {
            let _ = self.term.write_line(&line);
        }

        Ok(())
    }

    // Errors already reach stderr through the log.
    fn format_error(&self, _operation: &str, _error: &anyhow::Error) {}
}
