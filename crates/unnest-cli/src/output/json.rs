//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use std::path::Path;
use unnest_core::IterationResult;
use unnest_core::RunSummary;
use unnest_core::StopReason;

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

#[derive(Serialize)]
struct PassOutput {
    iteration: usize,
    archives_found: usize,
    attempted: usize,
    successes: usize,
    errors: usize,
}

impl From<&IterationResult> for PassOutput {
    fn from(pass: &IterationResult) -> Self {
        Self {
            iteration: pass.iteration,
            archives_found: pass.archives_found,
            attempted: pass.attempted,
            successes: pass.successes,
            errors: pass.errors,
        }
    }
}

#[derive(Serialize)]
struct RunOutput {
    work_dir: String,
    iterations: usize,
    stop_reason: &'static str,
    successes: usize,
    errors: usize,
    archives_considered: usize,
    duration_ms: u128,
    passes: Vec<PassOutput>,
}

const fn stop_reason_key(reason: StopReason) -> &'static str {
    match reason {
        StopReason::NoArchives => "no_archives",
        StopReason::IterationCap => "iteration_cap",
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_run_summary(&self, work_dir: &Path, summary: &RunSummary) -> Result<()> {
        let data = RunOutput {
            work_dir: work_dir.display().to_string(),
            iterations: summary.iterations,
            stop_reason: stop_reason_key(summary.stop_reason),
            successes: summary.successes,
            errors: summary.errors,
            archives_considered: summary.archives_considered,
            duration_ms: summary.duration.as_millis(),
            passes: summary.passes.iter().map(PassOutput::from).collect(),
        };

        let output = JsonOutput::success("extract", data);
        Self::output(&output)
    }

    fn format_error(&self, operation: &str, error: &anyhow::Error) {
        let output = JsonOutput::<()>::error(operation, format!("{error:#}"));
        let _ = Self::output(&output);
    }
}
