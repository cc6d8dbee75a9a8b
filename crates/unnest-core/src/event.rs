//! Structured events emitted by the driver.
//!
//! The driver never writes log lines itself. It reports what happens to a
//! [`RunObserver`], and the observer decides how and where to record it.
//! [`TracingObserver`] forwards everything to `tracing`.

use crate::report::IterationResult;
use crate::report::RunSummary;
use crate::tool::ToolOutput;
use std::path::Path;
use tracing::debug;
use tracing::error;
use tracing::info;
use tracing::warn;

/// Something that happened during a run.
#[derive(Debug)]
pub enum RunEvent<'a> {
    /// Startup checks passed; configuration summary.
    RunStarted {
        /// Canonical working directory.
        root: &'a Path,
        /// Resolved extraction tool.
        tool: &'a Path,
        /// Pass cap.
        max_iterations: usize,
    },
    /// A pass begins (1-based).
    IterationStarted {
        /// Current pass.
        iteration: usize,
        /// Pass cap.
        max_iterations: usize,
    },
    /// The walk could not read an entry.
    ScanSkipped {
        /// Entry path, if known.
        path: Option<&'a Path>,
        /// Reason reported by the walker.
        reason: &'a str,
    },
    /// The walk found no archives at all; the run stops.
    NoArchivesFound {
        /// Current pass.
        iteration: usize,
    },
    /// A new archive is about to be extracted.
    ArchiveFound {
        /// Archive path.
        archive: &'a Path,
        /// Destination directory.
        dest: &'a Path,
    },
    /// The destination directory exists.
    DestinationReady {
        /// Destination directory.
        dest: &'a Path,
    },
    /// The destination directory could not be created.
    DestinationFailed {
        /// Archive path.
        archive: &'a Path,
        /// Destination directory.
        dest: &'a Path,
        /// Underlying error.
        error: &'a std::io::Error,
    },
    /// The tool is about to run.
    CommandStarted {
        /// Archive path.
        archive: &'a Path,
        /// Destination directory.
        dest: &'a Path,
        /// Full command line.
        command: &'a str,
    },
    /// The tool exited with 0.
    Extracted {
        /// Archive path.
        archive: &'a Path,
    },
    /// The tool exited with 1.
    ExtractedWithWarnings {
        /// Archive path.
        archive: &'a Path,
        /// Captured output.
        output: &'a ToolOutput,
    },
    /// The tool exited with 2 or another non-zero status.
    ExtractionFailed {
        /// Archive path.
        archive: &'a Path,
        /// Captured output.
        output: &'a ToolOutput,
        /// Whether a later pass will try again.
        retryable: bool,
    },
    /// Running the tool failed in an unexpected way.
    ExtractionCrashed {
        /// Archive path.
        archive: &'a Path,
        /// Description of the failure.
        error: &'a dyn std::error::Error,
    },
    /// The tool executable disappeared; the run aborts.
    ToolVanished {
        /// Tool path.
        tool: &'a Path,
    },
    /// A pass finished.
    IterationFinished {
        /// Pass counters.
        result: &'a IterationResult,
    },
    /// A pass after the first extracted nothing new. The run continues.
    NoNewArchives {
        /// Current pass.
        iteration: usize,
    },
    /// The run is over.
    RunFinished {
        /// Aggregate counters.
        summary: &'a RunSummary,
    },
}

/// Receives driver events.
pub trait RunObserver {
    /// Called for every event, in order.
    fn on_event(&mut self, event: &RunEvent<'_>);
}

impl<T: RunObserver + ?Sized> RunObserver for &mut T {
    fn on_event(&mut self, event: &RunEvent<'_>) {
        (**self).on_event(event);
    }
}

/// Observer that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl RunObserver for NoopObserver {
    fn on_event(&mut self, _event: &RunEvent<'_>) {}
}

/// Observer that emits every event through `tracing`.
///
/// Successes and progress go out at `info`, exit code 1 at `warn`, failures
/// at `error`, and per-step detail at `debug`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl RunObserver for TracingObserver {
    #[allow(clippy::too_many_lines)]
    fn on_event(&mut self, event: &RunEvent<'_>) {
        match event {
            RunEvent::RunStarted {
                root,
                tool,
                max_iterations,
            } => {
                info!(root = %root.display(), "starting recursive extraction");
                info!(tool = %tool.display(), "using extraction tool");
                info!(max_iterations, "maximum number of passes");
                warn!("source archives will NOT be deleted");
                warn!("existing files in destination directories will be overwritten");
            }
            RunEvent::IterationStarted {
                iteration,
                max_iterations,
            } => info!("--- pass {iteration} of {max_iterations} ---"),
            RunEvent::ScanSkipped { path, reason } => match path {
                Some(path) => warn!(path = %path.display(), reason, "skipping unreadable entry"),
                None => warn!(reason, "skipping unreadable entry"),
            },
            RunEvent::NoArchivesFound { iteration } => {
                info!(iteration, "no archive files found");
            }
            RunEvent::ArchiveFound { archive, dest } => {
                info!(archive = %archive.display(), "found archive to process");
                info!(dest = %dest.display(), "extracting into");
            }
            RunEvent::DestinationReady { dest } => {
                debug!(dest = %dest.display(), "destination directory ready");
            }
            RunEvent::DestinationFailed {
                archive,
                dest,
                error,
            } => error!(
                archive = %archive.display(),
                dest = %dest.display(),
                %error,
                "cannot create destination directory"
            ),
            RunEvent::CommandStarted {
                archive,
                dest,
                command,
            } => debug!(
                archive = %archive.display(),
                dest = %dest.display(),
                command,
                "running extraction tool"
            ),
            RunEvent::Extracted { archive } => {
                info!(archive = %archive.display(), "extracted successfully");
            }
            RunEvent::ExtractedWithWarnings { archive, output } => warn!(
                archive = %archive.display(),
                code = ?output.status,
                stdout = output.stdout.trim(),
                stderr = output.stderr.trim(),
                "extracted with warnings"
            ),
            RunEvent::ExtractionFailed {
                archive,
                output,
                retryable,
            } => error!(
                archive = %archive.display(),
                code = ?output.status,
                command = %output.command,
                stdout = output.stdout.trim(),
                stderr = output.stderr.trim(),
                retryable,
                "extraction failed"
            ),
            RunEvent::ExtractionCrashed { archive, error } => error!(
                archive = %archive.display(),
                error = ?error,
                "unexpected failure while running extraction tool"
            ),
            RunEvent::ToolVanished { tool } => error!(
                tool = %tool.display(),
                "extraction tool can no longer be found, aborting"
            ),
            RunEvent::IterationFinished { result } => info!(
                iteration = result.iteration,
                found = result.archives_found,
                attempted = result.attempted,
                successes = result.successes,
                errors = result.errors,
                "pass finished"
            ),
            RunEvent::NoNewArchives { iteration } => info!(
                iteration,
                "no new archive extracted in this pass, useful work is probably done"
            ),
            RunEvent::RunFinished { summary } => {
                info!("--- extraction finished ---");
                info!(iterations = summary.iterations, stop = %summary.stop_reason, "passes completed");
                info!(successes = summary.successes, "archives extracted (including warnings)");
                info!(errors = summary.errors, "extraction errors");
                info!(
                    archives = summary.archives_considered,
                    "unique archive paths considered"
                );
            }
        }
    }
}
