//! Per-pass and per-run counters.

use std::fmt;
use std::time::Duration;

/// Counters for a single scan/extract pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IterationResult {
    /// Pass number, starting at 1.
    pub iteration: usize,

    /// Archives found by the scan, including ones handled earlier.
    pub archives_found: usize,

    /// Archives attempted in this pass.
    pub attempted: usize,

    /// Archives extracted, with or without warnings.
    pub successes: usize,

    /// Archives that failed.
    pub errors: usize,
}

impl IterationResult {
    /// Creates empty counters for a pass.
    #[must_use]
    pub fn new(iteration: usize, archives_found: usize) -> Self {
        Self {
            iteration,
            archives_found,
            ..Default::default()
        }
    }
}

/// Why the loop ended.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StopReason {
    /// A scan found no archive files at all.
    NoArchives,
    /// The pass cap was reached.
    #[default]
    IterationCap,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoArchives => f.write_str("no archives found"),
            Self::IterationCap => f.write_str("iteration cap reached"),
        }
    }
}

/// Aggregate result of a whole run.
///
/// Reaching the pass cap is not an error; archives still nested below that
/// depth are left unextracted.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Passes completed, including the one that found nothing.
    pub iterations: usize,

    /// Archives extracted, with or without warnings.
    pub successes: usize,

    /// Failed extraction attempts. A retried archive counts once per attempt.
    pub errors: usize,

    /// Distinct archive paths attempted at least once.
    pub archives_considered: usize,

    /// Why the loop ended.
    pub stop_reason: StopReason,

    /// Counters of every pass, in order.
    pub passes: Vec<IterationResult>,

    /// Wall-clock duration of the run.
    pub duration: Duration,
}

impl RunSummary {
    /// Folds a finished pass into the totals.
    pub fn record(&mut self, pass: IterationResult) {
        self.iterations = pass.iteration;
        self.successes += pass.successes;
        self.errors += pass.errors;
        self.passes.push(pass);
    }

    /// Returns whether any archive failed.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }
}
