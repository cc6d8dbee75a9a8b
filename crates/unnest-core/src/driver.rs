//! The iterative discovery-and-extraction loop.
//!
//! Each pass walks the working directory, hands every archive it has not
//! handled yet to the [`Extractor`], and records the outcome. Extracted
//! content lands next to its archive, so archives nested inside it are picked
//! up by the next pass.
//!
//! The loop ends when a scan finds no archive files at all, or when the pass
//! cap is reached. A pass that extracts nothing new does not end the loop.

use crate::RunConfig;
use crate::UnnestError;
use crate::detect::ArchiveCandidate;
use crate::event::RunEvent;
use crate::event::RunObserver;
use crate::report::IterationResult;
use crate::report::RunSummary;
use crate::report::StopReason;
use crate::scan::scan_archives;
use crate::tool::Extractor;
use crate::tool::ToolError;
use crate::tool::ToolOutcome;
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;

/// Archive paths already handled during the current run.
///
/// Grows monotonically. Paths are stored as discovered under the canonical
/// working directory, so one file has exactly one spelling.
#[derive(Debug, Default, Clone)]
pub struct ProcessedSet {
    paths: HashSet<PathBuf>,
}

impl ProcessedSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `path` was handled already.
    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        self.paths.contains(path)
    }

    /// Marks `path` as handled. Returns `false` if it already was.
    pub fn insert(&mut self, path: &Path) -> bool {
        self.paths.insert(path.to_path_buf())
    }

    /// Number of handled paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Returns `true` if nothing was handled yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Canonicalizes the working directory and checks that it is a directory.
///
/// # Errors
///
/// Returns [`UnnestError::WorkDirNotFound`] or [`UnnestError::NotADirectory`].
pub fn resolve_work_dir(work_dir: &Path) -> crate::Result<PathBuf> {
    let root = fs::canonicalize(work_dir).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => UnnestError::WorkDirNotFound {
            path: work_dir.to_path_buf(),
        },
        _ => UnnestError::Io(e),
    })?;

    if !root.is_dir() {
        return Err(UnnestError::NotADirectory {
            path: work_dir.to_path_buf(),
        });
    }

    Ok(root)
}

/// Drives repeated scan/extract passes over one working directory.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use unnest_core::RunConfig;
/// use unnest_core::driver::Driver;
/// use unnest_core::event::TracingObserver;
/// use unnest_core::tool::SevenZip;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let driver = Driver::new(
///     Path::new("downloads"),
///     SevenZip::new("/usr/bin/7z"),
///     TracingObserver,
///     RunConfig::default(),
/// )?;
/// let summary = driver.run()?;
/// println!("{} extracted, {} failed", summary.successes, summary.errors);
/// # Ok(())
/// # }
/// ```
pub struct Driver<E, O> {
    root: PathBuf,
    extractor: E,
    observer: O,
    config: RunConfig,
    processed: ProcessedSet,
    considered: HashSet<PathBuf>,
}

/// Whether the run may continue after handling one archive.
enum Flow {
    Continue,
    Abort(UnnestError),
}

impl<E: Extractor, O: RunObserver> Driver<E, O> {
    /// Checks the preconditions and prepares a run.
    ///
    /// # Errors
    ///
    /// Fails if `work_dir` is not an existing directory, or if the
    /// extractor's program is not an existing file. Nothing is created on
    /// disk in either case.
    pub fn new(
        work_dir: &Path,
        extractor: E,
        observer: O,
        config: RunConfig,
    ) -> crate::Result<Self> {
        let root = resolve_work_dir(work_dir)?;

        if !extractor.program().is_file() {
            return Err(UnnestError::ToolNotFound {
                path: extractor.program().to_path_buf(),
            });
        }

        Ok(Self {
            root,
            extractor,
            observer,
            config,
            processed: ProcessedSet::new(),
            considered: HashSet::new(),
        })
    }

    /// Canonical working directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Runs passes until no archives are found or the cap is reached.
    ///
    /// # Errors
    ///
    /// Returns [`UnnestError::ToolVanished`] if the extractor's program
    /// disappears mid-run. Remaining archives are not attempted. Every other
    /// failure is per archive and only shows up in the counters.
    pub fn run(mut self) -> crate::Result<RunSummary> {
        let started = Instant::now();
        let max_iterations = self.config.max_iterations.get();
        let mut summary = RunSummary::default();

        self.observer.on_event(&RunEvent::RunStarted {
            root: &self.root,
            tool: self.extractor.program(),
            max_iterations,
        });

        for iteration in 1..=max_iterations {
            self.observer.on_event(&RunEvent::IterationStarted {
                iteration,
                max_iterations,
            });

            let scan = scan_archives(&self.root);
            for skipped in &scan.skipped {
                self.observer.on_event(&RunEvent::ScanSkipped {
                    path: skipped.path.as_deref(),
                    reason: &skipped.reason,
                });
            }

            if scan.candidates.is_empty() {
                self.observer
                    .on_event(&RunEvent::NoArchivesFound { iteration });
                summary.iterations = iteration;
                summary.stop_reason = StopReason::NoArchives;
                break;
            }

            let mut pass = IterationResult::new(iteration, scan.candidates.len());
            for candidate in &scan.candidates {
                if self.processed.contains(candidate.path()) {
                    continue;
                }
                if let Flow::Abort(err) = self.process(candidate, &mut pass) {
                    return Err(err);
                }
            }

            self.observer
                .on_event(&RunEvent::IterationFinished { result: &pass });
            if iteration > 1 && pass.successes == 0 {
                self.observer.on_event(&RunEvent::NoNewArchives { iteration });
            }
            summary.record(pass);
        }

        summary.archives_considered = self.considered.len();
        summary.duration = started.elapsed();
        self.observer
            .on_event(&RunEvent::RunFinished { summary: &summary });

        Ok(summary)
    }

    fn process(&mut self, candidate: &ArchiveCandidate, pass: &mut IterationResult) -> Flow {
        let archive = candidate.path();
        let dest = candidate.destination();

        pass.attempted += 1;
        self.considered.insert(archive.to_path_buf());
        self.observer.on_event(&RunEvent::ArchiveFound {
            archive,
            dest: &dest,
        });

        // Existing content is kept; the tool overwrites on conflict.
        if let Err(error) = fs::create_dir_all(&dest) {
            self.observer.on_event(&RunEvent::DestinationFailed {
                archive,
                dest: &dest,
                error: &error,
            });
            pass.errors += 1;
            self.processed.insert(archive);
            return Flow::Continue;
        }
        self.observer
            .on_event(&RunEvent::DestinationReady { dest: &dest });

        let command = self.extractor.command_line(archive, &dest);
        self.observer.on_event(&RunEvent::CommandStarted {
            archive,
            dest: &dest,
            command: &command,
        });
        let output = match self.extractor.extract(archive, &dest) {
            Ok(output) => output,
            Err(ToolError::NotFound { program }) => {
                self.observer
                    .on_event(&RunEvent::ToolVanished { tool: &program });
                return Flow::Abort(UnnestError::ToolVanished { path: program });
            }
            Err(error) => {
                self.observer.on_event(&RunEvent::ExtractionCrashed {
                    archive,
                    error: &error,
                });
                pass.errors += 1;
                self.processed.insert(archive);
                return Flow::Continue;
            }
        };

        match output.outcome() {
            ToolOutcome::Success => {
                self.observer.on_event(&RunEvent::Extracted { archive });
                pass.successes += 1;
                self.processed.insert(archive);
            }
            ToolOutcome::Warning => {
                self.observer.on_event(&RunEvent::ExtractedWithWarnings {
                    archive,
                    output: &output,
                });
                pass.successes += 1;
                self.processed.insert(archive);
            }
            outcome @ (ToolOutcome::Fatal | ToolOutcome::Failed(_) | ToolOutcome::Terminated) => {
                let retryable = outcome.is_retryable();
                self.observer.on_event(&RunEvent::ExtractionFailed {
                    archive,
                    output: &output,
                    retryable,
                });
                pass.errors += 1;
                if !retryable {
                    self.processed.insert(archive);
                }
            }
        }

        Flow::Continue
    }
}
