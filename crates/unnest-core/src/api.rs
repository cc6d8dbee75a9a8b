//! High-level entry point for nested archive extraction.

use std::path::Path;

use crate::Result;
use crate::RunConfig;
use crate::RunSummary;
use crate::driver::Driver;
use crate::driver::resolve_work_dir;
use crate::event::TracingObserver;
use crate::tool::SevenZip;
use crate::tool::resolve_tool;

/// Recursively extracts every archive under `work_dir` with 7-Zip.
///
/// Each archive is unpacked into a sibling directory named after it with the
/// suffix stripped (`data.tar.gz` into `data/`). Passes repeat so archives
/// revealed by one pass are extracted in the next, up to
/// `config.max_iterations` passes. Source archives are left untouched.
///
/// Progress and per-archive outcomes are emitted as `tracing` events.
///
/// # Arguments
///
/// * `work_dir` - Directory to scan recursively
/// * `tool` - Path to the 7-Zip executable, or a program name on `PATH`
/// * `config` - Run configuration
///
/// # Errors
///
/// Returns an error if:
/// - `work_dir` does not exist or is not a directory
/// - the tool cannot be located
/// - the tool disappears while the run is in progress
///
/// Failures of individual archives are not errors; they are counted in the
/// returned summary.
///
/// # Examples
///
/// ```no_run
/// use unnest_core::RunConfig;
/// use unnest_core::run;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let summary = run("downloads", "7z", &RunConfig::default())?;
/// println!(
///     "{} passes, {} extracted, {} errors",
///     summary.iterations, summary.successes, summary.errors
/// );
/// # Ok(())
/// # }
/// ```
pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(
    work_dir: P,
    tool: Q,
    config: &RunConfig,
) -> Result<RunSummary> {
    let root = resolve_work_dir(work_dir.as_ref())?;
    let tool = resolve_tool(tool.as_ref())?;

    Driver::new(&root, SevenZip::new(tool), TracingObserver, *config)?.run()
}
