//! Error conversion utilities for CLI.
//!
//! Converts unnest-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use std::path::Path;
use unnest_core::UnnestError;

/// Converts `UnnestError` to user-friendly anyhow error with context
pub fn convert_run_error(err: UnnestError, work_dir: &Path) -> anyhow::Error {
    match err {
        UnnestError::WorkDirNotFound { path } => {
            anyhow!(
                "Working directory '{}' does not exist\n\
                 HINT: Pass the directory that holds the downloaded archives.",
                path.display()
            )
        }
        UnnestError::NotADirectory { path } => {
            anyhow!(
                "'{}' is not a directory\n\
                 HINT: Pass the directory containing the archive, not the archive itself.",
                path.display()
            )
        }
        UnnestError::ToolNotFound { path } => {
            anyhow!(
                "7-Zip executable not found: {}\n\
                 HINT: Install 7-Zip or point --tool at the 7z executable.",
                path.display()
            )
        }
        UnnestError::ToolVanished { path } => {
            anyhow!(
                "7-Zip executable disappeared during extraction of '{}': {}\n\
                 HINT: Partially extracted directories were left in place; rerun to resume.",
                work_dir.display(),
                path.display()
            )
        }
        UnnestError::Io(io_err) => anyhow::Error::from(io_err)
            .context(format!("I/O error while preparing '{}'", work_dir.display())),
    }
}

/// Adds context to a run error about the working directory
pub fn add_run_context<T>(result: Result<T, UnnestError>, work_dir: &Path) -> anyhow::Result<T> {
    result.map_err(|e| convert_run_error(e, work_dir))
}
