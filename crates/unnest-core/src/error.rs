//! Error types for nested archive extraction runs.
//!
//! Only conditions that abort a whole run are represented here. Failures of a
//! single archive are recorded in the run counters and reported as events.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `UnnestError`.
pub type Result<T> = std::result::Result<T, UnnestError>;

/// Errors that abort an extraction run.
#[derive(Error, Debug)]
pub enum UnnestError {
    /// The working directory does not exist.
    #[error("working directory does not exist: {path}")]
    WorkDirNotFound {
        /// The path that was given.
        path: PathBuf,
    },

    /// The working directory path exists but is not a directory.
    #[error("working directory is not a directory: {path}")]
    NotADirectory {
        /// The path that was given.
        path: PathBuf,
    },

    /// The extraction tool could not be located at startup.
    #[error("extraction tool not found: {path}")]
    ToolNotFound {
        /// The tool path or program name that was given.
        path: PathBuf,
    },

    /// The extraction tool disappeared while the run was in progress.
    #[error("extraction tool disappeared during the run: {path}")]
    ToolVanished {
        /// Resolved path of the tool.
        path: PathBuf,
    },

    /// I/O operation failed while preparing the run.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl UnnestError {
    /// Returns `true` if the run was rejected before any archive was touched.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use unnest_core::UnnestError;
    ///
    /// let err = UnnestError::WorkDirNotFound {
    ///     path: PathBuf::from("/missing"),
    /// };
    /// assert!(err.is_startup_failure());
    ///
    /// let err = UnnestError::ToolVanished {
    ///     path: PathBuf::from("/usr/bin/7z"),
    /// };
    /// assert!(!err.is_startup_failure());
    /// ```
    #[must_use]
    pub const fn is_startup_failure(&self) -> bool {
        matches!(
            self,
            Self::WorkDirNotFound { .. } | Self::NotADirectory { .. } | Self::ToolNotFound { .. }
        )
    }

    /// Returns the path the error refers to, if any.
    #[must_use]
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::WorkDirNotFound { path }
            | Self::NotADirectory { path }
            | Self::ToolNotFound { path }
            | Self::ToolVanished { path } => Some(path),
            Self::Io(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_work_dir_not_found_display() {
        let err = UnnestError::WorkDirNotFound {
            path: PathBuf::from("/no/such/dir"),
        };
        assert!(err.to_string().contains("does not exist"));
        assert!(err.to_string().contains("/no/such/dir"));
    }

    #[test]
    fn test_tool_errors_display() {
        let err = UnnestError::ToolNotFound {
            path: PathBuf::from("7z"),
        };
        assert_eq!(err.to_string(), "extraction tool not found: 7z");

        let err = UnnestError::ToolVanished {
            path: PathBuf::from("/opt/7z"),
        };
        assert!(err.to_string().contains("disappeared"));
    }

    #[test]
    fn test_startup_classification() {
        assert!(
            UnnestError::NotADirectory {
                path: PathBuf::from("file.txt"),
            }
            .is_startup_failure()
        );
        assert!(
            UnnestError::ToolNotFound {
                path: PathBuf::from("7z"),
            }
            .is_startup_failure()
        );
        let io = std::io::Error::other("boom");
        assert!(!UnnestError::Io(io).is_startup_failure());
    }

    #[test]
    fn test_path_accessor() {
        let err = UnnestError::NotADirectory {
            path: PathBuf::from("a.txt"),
        };
        assert_eq!(err.path(), Some(std::path::Path::new("a.txt")));
        let err = UnnestError::Io(std::io::Error::other("x"));
        assert!(err.path().is_none());
    }
}
