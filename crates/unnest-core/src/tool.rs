//! External extraction tool invocation.
//!
//! The driver never decodes archives itself. It hands each archive to an
//! [`Extractor`], normally [`SevenZip`], and classifies the exit status.

use crate::UnnestError;
use std::ffi::OsString;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;
use std::process::Stdio;
use thiserror::Error;

/// Captured result of one tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    /// Command line that was run, for diagnostics.
    pub command: String,

    /// Exit code, or `None` if the process ended without one.
    pub status: Option<i32>,

    /// Standard output, decoded lossily.
    pub stdout: String,

    /// Standard error, decoded lossily.
    pub stderr: String,
}

impl ToolOutput {
    /// Classifies the exit status.
    #[must_use]
    pub const fn outcome(&self) -> ToolOutcome {
        ToolOutcome::from_status(self.status)
    }
}

/// Classification of a 7-Zip exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolOutcome {
    /// Exit code 0.
    Success,
    /// Exit code 1: extracted, but some files were locked or skipped.
    Warning,
    /// Exit code 2: fatal error. Left eligible for retry in a later pass.
    Fatal,
    /// Any other exit code. Not retried.
    Failed(i32),
    /// The process ended without an exit code, e.g. killed by a signal.
    Terminated,
}

impl ToolOutcome {
    /// Maps an exit code to an outcome.
    ///
    /// # Examples
    ///
    /// ```
    /// use unnest_core::tool::ToolOutcome;
    ///
    /// assert_eq!(ToolOutcome::from_status(Some(0)), ToolOutcome::Success);
    /// assert_eq!(ToolOutcome::from_status(Some(2)), ToolOutcome::Fatal);
    /// assert_eq!(ToolOutcome::from_status(Some(255)), ToolOutcome::Failed(255));
    /// assert_eq!(ToolOutcome::from_status(None), ToolOutcome::Terminated);
    /// ```
    #[must_use]
    pub const fn from_status(status: Option<i32>) -> Self {
        match status {
            Some(0) => Self::Success,
            Some(1) => Self::Warning,
            Some(2) => Self::Fatal,
            Some(code) => Self::Failed(code),
            None => Self::Terminated,
        }
    }

    /// Returns `true` if the archive counts as extracted.
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success | Self::Warning)
    }

    /// Returns `true` if the archive may be attempted again in a later pass.
    #[must_use]
    pub const fn is_retryable(self) -> bool {
        matches!(self, Self::Fatal)
    }
}

/// Failure to run the tool at all.
#[derive(Error, Debug)]
pub enum ToolError {
    /// The executable is gone.
    #[error("executable not found: {}", program.display())]
    NotFound {
        /// Path that was invoked.
        program: PathBuf,
    },
    /// Any other spawn or wait failure.
    #[error("failed to run `{command}`: {source}")]
    Io {
        /// Command line that was attempted.
        command: String,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
}

/// Something that can unpack one archive into a directory.
///
/// Implementations run synchronously and report the raw exit status; the
/// driver owns the classification and bookkeeping.
pub trait Extractor {
    /// Path of the program doing the work, for log output.
    fn program(&self) -> &Path;

    /// Command line that [`extract`](Self::extract) would run, for log output.
    fn command_line(&self, archive: &Path, dest: &Path) -> String;

    /// Extracts `archive` into `dest`, overwriting existing files.
    ///
    /// `dest` already exists when this is called.
    fn extract(&mut self, archive: &Path, dest: &Path) -> Result<ToolOutput, ToolError>;
}

impl<T: Extractor + ?Sized> Extractor for &mut T {
    fn program(&self) -> &Path {
        (**self).program()
    }

    fn command_line(&self, archive: &Path, dest: &Path) -> String {
        (**self).command_line(archive, dest)
    }

    fn extract(&mut self, archive: &Path, dest: &Path) -> Result<ToolOutput, ToolError> {
        (**self).extract(archive, dest)
    }
}

/// Runs a 7-Zip compatible executable as a subprocess.
///
/// The command line is `<program> x <archive> -o<dest> -y`: extract with
/// full paths, output directory glued to its flag, and "yes" to every prompt.
#[derive(Debug, Clone)]
pub struct SevenZip {
    program: PathBuf,
}

impl SevenZip {
    /// Wraps an already resolved executable path.
    #[must_use]
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn command(&self, archive: &Path, dest: &Path) -> Command {
        let mut output_flag = OsString::from("-o");
        output_flag.push(dest);

        let mut cmd = Command::new(&self.program);
        cmd.arg("x")
            .arg(archive)
            .arg(output_flag)
            .arg("-y")
            .stdin(Stdio::null());
        cmd
    }
}

impl Extractor for SevenZip {
    fn program(&self) -> &Path {
        &self.program
    }

    fn command_line(&self, archive: &Path, dest: &Path) -> String {
        render_command(&self.command(archive, dest))
    }

    fn extract(&mut self, archive: &Path, dest: &Path) -> Result<ToolOutput, ToolError> {
        let mut cmd = self.command(archive, dest);
        let command = render_command(&cmd);

        let output = cmd.output().map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                ToolError::NotFound {
                    program: self.program.clone(),
                }
            } else {
                ToolError::Io {
                    command: command.clone(),
                    source,
                }
            }
        })?;

        Ok(ToolOutput {
            command,
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

fn render_command(cmd: &Command) -> String {
    std::iter::once(cmd.get_program())
        .chain(cmd.get_args())
        .map(|part| part.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Resolves the extraction tool to an absolute executable path.
///
/// An existing file is canonicalized. A bare program name such as `7z` is
/// looked up on `PATH`.
///
/// # Errors
///
/// Returns [`UnnestError::ToolNotFound`] if neither lookup yields a file.
pub fn resolve_tool(tool: &Path) -> crate::Result<PathBuf> {
    if tool.is_file() {
        return Ok(tool.canonicalize()?);
    }

    let is_bare_name = tool.components().count() == 1 && tool.parent() == Some(Path::new(""));
    if is_bare_name
        && let Ok(found) = which::which(tool)
    {
        return Ok(found);
    }

    Err(UnnestError::ToolNotFound {
        path: tool.to_path_buf(),
    })
}
