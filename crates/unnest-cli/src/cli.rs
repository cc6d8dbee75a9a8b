//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use std::num::NonZeroUsize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "unnest")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output (debug log events)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output the run summary in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Unpack every archive under a directory, including archives revealed by earlier passes
    Extract(ExtractArgs),
    /// Generate shell completions
    Completion(CompletionArgs),
}

#[derive(clap::Args)]
pub struct ExtractArgs {
    /// Root directory containing the archives to unpack
    #[arg(value_name = "WORK_DIR")]
    pub work_dir: PathBuf,

    /// Path to the 7-Zip executable, or a program name looked up on PATH
    #[arg(
        long,
        value_name = "PATH",
        alias = "path-to-7z",
        alias = "path_to_7z",
        default_value_os_t = default_tool_path()
    )]
    pub tool: PathBuf,

    /// Maximum number of scan/extract passes (one per nesting level)
    #[arg(long, value_name = "N", default_value = "5", alias = "max_iterations")]
    pub max_iterations: NonZeroUsize,

    /// File that receives a copy of the log (truncated at start)
    #[arg(long, value_name = "PATH", default_value = "extraction.log", alias = "log_file")]
    pub log_file: PathBuf,

    /// Do not write a log file
    #[arg(long, conflicts_with = "log_file")]
    pub no_log_file: bool,
}

#[derive(clap::Args)]
pub struct CompletionArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Default location of the 7-Zip executable for this platform.
///
/// On Windows the standard install directories are probed before falling
/// back to `7z.exe` on `PATH`.
#[cfg(windows)]
fn default_tool_path() -> PathBuf {
    use std::env;

    [
        ("ProgramFiles", r"C:\Program Files"),
        ("ProgramFiles(x86)", r"C:\Program Files (x86)"),
    ]
    .into_iter()
    .map(|(var, fallback)| {
        env::var_os(var)
            .map_or_else(|| PathBuf::from(fallback), PathBuf::from)
            .join("7-Zip")
            .join("7z.exe")
    })
    .find(|candidate| candidate.is_file())
    .unwrap_or_else(|| PathBuf::from("7z.exe"))
}

#[cfg(not(windows))]
fn default_tool_path() -> PathBuf {
    PathBuf::from("7z")
}
