//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::error::add_run_context;
use crate::logging;
use crate::logging::LogOptions;
use crate::output::OutputFormatter;
use anyhow::Result;
use tracing::error;
use unnest_core::RunConfig;

/// Runs the extraction and prints its summary.
///
/// A run that cannot start, or that loses the tool midway, is reported and
/// still counts as a completed command. Only a logging setup failure is
/// returned as an error.
pub fn execute(
    args: &ExtractArgs,
    formatter: &dyn OutputFormatter,
    verbose: bool,
    quiet: bool,
) -> Result<()> {
    let _guard = logging::init(&LogOptions {
        verbose,
        quiet,
        file: (!args.no_log_file).then_some(args.log_file.as_path()),
    })?;

    let config = RunConfig {
        max_iterations: args.max_iterations,
    };

    match add_run_context(
        unnest_core::run(&args.work_dir, &args.tool, &config),
        &args.work_dir,
    ) {
        Ok(summary) => formatter.format_run_summary(&args.work_dir, &summary)?,
        Err(err) => {
            error!("{err:#}");
            formatter.format_error("extract", &err);
        }
    }

    Ok(())
}
