//! Log sinks for the driver's tracing events.
//!
//! Events go to stderr, so stdout stays reserved for the summary, and to an
//! optional plain-text log file.

use anyhow::Context;
use anyhow::Result;
use std::backtrace::Backtrace;
use std::fs::File;
use std::io;
use std::panic;
use std::path::Path;
use std::sync::Arc;
use std::sync::Mutex;
use tracing::error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Layer;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Logging options derived from the command line.
pub struct LogOptions<'a> {
    pub verbose: bool,
    pub quiet: bool,
    pub file: Option<&'a Path>,
}

impl LogOptions<'_> {
    /// Filter used when `RUST_LOG` is not set.
    fn default_directive(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Highest level echoed to the console.
    fn console_level(&self) -> LevelFilter {
        if self.quiet {
            LevelFilter::ERROR
        } else {
            LevelFilter::TRACE
        }
    }
}

/// Keeps the log file writer alive. Dropping it flushes pending lines.
///
/// The panic hook shares the writer guard so a crash is flushed to the file
/// before the process aborts.
pub struct LogGuard {
    worker: Arc<Mutex<Option<WorkerGuard>>>,
}

impl LogGuard {
    fn flush(worker: &Mutex<Option<WorkerGuard>>) {
        if let Ok(mut worker) = worker.lock() {
            worker.take();
        }
    }
}

impl Drop for LogGuard {
    fn drop(&mut self) {
        Self::flush(&self.worker);
    }
}

/// Routes panics through the log, with a backtrace, then flushes the file.
fn install_panic_hook(worker: Arc<Mutex<Option<WorkerGuard>>>) {
    panic::set_hook(Box::new(move |info| {
        let backtrace = Backtrace::force_capture();
        error!("unexpected failure: {info}\n{backtrace}");
        LogGuard::flush(&worker);
    }));
}

/// Installs the global subscriber and the panic hook.
///
/// Keep the returned guard alive until the run is over.
pub fn init(options: &LogOptions<'_>) -> Result<LogGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(options.default_directive()));

    let console_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .with_ansi(console::colors_enabled_stderr())
        .with_filter(options.console_level());

    let (file_layer, guard) = match options.file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file '{}'", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_target(false)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .context("failed to install log subscriber")?;

    let worker = Arc::new(Mutex::new(guard));
    install_panic_hook(Arc::clone(&worker));

    Ok(LogGuard { worker })
}
