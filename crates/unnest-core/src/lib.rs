//! Iterative extraction of archives nested inside archives.
//!
//! `unnest-core` walks a directory tree, hands every archive it finds to an
//! external 7-Zip executable, and repeats the walk so that archives revealed
//! by one pass are unpacked by the next. Each archive is extracted into a
//! sibling directory named after it, and source archives are never modified.
//!
//! # Examples
//!
//! ```no_run
//! use unnest_core::RunConfig;
//! use unnest_core::run;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let summary = run("downloads", "7z", &RunConfig::default())?;
//! println!("Extracted {} archives", summary.successes);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod detect;
pub mod driver;
pub mod error;
pub mod event;
pub mod report;
pub mod scan;
pub mod tool;

// Re-export main API types
pub use api::run;
pub use config::RunConfig;
pub use driver::Driver;
pub use driver::ProcessedSet;
pub use error::Result;
pub use error::UnnestError;
pub use event::NoopObserver;
pub use event::RunEvent;
pub use event::RunObserver;
pub use event::TracingObserver;
pub use report::IterationResult;
pub use report::RunSummary;
pub use report::StopReason;
pub use tool::Extractor;
pub use tool::SevenZip;
pub use tool::ToolOutcome;
