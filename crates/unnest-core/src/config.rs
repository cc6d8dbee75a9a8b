//! Run configuration for nested archive extraction.

use std::num::NonZeroUsize;

/// Default cap on scan/extract passes.
pub const DEFAULT_MAX_ITERATIONS: NonZeroUsize = match NonZeroUsize::new(5) {
    Some(n) => n,
    None => unreachable!(),
};

/// Configuration for an extraction run.
///
/// # Examples
///
/// ```
/// use std::num::NonZeroUsize;
/// use unnest_core::RunConfig;
///
/// // Five passes by default
/// let config = RunConfig::default();
/// assert_eq!(config.max_iterations.get(), 5);
///
/// // Deeper nesting needs more passes
/// let deep = RunConfig {
///     max_iterations: NonZeroUsize::new(10).unwrap(),
/// };
/// assert_eq!(deep.max_iterations.get(), 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    /// Hard cap on the number of scan/extract passes.
    ///
    /// Each pass can peel one level of nesting, so this is also the deepest
    /// nesting level a run can fully unpack.
    pub max_iterations: NonZeroUsize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl RunConfig {
    /// Creates a configuration with the given pass cap.
    ///
    /// Returns `None` when `max_iterations` is zero.
    #[must_use]
    pub fn with_max_iterations(max_iterations: usize) -> Option<Self> {
        NonZeroUsize::new(max_iterations).map(|max_iterations| Self { max_iterations })
    }
}
