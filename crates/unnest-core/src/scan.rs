//! Recursive archive discovery.
//!
//! A single `walkdir` traversal per pass classifies every regular file
//! against the whole suffix table, so overlapping patterns such as `.gz` and
//! `.tar.gz` can never yield the same file twice.

use crate::detect::ArchiveCandidate;
use std::collections::BTreeSet;
use std::path::Path;
use std::path::PathBuf;
use walkdir::WalkDir;

/// Result of one discovery pass.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    /// Archives found under the root, ordered by path.
    pub candidates: BTreeSet<ArchiveCandidate>,

    /// Entries that could not be read, with the reason.
    pub skipped: Vec<SkippedEntry>,
}

/// An entry the walk could not descend into or inspect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    /// Path of the entry, when the walker knows it.
    pub path: Option<PathBuf>,

    /// Human-readable reason.
    pub reason: String,
}

/// Walks `root` recursively and collects archive candidates.
///
/// Symbolic links are not followed, so every returned path stays under
/// `root` and keeps the spelling of `root`. Callers pass a canonical root to
/// get normalized candidate paths.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use unnest_core::scan::scan_archives;
///
/// let outcome = scan_archives(Path::new("/data/downloads"));
/// for candidate in &outcome.candidates {
///     println!("{}", candidate.path().display());
/// }
/// ```
pub fn scan_archives(root: &Path) -> ScanOutcome {
    let mut outcome = ScanOutcome::default();

    for entry in WalkDir::new(root).follow_links(false) {
        match entry {
            Ok(entry) => {
                if !entry.file_type().is_file() {
                    continue;
                }
                if let Some(candidate) = ArchiveCandidate::from_path(entry.into_path()) {
                    outcome.candidates.insert(candidate);
                }
            }
            Err(e) => outcome.skipped.push(SkippedEntry {
                path: e.path().map(Path::to_path_buf),
                reason: e.to_string(),
            }),
        }
    }

    outcome
}
