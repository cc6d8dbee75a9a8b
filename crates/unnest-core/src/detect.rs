//! Archive suffix detection and destination derivation.

use std::fmt;
use std::path::Path;
use std::path::PathBuf;

/// Archive suffixes recognized during discovery.
///
/// Compound suffixes are matched as a single unit, so `data.tar.gz` is a
/// [`ArchiveSuffix::TarGz`] and never a [`ArchiveSuffix::Gz`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ArchiveSuffix {
    /// Gzip-compressed tar archive (`.tar.gz`).
    TarGz,
    /// Bzip2-compressed tar archive (`.tar.bz2`).
    TarBz2,
    /// XZ-compressed tar archive (`.tar.xz`).
    TarXz,
    /// Gzip-compressed tar archive, short form (`.tgz`).
    Tgz,
    /// ZIP archive (`.zip`).
    Zip,
    /// 7z archive (`.7z`).
    SevenZ,
    /// Tar archive (`.tar`).
    Tar,
    /// Gzip stream (`.gz`).
    Gz,
}

impl ArchiveSuffix {
    /// All recognized suffixes, compound forms first.
    ///
    /// Matching walks this table in order, so a compound suffix always wins
    /// over its single-suffix tail.
    pub const ALL: [Self; 8] = [
        Self::TarGz,
        Self::TarBz2,
        Self::TarXz,
        Self::Tgz,
        Self::Zip,
        Self::SevenZ,
        Self::Tar,
        Self::Gz,
    ];

    /// Returns the literal suffix including the leading dot.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TarGz => ".tar.gz",
            Self::TarBz2 => ".tar.bz2",
            Self::TarXz => ".tar.xz",
            Self::Tgz => ".tgz",
            Self::Zip => ".zip",
            Self::SevenZ => ".7z",
            Self::Tar => ".tar",
            Self::Gz => ".gz",
        }
    }

    /// Returns `true` for `.tar.*` forms that are stripped as one unit.
    #[must_use]
    pub const fn is_compound(self) -> bool {
        matches!(self, Self::TarGz | Self::TarBz2 | Self::TarXz)
    }
}

impl fmt::Display for ArchiveSuffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Detects the archive suffix of a file name.
///
/// Matching is ASCII case-insensitive. A name that consists of nothing but a
/// suffix (such as `.zip`) has no base name and is not treated as an archive.
///
/// # Examples
///
/// ```
/// use unnest_core::detect::ArchiveSuffix;
/// use unnest_core::detect::detect_suffix;
///
/// assert_eq!(detect_suffix("data.tar.gz"), Some(ArchiveSuffix::TarGz));
/// assert_eq!(detect_suffix("DATA.ZIP"), Some(ArchiveSuffix::Zip));
/// assert_eq!(detect_suffix("notes.txt"), None);
/// ```
#[must_use]
pub fn detect_suffix(file_name: &str) -> Option<ArchiveSuffix> {
    let lower = file_name.to_ascii_lowercase();
    ArchiveSuffix::ALL
        .into_iter()
        .find(|suffix| lower.ends_with(suffix.as_str()))
        .filter(|suffix| lower.len() > suffix.as_str().len())
}

/// Returns the file name with its archive suffix stripped.
///
/// # Examples
///
/// ```
/// use unnest_core::detect::base_name;
///
/// assert_eq!(base_name("bundle.tar.xz"), Some("bundle"));
/// assert_eq!(base_name("release-1.2.zip"), Some("release-1.2"));
/// assert_eq!(base_name("readme.md"), None);
/// ```
#[must_use]
pub fn base_name(file_name: &str) -> Option<&str> {
    // ASCII lowercasing keeps byte offsets, so the cut lands on the original.
    detect_suffix(file_name).map(|suffix| &file_name[..file_name.len() - suffix.as_str().len()])
}

/// A discovered archive file.
///
/// Ordered by path so that a pass visits candidates deterministically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArchiveCandidate {
    path: PathBuf,
    suffix: ArchiveSuffix,
}

impl ArchiveCandidate {
    /// Classifies a path as an archive candidate.
    ///
    /// Returns `None` if the file name is not valid UTF-8 or carries no
    /// recognized suffix.
    #[must_use]
    pub fn from_path(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let suffix = path.file_name()?.to_str().and_then(detect_suffix)?;
        path.parent()?;
        Some(Self { path, suffix })
    }

    /// Full path of the archive.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Matched archive suffix.
    #[must_use]
    pub const fn suffix(&self) -> ArchiveSuffix {
        self.suffix
    }

    /// Directory containing the archive.
    #[must_use]
    pub fn parent(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }

    /// File name of the archive.
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
    }

    /// File name with the archive suffix stripped.
    #[must_use]
    pub fn base_name(&self) -> &str {
        let name = self.file_name();
        &name[..name.len() - self.suffix.as_str().len()]
    }

    /// Destination directory: the parent joined with the base name.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::Path;
    /// use unnest_core::detect::ArchiveCandidate;
    ///
    /// let candidate = ArchiveCandidate::from_path("/data/outer/inner.tar.gz").unwrap();
    /// assert_eq!(candidate.destination(), Path::new("/data/outer/inner"));
    /// ```
    #[must_use]
    pub fn destination(&self) -> PathBuf {
        self.parent().join(self.base_name())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_simple_suffixes() {
        assert_eq!(detect_suffix("a.zip"), Some(ArchiveSuffix::Zip));
        assert_eq!(detect_suffix("a.7z"), Some(ArchiveSuffix::SevenZ));
        assert_eq!(detect_suffix("a.tar"), Some(ArchiveSuffix::Tar));
        assert_eq!(detect_suffix("a.gz"), Some(ArchiveSuffix::Gz));
        assert_eq!(detect_suffix("a.tgz"), Some(ArchiveSuffix::Tgz));
    }

    #[test]
    fn test_detect_compound_wins() {
        assert_eq!(detect_suffix("a.tar.gz"), Some(ArchiveSuffix::TarGz));
        assert_eq!(detect_suffix("a.tar.bz2"), Some(ArchiveSuffix::TarBz2));
        assert_eq!(detect_suffix("a.tar.xz"), Some(ArchiveSuffix::TarXz));
    }

    #[test]
    fn test_detect_case_insensitive() {
        assert_eq!(detect_suffix("ARCHIVE.7Z"), Some(ArchiveSuffix::SevenZ));
        assert_eq!(detect_suffix("Backup.Tar.Gz"), Some(ArchiveSuffix::TarGz));
    }

    #[test]
    fn test_detect_unrecognized() {
        assert_eq!(detect_suffix("a.rar"), None);
        assert_eq!(detect_suffix("a.bz2"), None);
        assert_eq!(detect_suffix("a.xz"), None);
        assert_eq!(detect_suffix("zip"), None);
        assert_eq!(detect_suffix("a.zipx"), None);
    }

    #[test]
    fn test_bare_suffix_is_not_archive() {
        assert_eq!(detect_suffix(".zip"), None);
        assert_eq!(detect_suffix(".tar.gz"), None);
    }

    #[test]
    fn test_base_name_strips_compound_unit() {
        assert_eq!(base_name("inner.tar.gz"), Some("inner"));
        assert_eq!(base_name("inner.TAR.BZ2"), Some("inner"));
        assert_eq!(base_name("inner.gz"), Some("inner"));
        assert_eq!(base_name("v1.0.tgz"), Some("v1.0"));
    }

    #[test]
    fn test_base_name_keeps_non_tar_inner_dot() {
        // Only `.tar` is part of a compound suffix.
        assert_eq!(base_name("dump.sql.gz"), Some("dump.sql"));
    }

    #[test]
    fn test_candidate_destination() {
        let candidate = ArchiveCandidate::from_path("/w/outer/a.zip").unwrap();
        assert_eq!(candidate.suffix(), ArchiveSuffix::Zip);
        assert_eq!(candidate.parent(), Path::new("/w/outer"));
        assert_eq!(candidate.base_name(), "a");
        assert_eq!(candidate.destination(), PathBuf::from("/w/outer/a"));
    }

    #[test]
    fn test_candidate_rejects_non_archive() {
        assert!(ArchiveCandidate::from_path("/w/readme.txt").is_none());
        assert!(ArchiveCandidate::from_path("/").is_none());
    }

    #[test]
    fn test_suffix_display() {
        assert_eq!(ArchiveSuffix::TarXz.to_string(), ".tar.xz");
        assert!(ArchiveSuffix::TarXz.is_compound());
        assert!(!ArchiveSuffix::Tgz.is_compound());
    }
}
