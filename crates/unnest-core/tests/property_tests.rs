//! Property-based tests for suffix detection and destination derivation.

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;
use std::path::PathBuf;
use unnest_core::detect::ArchiveCandidate;
use unnest_core::detect::ArchiveSuffix;
use unnest_core::detect::base_name;
use unnest_core::detect::detect_suffix;

fn any_suffix() -> impl Strategy<Value = ArchiveSuffix> {
    prop::sample::select(ArchiveSuffix::ALL.to_vec())
}

/// Uppercases the characters selected by `mask`.
fn scramble_case(s: &str, mask: u64) -> String {
    s.chars()
        .enumerate()
        .map(|(i, c)| {
            if (mask >> (i % 64)) & 1 == 1 {
                c.to_ascii_uppercase()
            } else {
                c
            }
        })
        .collect()
}

proptest! {
    /// Stripping a recognized suffix gives back the stem it was appended to.
    #[test]
    fn prop_base_name_round_trips(
        stem in "[a-zA-Z0-9_-]{1,20}",
        suffix in any_suffix()
    ) {
        let name = format!("{stem}{}", suffix.as_str());
        prop_assert_eq!(base_name(&name), Some(stem.as_str()));
        prop_assert_eq!(detect_suffix(&name), Some(suffix));
    }

    /// Suffix case never changes the classification.
    #[test]
    fn prop_detection_ignores_case(
        stem in "[a-z0-9]{1,12}",
        suffix in any_suffix(),
        mask in any::<u64>()
    ) {
        let name = format!("{stem}{}", scramble_case(suffix.as_str(), mask));
        prop_assert_eq!(detect_suffix(&name), Some(suffix));
        prop_assert_eq!(base_name(&name), Some(stem.as_str()));
    }

    /// Names without a recognized suffix are never candidates.
    #[test]
    fn prop_other_extensions_ignored(
        stem in "[a-z0-9]{1,12}",
        ext in "(txt|md|rar|bz2|xz|zst|iso|pdf)"
    ) {
        let name = format!("{stem}.{ext}");
        prop_assert!(detect_suffix(&name).is_none());
        prop_assert!(ArchiveCandidate::from_path(PathBuf::from("/w").join(&name)).is_none());
    }

    /// The destination always sits next to the archive.
    #[test]
    fn prop_destination_is_sibling(
        dirs in prop::collection::vec("[a-z0-9]{1,8}", 0..4),
        stem in "[a-z0-9]([a-z0-9.]{0,7}[a-z0-9])?",
        suffix in any_suffix()
    ) {
        let mut path = PathBuf::from("/root-dir");
        for dir in &dirs {
            path.push(dir);
        }
        let parent = path.clone();
        path.push(format!("{stem}{}", suffix.as_str()));

        let candidate = ArchiveCandidate::from_path(&path).unwrap();
        let dest = candidate.destination();
        prop_assert_eq!(dest.parent().unwrap(), parent.as_path());
        prop_assert_ne!(dest, path);
    }
}
