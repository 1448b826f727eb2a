//! Data-relative path extraction.
//!
//! Generators drop their output at arbitrary depths
//! (`out/run3/deep/meshes/armor/helmet.nif`), but archives and loose overrides
//! must mirror the game's data layout (`meshes/armor/helmet.nif`). The rewrite
//! is a prioritized list of matchers; the first one that produces a path wins:
//!
//! 1. the first directory segment that is a known data directory (`meshes`,
//!    `textures`, ...) starts the data-relative path;
//! 2. the segment after a directory literally named `data` starts it;
//! 3. otherwise the last two segments are kept (file plus immediate parent);
//! 4. otherwise the file name alone.

use crate::resolve::split_segments;
use camino::Utf8PathBuf;
use std::collections::HashSet;

type Matcher = fn(&[&str], &HashSet<String>) -> Option<usize>;

/// Matchers in priority order. Each returns the index of the first segment to keep.
const MATCHERS: &[Matcher] = &[
    match_known_directory,
    match_data_directory,
    match_parent_and_file,
    match_file_name,
];

/// Rewrite `relative` so that it starts at the game's data root.
///
/// `known_dirs` holds lowercase directory names. Only directory segments are
/// considered by the first two matchers, never the file name itself. The result
/// always uses `/` separators. An empty input yields an empty path.
pub fn data_relative_path(relative: &str, known_dirs: &HashSet<String>) -> Utf8PathBuf {
    let segments = split_segments(relative);
    if segments.is_empty() {
        return Utf8PathBuf::new();
    }

    let start = MATCHERS
        .iter()
        .find_map(|matcher| matcher(&segments, known_dirs))
        .unwrap_or(segments.len() - 1);

    Utf8PathBuf::from(segments[start..].join("/"))
}

fn directory_segments<'a>(segments: &'a [&'a str]) -> &'a [&'a str] {
    &segments[..segments.len().saturating_sub(1)]
}

fn match_known_directory(segments: &[&str], known_dirs: &HashSet<String>) -> Option<usize> {
    directory_segments(segments)
        .iter()
        .position(|segment| known_dirs.contains(&segment.to_lowercase()))
}

fn match_data_directory(segments: &[&str], _known_dirs: &HashSet<String>) -> Option<usize> {
    directory_segments(segments)
        .iter()
        .position(|segment| segment.eq_ignore_ascii_case("data"))
        .map(|index| index + 1)
}

fn match_parent_and_file(segments: &[&str], _known_dirs: &HashSet<String>) -> Option<usize> {
    (segments.len() >= 2).then(|| segments.len() - 2)
}

fn match_file_name(segments: &[&str], _known_dirs: &HashSet<String>) -> Option<usize> {
    segments.len().checked_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn known() -> HashSet<String> {
        ["meshes", "textures", "scripts"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_known_directory_strips_prefix() {
        let path = data_relative_path(
            "Generated/randomfolder/deep/nested/meshes/armor/helmet.nif",
            &known(),
        );
        assert_eq!(path, "meshes/armor/helmet.nif");
    }

    #[test]
    fn test_known_directory_is_case_insensitive_and_keeps_case() {
        let path = data_relative_path("out\\Textures\\Wall.dds", &known());
        assert_eq!(path, "Textures/Wall.dds");
    }

    #[test]
    fn test_first_known_directory_wins() {
        let path = data_relative_path("a/textures/meshes/x.dds", &known());
        assert_eq!(path, "textures/meshes/x.dds");
    }

    #[test]
    fn test_data_directory_fallback() {
        let path = data_relative_path("build/Data/interface/menu.swf", &known());
        assert_eq!(path, "interface/menu.swf");
    }

    #[test]
    fn test_known_directory_beats_data_directory() {
        let path = data_relative_path("build/data/stuff/meshes/x.nif", &known());
        assert_eq!(path, "meshes/x.nif");
    }

    #[test]
    fn test_file_named_like_directory_is_not_a_match() {
        // "meshes" and "data" as file names must not anchor the path
        assert_eq!(data_relative_path("a/b/meshes", &known()), "b/meshes");
        assert_eq!(data_relative_path("a/b/data", &known()), "b/data");
    }

    #[test]
    fn test_last_two_segments_fallback() {
        let path = data_relative_path("x/y/MyMod/readme.txt", &known());
        assert_eq!(path, "MyMod/readme.txt");
    }

    #[test]
    fn test_single_segment_fallback() {
        assert_eq!(data_relative_path("MyMod.esp", &known()), "MyMod.esp");
    }

    #[test]
    fn test_empty_path() {
        assert_eq!(data_relative_path("", &known()), "");
    }
}
