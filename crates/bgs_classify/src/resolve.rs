//! Case-insensitive path lookup.
//!
//! Generated data is usually authored on case-insensitive filesystems, while the
//! installation we compare against may live on a case-sensitive one. Lookups
//! therefore walk the tree one segment at a time and match names ignoring case.

use camino::{Utf8Path, Utf8PathBuf};

/// Split a relative path on both `/` and `\`, dropping empty and `.` segments.
pub(crate) fn split_segments(relative: &str) -> Vec<&str> {
    relative
        .split(['/', '\\'])
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect()
}

/// Resolve `relative` under `root`, matching each segment case-insensitively.
///
/// Returns `None` if any segment has no match or a directory along the way
/// cannot be listed. When several entries match a segment ignoring case, an
/// exact-case match is preferred, then the lexicographically smallest name.
pub fn resolve_case_insensitive(root: &Utf8Path, relative: &str) -> Option<Utf8PathBuf> {
    let segments = split_segments(relative);
    if segments.is_empty() {
        return None;
    }

    let mut current = root.to_path_buf();
    for segment in segments {
        let name = match_entry(&current, segment)?;
        current.push(name);
    }

    Some(current)
}

fn match_entry(dir: &Utf8Path, segment: &str) -> Option<String> {
    let wanted = segment.to_lowercase();
    let mut best: Option<String> = None;

    for entry in std::fs::read_dir(dir.as_std_path()).ok()? {
        let Ok(entry) = entry else {
            continue;
        };
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };

        if name == segment {
            return Some(name);
        }
        if name.to_lowercase() != wanted {
            continue;
        }
        if best.as_deref().map_or(true, |current| name.as_str() < current) {
            best = Some(name);
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (tempfile::TempDir, Utf8PathBuf) {
        let temp = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap();
        std::fs::create_dir_all(root.join("Meshes").join("Armor")).unwrap();
        std::fs::write(root.join("Meshes").join("Armor").join("Helmet.NIF"), b"x").unwrap();
        (temp, root)
    }

    #[test]
    fn test_split_segments_handles_both_separators() {
        assert_eq!(
            split_segments("meshes\\armor/./helmet.nif"),
            vec!["meshes", "armor", "helmet.nif"]
        );
        assert_eq!(split_segments("/meshes//x.nif/"), vec!["meshes", "x.nif"]);
        assert!(split_segments("").is_empty());
    }

    #[test]
    fn test_resolves_ignoring_case() {
        let (_temp, root) = fixture();
        let resolved = resolve_case_insensitive(&root, "meshes/ARMOR/helmet.nif").unwrap();
        assert_eq!(resolved, root.join("Meshes").join("Armor").join("Helmet.NIF"));
    }

    #[test]
    fn test_resolves_backslash_paths() {
        let (_temp, root) = fixture();
        let resolved = resolve_case_insensitive(&root, "MESHES\\armor\\HELMET.nif").unwrap();
        assert!(resolved.as_std_path().is_file());
    }

    #[test]
    fn test_missing_segment_is_not_found() {
        let (_temp, root) = fixture();
        assert!(resolve_case_insensitive(&root, "meshes/weapons/sword.nif").is_none());
        assert!(resolve_case_insensitive(&root, "textures/a.dds").is_none());
    }

    #[test]
    fn test_descending_through_a_file_is_not_found() {
        let (_temp, root) = fixture();
        assert!(resolve_case_insensitive(&root, "meshes/armor/helmet.nif/extra").is_none());
    }

    #[test]
    fn test_missing_root_is_not_found() {
        assert!(resolve_case_insensitive(Utf8Path::new("/no/such/root"), "a.nif").is_none());
    }

    #[test]
    fn test_empty_relative_path_is_not_found() {
        let (_temp, root) = fixture();
        assert!(resolve_case_insensitive(&root, "").is_none());
        assert!(resolve_case_insensitive(&root, "./").is_none());
    }
}
