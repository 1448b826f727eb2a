//! Archive and plugin descriptor naming.
//!
//! The first chunk owns the plain base name (`MyMod.bsa`); every further chunk
//! gets a `_pack<N>` suffix starting at zero (`MyMod_pack0.bsa`,
//! `MyMod_pack1.bsa`, ...). Plugin descriptors follow the same order:
//! `MyMod`, `MyMod_0`, `MyMod_1`, ...

use camino::{Utf8Path, Utf8PathBuf};

/// File name of the archive for chunk `index`.
pub fn archive_file_name(base: &str, index: usize, extension: &str) -> String {
    match index {
        0 => format!("{}.{}", base, extension),
        n => format!("{}_pack{}.{}", base, n - 1, extension),
    }
}

/// Full path of the archive for chunk `index`.
///
/// `output_base` is a path without extension; its parent is the output
/// directory and its file name the base name.
pub fn archive_path(output_base: &Utf8Path, index: usize, extension: &str) -> Utf8PathBuf {
    let base = output_base.file_name().unwrap_or_default();
    let name = archive_file_name(base, index, extension);
    match output_base.parent() {
        Some(parent) => parent.join(name),
        None => Utf8PathBuf::from(name),
    }
}

/// Inverse of [`archive_file_name`]: the chunk index encoded in `file_name`.
///
/// Returns `None` when the name does not belong to the archive set of `base`.
/// The extension is ignored.
pub fn parse_archive_index(file_name: &str, base: &str) -> Option<usize> {
    let stem = Utf8Path::new(file_name).file_stem()?;
    if stem == base {
        return Some(0);
    }

    let suffix = stem.strip_prefix(base)?.strip_prefix("_pack")?;
    if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    suffix.parse::<usize>().ok()?.checked_add(1)
}

/// Plugin descriptor name (without extension) for chunk `index`.
pub fn descriptor_name(mod_name: &str, index: usize) -> String {
    match index {
        0 => mod_name.to_string(),
        n => format!("{}_{}", mod_name, n - 1),
    }
}
