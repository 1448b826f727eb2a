//! Compression of loose override files into a single bundle.

use crate::error::{Error, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use zip::{write::SimpleFileOptions, ZipWriter};

/// Something that packs a list of files into one compressed bundle.
pub trait CompressionTool: Send + Sync {
    /// Write `files` into `archive_path`.
    ///
    /// Entry names are relative to `base_dir` when given, otherwise the bare
    /// file names are used. Returns a short human readable summary.
    fn compress(
        &self,
        files: &[Utf8PathBuf],
        archive_path: &Utf8Path,
        base_dir: Option<&Utf8Path>,
    ) -> Result<String>;
}

/// Deflate-compressed zip bundles.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipCompressor;

impl CompressionTool for ZipCompressor {
    fn compress(
        &self,
        files: &[Utf8PathBuf],
        archive_path: &Utf8Path,
        base_dir: Option<&Utf8Path>,
    ) -> Result<String> {
        if let Some(parent) = archive_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let writer = BufWriter::new(File::create(archive_path)?);
        let result = write_zip(writer, files, base_dir);
        if result.is_err() {
            let _ = std::fs::remove_file(archive_path);
        }
        let total_bytes = result?;

        tracing::info!(
            "Compressed {} files ({} bytes) into {}",
            files.len(),
            total_bytes,
            archive_path
        );
        Ok(format!("Compressed {} files into {}", files.len(), archive_path))
    }
}

fn write_zip<W: Write + Seek>(
    writer: W,
    files: &[Utf8PathBuf],
    base_dir: Option<&Utf8Path>,
) -> Result<u64> {
    let mut zip = ZipWriter::new(writer);
    let mut total_bytes = 0u64;

    for path in files {
        let size = std::fs::metadata(path)?.len();
        let options = SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated)
            .large_file(size >= u32::MAX as u64);

        zip.start_file(entry_name(path, base_dir)?, options)?;
        let mut file = File::open(path)?;
        total_bytes += std::io::copy(&mut file, &mut zip)?;
    }

    zip.finish()?.flush()?;
    Ok(total_bytes)
}

fn entry_name(path: &Utf8Path, base_dir: Option<&Utf8Path>) -> Result<String> {
    let name = match base_dir {
        Some(base) => path
            .strip_prefix(base)
            .map_err(|_| Error::Other(format!("'{}' is not under '{}'", path, base)))?
            .as_str()
            .to_string(),
        None => path
            .file_name()
            .ok_or_else(|| Error::Other(format!("'{}' has no file name", path)))?
            .to_string(),
    };
    Ok(name.replace('\\', "/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn temp_root() -> (tempfile::TempDir, Utf8PathBuf) {
        let temp = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap();
        (temp, root)
    }

    fn write(root: &Utf8Path, relative: &str, contents: &[u8]) -> Utf8PathBuf {
        let path = root.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn entries(archive: &Utf8Path) -> Vec<(String, Vec<u8>)> {
        let mut zip = zip::ZipArchive::new(File::open(archive).unwrap()).unwrap();
        let mut entries = Vec::new();
        for i in 0..zip.len() {
            let mut file = zip.by_index(i).unwrap();
            let mut data = Vec::new();
            file.read_to_end(&mut data).unwrap();
            entries.push((file.name().to_string(), data));
        }
        entries.sort();
        entries
    }

    #[test]
    fn test_relative_entry_names() {
        let (_temp, root) = temp_root();
        let loose = root.join("loose");
        let files = vec![
            write(&loose, "meshes/a.nif", b"mesh"),
            write(&loose, "textures/b.dds", b"texture"),
        ];
        let archive = root.join("out").join("MyMod_loose.zip");

        let message = ZipCompressor
            .compress(&files, &archive, Some(loose.as_path()))
            .unwrap();
        assert!(message.contains("2 files"));

        assert_eq!(
            entries(&archive),
            vec![
                ("meshes/a.nif".to_string(), b"mesh".to_vec()),
                ("textures/b.dds".to_string(), b"texture".to_vec()),
            ]
        );
    }

    #[test]
    fn test_bare_file_names_without_base() {
        let (_temp, root) = temp_root();
        let files = vec![write(&root, "deep/nested/readme.txt", b"hi")];
        let archive = root.join("bundle.zip");

        ZipCompressor.compress(&files, &archive, None).unwrap();
        assert_eq!(entries(&archive), vec![("readme.txt".to_string(), b"hi".to_vec())]);
    }

    #[test]
    fn test_file_outside_base_fails_and_removes_partial_bundle() {
        let (_temp, root) = temp_root();
        let files = vec![write(&root, "elsewhere/a.txt", b"a")];
        let archive = root.join("bundle.zip");

        let result = ZipCompressor.compress(&files, &archive, Some(root.join("loose").as_path()));
        assert!(result.is_err());
        assert!(!archive.exists());
    }

    #[test]
    fn test_missing_input_fails() {
        let (_temp, root) = temp_root();
        let files = vec![root.join("missing.txt")];
        let result = ZipCompressor.compress(&files, &root.join("bundle.zip"), None);
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
