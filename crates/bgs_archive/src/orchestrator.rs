//! Chunked archive creation.
//!
//! The orchestrator turns a list of files into one or more game archives:
//!
//! 1. Stat every file, check that it lives below the source directory and
//!    compare the total against the size limit.
//! 2. If everything fits, make a single tool call. The source directory is
//!    handed to the tool directly only when the list covers every file in it;
//!    otherwise the listed files are staged first.
//! 3. Otherwise split the files with [`pack_chunks`], stage every chunk into a
//!    temporary directory mirroring the layout below the source directory and
//!    archive each staging directory in turn.
//! 4. Verify the produced archives and the source files.
//!
//! Archives of an earlier run with the same base name are removed before the
//! first tool call. The first failing chunk stops the run. Archives created before the failure
//! stay on disk and are listed in the returned [`ArchiveManifest`].

use crate::chunk::{pack_chunks, Chunk};
use crate::error::{Error, Result, ToolError};
use crate::naming::{archive_path, parse_archive_index};
use crate::tool::{ArchiveRequest, ArchiveTool};
use bgs_game::GameType;
use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

/// Binary gigabyte.
pub const BYTES_PER_GB: u64 = 1024 * 1024 * 1024;

/// Base time allowed for one tool call.
pub const TOOL_TIMEOUT_BASE: Duration = Duration::from_secs(300);
/// Extra time allowed per started block of [`TOOL_TIMEOUT_FILES_PER_STEP`] files.
pub const TOOL_TIMEOUT_STEP: Duration = Duration::from_secs(60);
pub const TOOL_TIMEOUT_FILES_PER_STEP: usize = 500;

/// Convert a gigabyte limit into bytes. `None` for non-finite or non-positive input.
pub fn gb_to_bytes(gb: f64) -> Option<u64> {
    if !gb.is_finite() || gb <= 0.0 {
        return None;
    }
    Some(((gb * BYTES_PER_GB as f64) as u64).max(1))
}

/// Time allowed for archiving `file_count` files in one tool call.
pub fn tool_timeout(file_count: usize) -> Duration {
    let steps = file_count.div_ceil(TOOL_TIMEOUT_FILES_PER_STEP) as u32;
    TOOL_TIMEOUT_BASE + TOOL_TIMEOUT_STEP * steps
}

/// Result of [`ArchiveOrchestrator::create_chunked_archive`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveManifest {
    /// Archives that were written, in chunk order.
    pub created_archive_paths: Vec<Utf8PathBuf>,
    pub success: bool,
    pub message: String,
}

/// Progress update emitted before each archive is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveProgress {
    /// 1-based index of the archive being created.
    pub current: usize,
    pub total: usize,
    pub archive: Utf8PathBuf,
}

type ProgressCallback = Arc<dyn Fn(ArchiveProgress) + Send + Sync>;

/// Drives an [`ArchiveTool`] over size-bounded chunks of files.
pub struct ArchiveOrchestrator {
    tool: Arc<dyn ArchiveTool>,
    game: GameType,
    progress_callback: Option<ProgressCallback>,
}

impl ArchiveOrchestrator {
    pub fn new(tool: Arc<dyn ArchiveTool>, game: GameType) -> Self {
        Self {
            tool,
            game,
            progress_callback: None,
        }
    }

    pub fn with_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(ArchiveProgress) + Send + Sync + 'static,
    {
        self.progress_callback = Some(Arc::new(callback));
        self
    }

    pub fn game(&self) -> GameType {
        self.game
    }

    /// Archive `files` (absolute, or relative to `source_dir`) into
    /// `<output_base>.<ext>`, `<output_base>_pack0.<ext>`, ...
    ///
    /// Never panics or returns early with an error; all failures are reported
    /// through the manifest.
    pub fn create_chunked_archive(
        &self,
        source_dir: &Utf8Path,
        output_base: &Utf8Path,
        files: &[Utf8PathBuf],
        max_chunk_size_gb: f64,
    ) -> ArchiveManifest {
        let mut created = Vec::new();
        let result = self.run(source_dir, output_base, files, max_chunk_size_gb, &mut created);

        match result {
            Ok(message) => {
                tracing::info!("{}", message);
                ArchiveManifest {
                    created_archive_paths: created,
                    success: true,
                    message,
                }
            }
            Err(err) => {
                tracing::error!("Archive creation failed: {}", err);
                ArchiveManifest {
                    created_archive_paths: created,
                    success: false,
                    message: err.to_string(),
                }
            }
        }
    }

    fn run(
        &self,
        source_dir: &Utf8Path,
        output_base: &Utf8Path,
        files: &[Utf8PathBuf],
        max_chunk_size_gb: f64,
        created: &mut Vec<Utf8PathBuf>,
    ) -> Result<String> {
        let max_bytes =
            gb_to_bytes(max_chunk_size_gb).ok_or(Error::InvalidChunkSize(max_chunk_size_gb))?;

        if files.is_empty() {
            return Ok("Nothing to pack".to_string());
        }

        let sized = files
            .iter()
            .map(|file| -> Result<(Utf8PathBuf, u64)> {
                let path = absolute_under(source_dir, file);
                let size = std::fs::metadata(&path)?.len();
                Ok((path, size))
            })
            .collect::<Result<Vec<_>>>()?;
        let total_bytes: u64 = sized.iter().map(|(_, size)| size).sum();
        let listed = sized
            .iter()
            .map(|(path, _)| relative_to(source_dir, path))
            .collect::<Result<BTreeSet<_>>>()?;

        if let Some(parent) = output_base.parent().filter(|p| !p.as_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let extension = self.game.archive_extension();
        remove_previous_set(output_base, extension)?;

        if total_bytes <= max_bytes {
            tracing::info!(
                "{} files ({} bytes) fit in one archive",
                sized.len(),
                total_bytes
            );
            let output = archive_path(output_base, 0, extension);
            self.emit_progress(1, 1, &output);
            if covers_directory(source_dir, &listed) {
                self.archive_dir(source_dir, &output, sized.len())?;
            } else {
                tracing::debug!("{} holds unlisted files, staging the list", source_dir);
                let chunk = Chunk {
                    files: sized.iter().map(|(path, _)| path.clone()).collect(),
                    total_size_bytes: total_bytes,
                };
                self.archive_chunk(source_dir, &chunk, &output)?;
            }
            created.push(output);
        } else {
            let chunks = pack_chunks(sized.clone(), max_bytes);
            tracing::info!(
                "Splitting {} files ({} bytes) into {} archives",
                sized.len(),
                total_bytes,
                chunks.len()
            );

            for (index, chunk) in chunks.iter().enumerate() {
                let output = archive_path(output_base, index, extension);
                self.emit_progress(index + 1, chunks.len(), &output);
                self.archive_chunk(source_dir, chunk, &output)?;
                created.push(output);
            }
        }

        verify_integrity(&sized, created)?;

        Ok(format!(
            "Created {} archive(s) from {} files",
            created.len(),
            sized.len()
        ))
    }

    fn archive_chunk(
        &self,
        source_dir: &Utf8Path,
        chunk: &Chunk,
        output: &Utf8Path,
    ) -> Result<()> {
        let staging = tempfile::Builder::new().prefix("bgs-stage-").tempdir()?;
        let staging_dir = Utf8Path::from_path(staging.path())
            .ok_or_else(|| Error::Staging {
                path: output.to_path_buf(),
                message: format!("non UTF-8 staging path {}", staging.path().display()),
            })?
            .to_path_buf();

        for file in &chunk.files {
            stage_file(source_dir, file, &staging_dir)?;
        }
        tracing::debug!(
            "Staged {} files ({} bytes) for {}",
            chunk.files.len(),
            chunk.total_size_bytes,
            output
        );

        self.archive_dir(&staging_dir, output, chunk.files.len())
        // `staging` is dropped here, removing the directory
    }

    fn archive_dir(&self, dir: &Utf8Path, output: &Utf8Path, file_count: usize) -> Result<()> {
        let request = ArchiveRequest {
            staging_dir: dir,
            output_path: output,
            game: self.game,
            file_count,
            timeout: tool_timeout(file_count),
        };
        let tool_output = self.tool.create_archive(&request)?;
        tracing::debug!("Tool output for {}: {}", output, tool_output.trim());

        if !is_non_empty_file(output) {
            return Err(ToolError::MissingOutput(output.to_path_buf()).into());
        }
        Ok(())
    }

    fn emit_progress(&self, current: usize, total: usize, archive: &Utf8Path) {
        if let Some(callback) = &self.progress_callback {
            callback(ArchiveProgress {
                current,
                total,
                archive: archive.to_path_buf(),
            });
        }
    }
}

fn absolute_under(source_dir: &Utf8Path, file: &Utf8Path) -> Utf8PathBuf {
    if file.is_absolute() {
        file.to_path_buf()
    } else {
        source_dir.join(file)
    }
}

fn relative_to(source_dir: &Utf8Path, file: &Utf8Path) -> Result<Utf8PathBuf> {
    file.strip_prefix(source_dir)
        .map(Utf8Path::to_path_buf)
        .map_err(|_| Error::Staging {
            path: file.to_path_buf(),
            message: format!("file is not inside {}", source_dir),
        })
}

/// Whether `listed` (relative to `source_dir`) names every file below it.
fn covers_directory(source_dir: &Utf8Path, listed: &BTreeSet<Utf8PathBuf>) -> bool {
    let mut present = 0usize;
    for entry in walkdir::WalkDir::new(source_dir) {
        let Ok(entry) = entry else {
            return false;
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(relative) = entry
            .path()
            .strip_prefix(source_dir)
            .ok()
            .and_then(Utf8Path::from_path)
        else {
            return false;
        };
        if !listed.contains(relative) {
            return false;
        }
        present += 1;
    }
    present == listed.len()
}

fn stage_file(source_dir: &Utf8Path, file: &Utf8Path, staging_dir: &Utf8Path) -> Result<()> {
    let relative = relative_to(source_dir, file)?;

    let target = staging_dir.join(relative);
    let staging_error = |err: std::io::Error| Error::Staging {
        path: file.to_path_buf(),
        message: err.to_string(),
    };

    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent).map_err(staging_error)?;
    }
    std::fs::copy(file, &target).map_err(staging_error)?;
    Ok(())
}

/// Remove every `<base>[_packN].<extension>` next to `output_base`.
fn remove_previous_set(output_base: &Utf8Path, extension: &str) -> Result<()> {
    let Some(base) = output_base.file_name() else {
        return Ok(());
    };
    let dir = match output_base.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };

    for entry in dir.read_dir_utf8()? {
        let entry = entry?;
        let path = entry.path();
        let is_archive = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));
        if !is_archive || !entry.file_type()?.is_file() {
            continue;
        }
        if parse_archive_index(entry.file_name(), base).is_some() {
            std::fs::remove_file(path)?;
            tracing::debug!("Removed stale archive {}", path);
        }
    }
    Ok(())
}

fn is_non_empty_file(path: &Utf8Path) -> bool {
    std::fs::metadata(path)
        .map(|m| m.is_file() && m.len() > 0)
        .unwrap_or(false)
}

fn verify_integrity(sources: &[(Utf8PathBuf, u64)], archives: &[Utf8PathBuf]) -> Result<()> {
    let missing_sources = sources
        .iter()
        .filter(|(path, _)| !path.is_file())
        .count();
    if missing_sources > 0 {
        return Err(Error::Other(format!(
            "Integrity check failed: {} of {} source files disappeared",
            missing_sources,
            sources.len()
        )));
    }

    let mut archive_bytes = 0u64;
    for archive in archives {
        let size = std::fs::metadata(archive).map(|m| m.len()).unwrap_or(0);
        if size == 0 {
            return Err(Error::Other(format!(
                "Integrity check failed: {} is missing or empty",
                archive
            )));
        }
        archive_bytes += size;
    }

    if archive_bytes == 0 {
        return Err(Error::Other(
            "Integrity check failed: no archive data was written".to_string(),
        ));
    }
    Ok(())
}
