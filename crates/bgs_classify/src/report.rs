//! Records, per-file results and the aggregated classification report.

use camino::Utf8PathBuf;
use serde::Serialize;

/// One file found under the generated root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub absolute_path: Utf8PathBuf,
    /// Path relative to the generated root.
    pub relative_path: Utf8PathBuf,
    pub size_bytes: u64,
}

/// Outcome of classifying a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Verdict {
    /// No counterpart in the source tree; safe to archive.
    Pack,
    /// Counterpart exists with different content; must stay loose.
    Loose,
    /// Counterpart exists with identical content.
    Skip,
    /// An I/O error prevented a decision.
    Fail,
}

/// The decision made for one [`FileRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    pub relative_path: Utf8PathBuf,
    pub verdict: Verdict,
    /// Present only when a source counterpart was found.
    pub matched_source_path: Option<Utf8PathBuf>,
}

/// A file that landed in the pack, loose or skip bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedFile {
    /// Path relative to the generated root.
    pub relative_path: Utf8PathBuf,
    /// Location of the generated file.
    pub source_path: Utf8PathBuf,
    /// Path relative to the game's data root (see [`crate::data_relative_path`]).
    pub data_path: Utf8PathBuf,
    /// Where the file was copied to, if outputs were configured and the bucket copies.
    pub output_path: Option<Utf8PathBuf>,
    pub matched_source_path: Option<Utf8PathBuf>,
    pub size_bytes: u64,
}

/// Which step failed for a [`FailedFile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FailureKind {
    /// Reading the generated file's metadata failed during enumeration.
    Metadata,
    /// Hashing the generated file or its source counterpart failed.
    Hash,
    /// Copying the file into its output bucket failed.
    Copy,
    /// An earlier file (in walk order) is copied to the same data path of
    /// the same output bucket.
    Collision,
}

/// A file whose classification could not be completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedFile {
    pub relative_path: Utf8PathBuf,
    /// The path the failing operation was working on.
    pub path: Utf8PathBuf,
    pub kind: FailureKind,
    pub message: String,
}

/// Aggregated outcome of a classification run.
///
/// Each bucket is sorted by relative path, so the report is identical
/// regardless of the order in which workers finished.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationReport {
    pub source_root: Utf8PathBuf,
    pub generated_root: Utf8PathBuf,
    /// Number of files enumerated under the generated root.
    pub total: usize,
    pub pack: Vec<ClassifiedFile>,
    pub loose: Vec<ClassifiedFile>,
    pub skip: Vec<ClassifiedFile>,
    pub failed: Vec<FailedFile>,
}

impl ClassificationReport {
    /// Flatten the buckets back into one result per file.
    pub fn results(&self) -> Vec<ClassificationResult> {
        let bucket = |files: &[ClassifiedFile], verdict: Verdict| {
            files
                .iter()
                .map(move |f| ClassificationResult {
                    relative_path: f.relative_path.clone(),
                    verdict,
                    matched_source_path: f.matched_source_path.clone(),
                })
                .collect::<Vec<_>>()
        };

        let mut results = bucket(&self.pack, Verdict::Pack);
        results.extend(bucket(&self.loose, Verdict::Loose));
        results.extend(bucket(&self.skip, Verdict::Skip));
        results.extend(self.failed.iter().map(|f| ClassificationResult {
            relative_path: f.relative_path.clone(),
            verdict: Verdict::Fail,
            matched_source_path: None,
        }));
        results.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        results
    }

    /// Verdict recorded for `relative_path`, if the file was enumerated.
    pub fn verdict_of(&self, relative_path: &str) -> Option<Verdict> {
        let has = |files: &[ClassifiedFile]| files.iter().any(|f| f.relative_path == relative_path);

        if has(&self.pack) {
            Some(Verdict::Pack)
        } else if has(&self.loose) {
            Some(Verdict::Loose)
        } else if has(&self.skip) {
            Some(Verdict::Skip)
        } else if self.failed.iter().any(|f| f.relative_path == relative_path) {
            Some(Verdict::Fail)
        } else {
            None
        }
    }

    /// Sum of the sizes of the files in the pack bucket.
    pub fn pack_size_bytes(&self) -> u64 {
        self.pack.iter().map(|f| f.size_bytes).sum()
    }

    /// Sum of the sizes of the files in the loose bucket.
    pub fn loose_size_bytes(&self) -> u64 {
        self.loose.iter().map(|f| f.size_bytes).sum()
    }

    pub(crate) fn sort(&mut self) {
        self.pack.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        self.loose.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        self.skip.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        self.failed.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    }
}
