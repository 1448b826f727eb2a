//! The classification engine.
//!
//! # Algorithm
//!
//! 1. Enumerate every file under the generated root (deterministic order).
//! 2. On a bounded worker pool, decide a verdict for each file:
//!    - resolve its relative path under the source root case-insensitively;
//!    - not found: **Pack**;
//!    - found: hash both files; a hash error is a **Fail**, equal digests a
//!      **Skip**, different digests a **Loose**.
//! 3. When outputs are configured, walk the pack and loose verdicts in
//!    enumeration order. Within one bucket the first file claiming a data path
//!    (ignoring case) owns it; later claimants in that bucket fail with
//!    [`FailureKind::Collision`]. Skipped files claim nothing.
//! 4. On the same pool, copy the owners to `pack_dir/<data path>` or
//!    `loose_dir/<data path>` and append every outcome to the report under a
//!    single mutex together with the progress counter; the lock is never held
//!    across I/O or the progress callback.
//!
//! Per-file failures are collected, never raised, so one bad file cannot stop
//! the rest of the batch.

use crate::data_path::data_relative_path;
use crate::error::{Error, Result};
use crate::hash::{hash_file, HashError};
use crate::report::{ClassificationReport, ClassifiedFile, FailedFile, FailureKind, FileRecord};
use crate::resolve::resolve_case_insensitive;
use camino::{Utf8Path, Utf8PathBuf};
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, PoisonError};
use walkdir::WalkDir;

/// Worker pool size used when none is configured.
pub const DEFAULT_THREAD_COUNT: usize = 8;

/// Progress information emitted after each file is classified.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyProgress {
    /// Number of files classified so far (1-based once the first file completes).
    pub current: usize,
    /// Number of files handed to the worker pool.
    pub total: usize,
    /// Relative path of the file that just completed.
    pub label: String,
}

type ProgressCallback = Arc<dyn Fn(ClassifyProgress) + Send + Sync>;

/// Where pack and loose files are copied to.
#[derive(Debug, Clone)]
struct Outputs {
    pack_dir: Utf8PathBuf,
    loose_dir: Utf8PathBuf,
}

/// Buckets that receive a copy of the generated file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum CopyBucket {
    Pack,
    Loose,
}

/// Verdict reached before anything is copied.
enum Decision {
    Copy {
        bucket: CopyBucket,
        data_path: Utf8PathBuf,
        matched_source_path: Option<Utf8PathBuf>,
    },
    Done(Outcome),
}

enum Outcome {
    Pack(ClassifiedFile),
    Loose(ClassifiedFile),
    Skip(ClassifiedFile),
    Failed(FailedFile),
}

/// Mutable state shared by the workers. Guarded by a single mutex.
struct SharedState {
    report: ClassificationReport,
    completed: usize,
}

impl SharedState {
    /// Append one outcome and bump the progress counter. Returns the new count.
    fn record(&mut self, outcome: Outcome) -> usize {
        match outcome {
            Outcome::Pack(file) => self.report.pack.push(file),
            Outcome::Loose(file) => self.report.loose.push(file),
            Outcome::Skip(file) => self.report.skip.push(file),
            Outcome::Failed(failed) => self.report.failed.push(failed),
        }
        self.completed += 1;
        self.completed
    }
}

/// Classifies a generated tree against a source tree.
///
/// Configure with the `with_*` methods, then call [`classify`](Self::classify).
pub struct Classifier {
    source_root: Utf8PathBuf,
    generated_root: Utf8PathBuf,
    threads: usize,
    known_dirs: HashSet<String>,
    outputs: Option<Outputs>,
    progress_callback: Option<ProgressCallback>,
}

impl Classifier {
    /// Create a classifier comparing `generated_root` against `source_root`.
    ///
    /// Without [`with_outputs`](Self::with_outputs) nothing is copied; the run
    /// only reports verdicts.
    pub fn new(source_root: Utf8PathBuf, generated_root: Utf8PathBuf) -> Self {
        Self {
            source_root,
            generated_root,
            threads: DEFAULT_THREAD_COUNT,
            known_dirs: HashSet::new(),
            outputs: None,
            progress_callback: None,
        }
    }

    /// Set the worker pool size. Zero is treated as one.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self
    }

    /// Set the lowercase directory names that anchor data-relative paths.
    pub fn with_known_dirs(mut self, known_dirs: HashSet<String>) -> Self {
        self.known_dirs = known_dirs
            .into_iter()
            .map(|name| name.to_lowercase())
            .collect();
        self
    }

    /// Copy pack files under `pack_dir` and loose files under `loose_dir`.
    pub fn with_outputs(mut self, pack_dir: Utf8PathBuf, loose_dir: Utf8PathBuf) -> Self {
        self.outputs = Some(Outputs {
            pack_dir,
            loose_dir,
        });
        self
    }

    /// Register a callback invoked once per classified file.
    ///
    /// The callback runs on worker threads, outside the result lock.
    pub fn with_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(ClassifyProgress) + Send + Sync + 'static,
    {
        self.progress_callback = Some(Arc::new(callback));
        self
    }

    /// Enumerate the generated tree.
    ///
    /// Returns the records in walk order, plus entries whose metadata could not
    /// be read. Paths that are not valid UTF-8 are skipped with a warning.
    pub fn enumerate(&self) -> Result<(Vec<FileRecord>, Vec<FailedFile>)> {
        let mut records = Vec::new();
        let mut failed = Vec::new();

        for entry in WalkDir::new(self.generated_root.as_std_path())
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => return Err(e.into()),
                Err(e) => {
                    match e.path().and_then(Utf8Path::from_path) {
                        Some(path) => failed.push(FailedFile {
                            relative_path: self.relative_to_generated(path),
                            path: path.to_path_buf(),
                            kind: FailureKind::Metadata,
                            message: e.to_string(),
                        }),
                        None => tracing::warn!("Skipping unreadable entry: {}", e),
                    }
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let path = match Utf8PathBuf::from_path_buf(entry.path().to_path_buf()) {
                Ok(p) => p,
                Err(p) => {
                    tracing::warn!("Skipping non-UTF-8 path: {}", p.display());
                    continue;
                }
            };
            let relative_path = self.relative_to_generated(&path);

            match entry.metadata() {
                Ok(metadata) => records.push(FileRecord {
                    absolute_path: path,
                    relative_path,
                    size_bytes: metadata.len(),
                }),
                Err(e) => failed.push(FailedFile {
                    relative_path,
                    path,
                    kind: FailureKind::Metadata,
                    message: e.to_string(),
                }),
            }
        }

        Ok((records, failed))
    }

    /// Run the classification. See the module-level docs for the algorithm.
    pub fn classify(&self) -> Result<ClassificationReport> {
        if !self.generated_root.as_std_path().is_dir() {
            return Err(Error::InvalidGeneratedRoot(self.generated_root.clone()));
        }
        if !self.source_root.as_std_path().is_dir() {
            return Err(Error::InvalidSourceRoot(self.source_root.clone()));
        }
        if let Some(outputs) = &self.outputs {
            std::fs::create_dir_all(outputs.pack_dir.as_std_path())?;
            std::fs::create_dir_all(outputs.loose_dir.as_std_path())?;
        }

        tracing::info!("Classifying generated files...");
        tracing::info!("Source root: {}", self.source_root);
        tracing::info!("Generated root: {}", self.generated_root);

        let (records, metadata_failures) = self.enumerate()?;
        let total = records.len();

        tracing::info!(
            "Enumerated {} files ({} unreadable), using {} workers",
            total + metadata_failures.len(),
            metadata_failures.len(),
            self.threads
        );

        let shared = Mutex::new(SharedState {
            report: ClassificationReport {
                source_root: self.source_root.clone(),
                generated_root: self.generated_root.clone(),
                total: total + metadata_failures.len(),
                failed: metadata_failures,
                ..Default::default()
            },
            completed: 0,
        });

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.threads)
            .thread_name(|index| format!("bgs-classify-{}", index))
            .build()?;

        pool.install(|| {
            let mut decisions: Vec<Decision> =
                records.par_iter().map(|record| self.decide(record)).collect();
            if self.outputs.is_some() {
                resolve_collisions(&records, &mut decisions);
            }

            records.par_iter().zip(decisions).for_each(|(record, decision)| {
                let outcome = match decision {
                    Decision::Copy {
                        bucket,
                        data_path,
                        matched_source_path,
                    } => self.place(record, bucket, data_path, matched_source_path),
                    Decision::Done(outcome) => outcome,
                };
                let current = shared
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .record(outcome);

                self.emit_progress(ClassifyProgress {
                    current,
                    total,
                    label: record.relative_path.to_string(),
                });
            });
        });

        let mut report = shared
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .report;
        report.sort();

        tracing::info!(
            "Classification complete: pack={} loose={} skip={} fail={}",
            report.pack.len(),
            report.loose.len(),
            report.skip.len(),
            report.failed.len()
        );

        Ok(report)
    }

    fn decide(&self, record: &FileRecord) -> Decision {
        let relative = record.relative_path.as_str();
        let data_path = data_relative_path(relative, &self.known_dirs);

        let Some(matched) = resolve_case_insensitive(&self.source_root, relative) else {
            tracing::debug!("PACK {} -> {}", relative, data_path);
            return Decision::Copy {
                bucket: CopyBucket::Pack,
                data_path,
                matched_source_path: None,
            };
        };

        let generated_digest = match hash_file(&record.absolute_path) {
            Ok(digest) => digest,
            Err(e) => return Decision::Done(hash_failure(record, e)),
        };
        let source_digest = match hash_file(&matched) {
            Ok(digest) => digest,
            Err(e) => return Decision::Done(hash_failure(record, e)),
        };

        if generated_digest == source_digest {
            tracing::debug!("SKIP {} (identical to {})", relative, matched);
            Decision::Done(Outcome::Skip(ClassifiedFile {
                relative_path: record.relative_path.clone(),
                source_path: record.absolute_path.clone(),
                data_path,
                output_path: None,
                matched_source_path: Some(matched),
                size_bytes: record.size_bytes,
            }))
        } else {
            tracing::debug!("LOOSE {} (differs from {})", relative, matched);
            Decision::Copy {
                bucket: CopyBucket::Loose,
                data_path,
                matched_source_path: Some(matched),
            }
        }
    }

    /// Copy a pack or loose file into its output bucket (if configured).
    fn place(
        &self,
        record: &FileRecord,
        bucket: CopyBucket,
        data_path: Utf8PathBuf,
        matched_source_path: Option<Utf8PathBuf>,
    ) -> Outcome {
        let output_path = match &self.outputs {
            Some(outputs) => {
                let bucket_dir = match bucket {
                    CopyBucket::Pack => &outputs.pack_dir,
                    CopyBucket::Loose => &outputs.loose_dir,
                };
                let destination = bucket_dir.join(&data_path);
                if let Err(e) = copy_into(&record.absolute_path, &destination) {
                    return copy_failure(record, destination, e.to_string());
                }
                Some(destination)
            }
            None => None,
        };

        let file = ClassifiedFile {
            relative_path: record.relative_path.clone(),
            source_path: record.absolute_path.clone(),
            data_path,
            output_path,
            matched_source_path,
            size_bytes: record.size_bytes,
        };
        match bucket {
            CopyBucket::Pack => Outcome::Pack(file),
            CopyBucket::Loose => Outcome::Loose(file),
        }
    }

    fn relative_to_generated(&self, path: &Utf8Path) -> Utf8PathBuf {
        path.strip_prefix(&self.generated_root)
            .map(Utf8Path::to_path_buf)
            .unwrap_or_else(|_| path.to_path_buf())
    }

    fn emit_progress(&self, progress: ClassifyProgress) {
        if let Some(callback) = &self.progress_callback {
            callback(progress);
        }
    }
}

/// Turn every copy decision whose bucket and data path (ignoring case) were
/// already claimed by an earlier record into a collision failure.
///
/// `decisions` is parallel to `records`, which are in walk order.
fn resolve_collisions(records: &[FileRecord], decisions: &mut [Decision]) {
    let mut owners: HashMap<(CopyBucket, String), &Utf8Path> = HashMap::new();

    for (record, decision) in records.iter().zip(decisions.iter_mut()) {
        let Decision::Copy { bucket, data_path, .. } = &*decision else {
            continue;
        };

        let key = (*bucket, data_path.as_str().to_lowercase());
        match owners.get(&key) {
            Some(owner) => {
                let message =
                    format!("data path '{}' is already provided by '{}'", data_path, owner);
                tracing::warn!("FAIL {}: {}", record.relative_path, message);
                *decision = Decision::Done(Outcome::Failed(FailedFile {
                    relative_path: record.relative_path.clone(),
                    path: record.absolute_path.clone(),
                    kind: FailureKind::Collision,
                    message,
                }));
            }
            None => {
                owners.insert(key, record.relative_path.as_path());
            }
        }
    }
}

fn copy_into(from: &Utf8Path, to: &Utf8Path) -> std::io::Result<()> {
    if let Some(parent) = to.parent() {
        std::fs::create_dir_all(parent.as_std_path())?;
    }
    std::fs::copy(from.as_std_path(), to.as_std_path())?;
    Ok(())
}

fn hash_failure(record: &FileRecord, error: HashError) -> Outcome {
    tracing::warn!("FAIL {}: {}", record.relative_path, error);
    Outcome::Failed(FailedFile {
        relative_path: record.relative_path.clone(),
        path: error.path.clone(),
        kind: FailureKind::Hash,
        message: error.to_string(),
    })
}

fn copy_failure(record: &FileRecord, destination: Utf8PathBuf, message: String) -> Outcome {
    tracing::warn!(
        "FAIL {}: could not copy to {}: {}",
        record.relative_path,
        destination,
        message
    );
    Outcome::Failed(FailedFile {
        relative_path: record.relative_path.clone(),
        path: destination,
        kind: FailureKind::Copy,
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Verdict;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Fixture {
        _temp: tempfile::TempDir,
        source: Utf8PathBuf,
        generated: Utf8PathBuf,
        pack: Utf8PathBuf,
        loose: Utf8PathBuf,
    }

    impl Fixture {
        fn new() -> Self {
            let temp = tempfile::tempdir().unwrap();
            let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap();
            let fixture = Self {
                source: root.join("source"),
                generated: root.join("generated"),
                pack: root.join("out").join("pack"),
                loose: root.join("out").join("loose"),
                _temp: temp,
            };
            std::fs::create_dir_all(&fixture.source).unwrap();
            std::fs::create_dir_all(&fixture.generated).unwrap();
            fixture
        }

        fn write(root: &Utf8Path, relative: &str, content: &[u8]) {
            let path = root.join(relative);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(path, content).unwrap();
        }

        fn source(&self, relative: &str, content: &[u8]) {
            Self::write(&self.source, relative, content);
        }

        fn generated(&self, relative: &str, content: &[u8]) {
            Self::write(&self.generated, relative, content);
        }

        fn classifier(&self) -> Classifier {
            Classifier::new(self.source.clone(), self.generated.clone())
                .with_known_dirs(
                    ["meshes", "textures", "scripts"]
                        .iter()
                        .map(|s| s.to_string())
                        .collect(),
                )
                .with_outputs(self.pack.clone(), self.loose.clone())
        }
    }

    #[test]
    fn test_identical_file_is_skipped_and_new_file_is_packed() {
        let fx = Fixture::new();
        fx.source("meshes/sword.nif", b"A");
        fx.generated("meshes/sword.nif", b"A");
        fx.generated("meshes/shield.nif", b"B");

        let report = fx.classifier().classify().unwrap();

        assert_eq!(report.verdict_of("meshes/sword.nif"), Some(Verdict::Skip));
        assert_eq!(report.verdict_of("meshes/shield.nif"), Some(Verdict::Pack));
        assert!(fx.pack.join("meshes/shield.nif").as_std_path().is_file());
        assert!(!fx.pack.join("meshes/sword.nif").as_std_path().exists());
        assert!(!fx.loose.join("meshes/sword.nif").as_std_path().exists());

        let skipped = &report.skip[0];
        assert_eq!(
            skipped.matched_source_path.as_deref(),
            Some(fx.source.join("meshes/sword.nif").as_path())
        );
        assert!(report.pack[0].matched_source_path.is_none());
    }

    #[test]
    fn test_modified_file_is_loose() {
        let fx = Fixture::new();
        fx.source("textures/wall.dds", b"X");
        fx.generated("textures/wall.dds", b"Y");

        let report = fx.classifier().classify().unwrap();

        assert_eq!(report.verdict_of("textures/wall.dds"), Some(Verdict::Loose));
        assert_eq!(report.loose.len(), 1);
        assert!(report.pack.is_empty());
        assert_eq!(
            std::fs::read(fx.loose.join("textures/wall.dds")).unwrap(),
            b"Y"
        );
        assert!(!fx.pack.join("textures/wall.dds").as_std_path().exists());
    }

    #[test]
    fn test_single_byte_difference_is_loose() {
        let fx = Fixture::new();
        let mut content = vec![0u8; 20_000];
        fx.source("scripts/quest.pex", &content);
        content[19_999] = 1;
        fx.generated("scripts/quest.pex", &content);

        let report = fx.classifier().classify().unwrap();
        assert_eq!(report.verdict_of("scripts/quest.pex"), Some(Verdict::Loose));
    }

    #[test]
    fn test_case_insensitive_match_against_source() {
        let fx = Fixture::new();
        fx.source("Meshes/Armor/Helmet.NIF", b"same");
        fx.generated("meshes/armor/helmet.nif", b"same");

        let report = fx.classifier().classify().unwrap();
        assert_eq!(report.verdict_of("meshes/armor/helmet.nif"), Some(Verdict::Skip));
    }

    #[test]
    fn test_pack_output_uses_data_relative_path() {
        let fx = Fixture::new();
        fx.generated("randomfolder/deep/nested/meshes/armor/helmet.nif", b"new");

        let report = fx.classifier().classify().unwrap();

        assert_eq!(report.pack.len(), 1);
        assert_eq!(report.pack[0].data_path, "meshes/armor/helmet.nif");
        assert_eq!(
            report.pack[0].output_path.as_deref(),
            Some(fx.pack.join("meshes/armor/helmet.nif").as_path())
        );
        assert!(fx.pack.join("meshes/armor/helmet.nif").as_std_path().is_file());
    }

    #[test]
    fn test_every_file_gets_exactly_one_verdict() {
        let fx = Fixture::new();
        for i in 0..40 {
            let name = format!("meshes/set{}/item{}.nif", i % 4, i);
            if i % 3 == 0 {
                fx.source(&name, b"base");
                fx.generated(&name, b"base");
            } else if i % 3 == 1 {
                fx.source(&name, b"base");
                fx.generated(&name, b"changed");
            } else {
                fx.generated(&name, b"brand new");
            }
        }

        let report = fx.classifier().with_threads(3).classify().unwrap();

        assert_eq!(report.total, 40);
        assert_eq!(
            report.pack.len() + report.loose.len() + report.skip.len() + report.failed.len(),
            report.total
        );
        assert_eq!(report.skip.len(), 14);
        assert_eq!(report.loose.len(), 13);
        assert_eq!(report.pack.len(), 13);
        assert_eq!(report.results().len(), 40);
    }

    #[test]
    fn test_result_is_independent_of_thread_count() {
        let fx = Fixture::new();
        for i in 0..25 {
            let name = format!("textures/t{}.dds", i);
            if i % 2 == 0 {
                fx.source(&name, b"x");
            }
            fx.generated(&name, format!("content {}", i % 5).as_bytes());
        }

        let single = Classifier::new(fx.source.clone(), fx.generated.clone())
            .with_threads(1)
            .classify()
            .unwrap();
        let many = Classifier::new(fx.source.clone(), fx.generated.clone())
            .with_threads(8)
            .classify()
            .unwrap();

        assert_eq!(single.results(), many.results());
    }

    #[test]
    fn test_dry_run_copies_nothing() {
        let fx = Fixture::new();
        fx.generated("meshes/new.nif", b"n");

        let report = Classifier::new(fx.source.clone(), fx.generated.clone())
            .classify()
            .unwrap();

        assert_eq!(report.verdict_of("meshes/new.nif"), Some(Verdict::Pack));
        assert!(report.pack[0].output_path.is_none());
        assert!(!fx.pack.as_std_path().exists());
    }

    #[test]
    fn test_unreadable_source_counterpart_fails_without_aborting() {
        let fx = Fixture::new();
        // A directory where the file should be: resolves, but cannot be hashed
        std::fs::create_dir_all(fx.source.join("meshes").join("broken.nif")).unwrap();
        fx.generated("meshes/broken.nif", b"data");
        fx.generated("meshes/fine.nif", b"data");

        let report = fx.classifier().classify().unwrap();

        assert_eq!(report.verdict_of("meshes/broken.nif"), Some(Verdict::Fail));
        assert_eq!(report.failed[0].kind, FailureKind::Hash);
        assert_eq!(report.verdict_of("meshes/fine.nif"), Some(Verdict::Pack));
        assert!(!fx.pack.join("meshes/broken.nif").as_std_path().exists());
        assert!(!fx.loose.join("meshes/broken.nif").as_std_path().exists());
    }

    #[test]
    fn test_colliding_data_paths_fail_the_later_file() {
        let fx = Fixture::new();
        fx.generated("a/meshes/x.nif", b"first");
        fx.generated("b/meshes/x.nif", b"second");

        let report = fx.classifier().classify().unwrap();

        assert_eq!(report.verdict_of("a/meshes/x.nif"), Some(Verdict::Pack));
        assert_eq!(report.verdict_of("b/meshes/x.nif"), Some(Verdict::Fail));
        assert_eq!(report.failed[0].kind, FailureKind::Collision);
        assert_eq!(std::fs::read(fx.pack.join("meshes/x.nif")).unwrap(), b"first");
    }

    #[test]
    fn test_skipped_file_does_not_claim_its_data_path() {
        let fx = Fixture::new();
        fx.source("meshes/x.nif", b"base");
        fx.generated("meshes/x.nif", b"base");
        fx.generated("zz/meshes/x.nif", b"new");

        let report = fx.classifier().classify().unwrap();

        assert_eq!(report.verdict_of("meshes/x.nif"), Some(Verdict::Skip));
        assert_eq!(report.verdict_of("zz/meshes/x.nif"), Some(Verdict::Pack));
        assert!(report.failed.is_empty());
        assert_eq!(std::fs::read(fx.pack.join("meshes/x.nif")).unwrap(), b"new");
    }

    #[test]
    fn test_pack_and_loose_files_may_share_a_data_path() {
        let fx = Fixture::new();
        fx.source("meshes/x.nif", b"base");
        fx.generated("meshes/x.nif", b"changed");
        fx.generated("zz/meshes/x.nif", b"new");

        let report = fx.classifier().classify().unwrap();

        assert_eq!(report.verdict_of("meshes/x.nif"), Some(Verdict::Loose));
        assert_eq!(report.verdict_of("zz/meshes/x.nif"), Some(Verdict::Pack));
        assert!(report.failed.is_empty());
        assert_eq!(std::fs::read(fx.loose.join("meshes/x.nif")).unwrap(), b"changed");
        assert_eq!(std::fs::read(fx.pack.join("meshes/x.nif")).unwrap(), b"new");
    }

    #[test]
    fn test_colliding_data_paths_are_fine_without_outputs() {
        let fx = Fixture::new();
        fx.generated("a/meshes/x.nif", b"first");
        fx.generated("b/meshes/x.nif", b"second");

        let report = Classifier::new(fx.source.clone(), fx.generated.clone())
            .with_known_dirs(["meshes".to_string()].into_iter().collect())
            .classify()
            .unwrap();

        assert_eq!(report.pack.len(), 2);
        assert!(report.failed.is_empty());
    }

    #[test]
    fn test_progress_reports_every_file() {
        let fx = Fixture::new();
        for i in 0..10 {
            fx.generated(&format!("meshes/{}.nif", i), b"x");
        }

        let calls = Arc::new(AtomicUsize::new(0));
        let max_seen = Arc::new(AtomicUsize::new(0));
        let (calls_cb, max_cb) = (calls.clone(), max_seen.clone());

        fx.classifier()
            .with_progress(move |p| {
                assert_eq!(p.total, 10);
                calls_cb.fetch_add(1, Ordering::SeqCst);
                max_cb.fetch_max(p.current, Ordering::SeqCst);
            })
            .classify()
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 10);
        assert_eq!(max_seen.load(Ordering::SeqCst), 10);
    }

    #[test]
    fn test_missing_roots_are_errors() {
        let fx = Fixture::new();
        let missing = fx.source.join("nope");

        let err = Classifier::new(fx.source.clone(), missing.clone())
            .classify()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidGeneratedRoot(p) if p == missing));

        let err = Classifier::new(missing.clone(), fx.generated.clone())
            .classify()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidSourceRoot(_)));
    }
}
