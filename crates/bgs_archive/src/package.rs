//! Package assembly.
//!
//! A package is a directory named after the mod that holds everything a user
//! installs:
//!
//! ```text
//! <output_dir>/<mod>/
//!   <mod>.bsa, <mod>_pack0.bsa, ...   archives of the pack bucket
//!   <mod>.esp, <mod>_0.esp, ...       one plugin per archive
//!   <mod>_loose.zip                   loose override files
//!   package.json                      PackageManifest
//! ```
//!
//! Components are produced in `<output_dir>/.build/<mod>` and only moved into
//! the package once they completed. The work directory is kept when something
//! failed so the partial output can be inspected.

use crate::compress::CompressionTool;
use crate::error::{Error, Result};
use crate::esp::EspFactory;
use crate::orchestrator::ArchiveOrchestrator;
use crate::tool::ArchiveTool;
use bgs_game::GameType;
use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;
use std::sync::Arc;

/// Default maximum size of one archive.
pub const DEFAULT_MAX_CHUNK_SIZE_GB: f64 = 2.0;

/// Version of the `package.json` layout.
pub const MANIFEST_VERSION: u32 = 1;

/// Name of the metadata file written into every package.
pub const MANIFEST_FILE_NAME: &str = "package.json";

const BUILD_DIR: &str = ".build";

/// A set of files below a common root, as produced by classification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileBucket {
    root: Utf8PathBuf,
    files: Vec<Utf8PathBuf>,
}

impl FileBucket {
    /// `files` must be absolute paths below `root`.
    pub fn new(root: impl Into<Utf8PathBuf>, files: Vec<Utf8PathBuf>) -> Self {
        Self {
            root: root.into(),
            files,
        }
    }

    /// Collect every file below `root`. A missing root is an empty bucket.
    pub fn from_dir(root: impl Into<Utf8PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Ok(Self::new(root, Vec::new()));
        }

        let mut files = Vec::new();
        for entry in walkdir::WalkDir::new(&root)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = Utf8PathBuf::from_path_buf(entry.into_path()).map_err(|path| {
                Error::Other(format!("Non UTF-8 path in bucket: {}", path.display()))
            })?;
            files.push(path);
        }

        Ok(Self::new(root, files))
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub fn files(&self) -> &[Utf8PathBuf] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Sum of the sizes of the files that can currently be read.
    pub fn total_size_bytes(&self) -> u64 {
        self.files
            .iter()
            .filter_map(|f| std::fs::metadata(f).ok())
            .map(|m| m.len())
            .sum()
    }
}

/// A file that ended up in the package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackagedFile {
    /// File name inside the package directory.
    pub name: String,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PackageComponent {
    Archives,
    Plugins,
    LooseBundle,
}

/// Metadata summary written as `package.json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    pub version: u32,
    pub mod_name: String,
    pub game: GameType,
    /// Components present in the package.
    pub components: Vec<PackageComponent>,
    pub archives: Vec<PackagedFile>,
    pub plugins: Vec<PackagedFile>,
    pub loose_bundle: Option<PackagedFile>,
    pub pack_file_count: usize,
    pub pack_size_bytes: u64,
    pub loose_file_count: usize,
    pub loose_size_bytes: u64,
    pub success: bool,
    /// Failures and notes collected while assembling.
    pub messages: Vec<String>,
}

/// Outcome of [`PackageAssembler::assemble`].
#[derive(Debug, Clone)]
pub struct PackageResult {
    /// Every requested component was produced and moved into the package.
    pub success: bool,
    pub package_path: Utf8PathBuf,
    pub manifest: PackageManifest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PackageStage {
    Archiving,
    CreatingPlugin,
    CompressingLoose,
    Finalizing,
    Complete,
}

/// Progress update emitted by the assembler.
///
/// `current`/`total` count archives during [`PackageStage::Archiving`] and are
/// zero for the other stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackageProgress {
    pub stage: PackageStage,
    pub current: usize,
    pub total: usize,
}

type ProgressCallback = Arc<dyn Fn(PackageProgress) + Send + Sync>;

/// Builds a distributable package out of a pack and a loose bucket.
pub struct PackageAssembler {
    archive_tool: Arc<dyn ArchiveTool>,
    compressor: Arc<dyn CompressionTool>,
    esp_factory: Arc<dyn EspFactory>,
    game: GameType,
    max_chunk_size_gb: f64,
    progress_callback: Option<ProgressCallback>,
}

impl PackageAssembler {
    pub fn new(
        archive_tool: Arc<dyn ArchiveTool>,
        compressor: Arc<dyn CompressionTool>,
        esp_factory: Arc<dyn EspFactory>,
        game: GameType,
    ) -> Self {
        Self {
            archive_tool,
            compressor,
            esp_factory,
            game,
            max_chunk_size_gb: DEFAULT_MAX_CHUNK_SIZE_GB,
            progress_callback: None,
        }
    }

    pub fn with_max_chunk_size_gb(mut self, max_chunk_size_gb: f64) -> Self {
        self.max_chunk_size_gb = max_chunk_size_gb;
        self
    }

    pub fn with_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(PackageProgress) + Send + Sync + 'static,
    {
        self.progress_callback = Some(Arc::new(callback));
        self
    }

    /// Assemble `<output_dir>/<mod_name>`.
    ///
    /// Empty buckets are absent components, not failures. A failing component
    /// does not stop the others; it only clears `success`. A `mod_name` that is
    /// not a single plain path component fails before anything is touched.
    pub fn assemble(
        &self,
        pack: &FileBucket,
        loose: &FileBucket,
        mod_name: &str,
        output_dir: &Utf8Path,
    ) -> PackageResult {
        let package_path = output_dir.join(mod_name);
        let work_dir = output_dir.join(BUILD_DIR).join(mod_name);

        let mut manifest = PackageManifest {
            version: MANIFEST_VERSION,
            mod_name: mod_name.to_string(),
            game: self.game,
            components: Vec::new(),
            archives: Vec::new(),
            plugins: Vec::new(),
            loose_bundle: None,
            pack_file_count: pack.len(),
            pack_size_bytes: pack.total_size_bytes(),
            loose_file_count: loose.len(),
            loose_size_bytes: loose.total_size_bytes(),
            success: true,
            messages: Vec::new(),
        };

        if !is_plain_component(mod_name) {
            manifest.fail(format!(
                "Invalid mod name '{}': must be a single directory name",
                mod_name
            ));
            return PackageResult {
                success: false,
                package_path,
                manifest,
            };
        }

        tracing::info!(
            "Assembling package '{}' ({} pack files, {} loose files)",
            mod_name,
            pack.len(),
            loose.len()
        );

        if let Err(err) = prepare_dirs(&work_dir, &package_path) {
            manifest.fail(format!("Failed to prepare output directories: {}", err));
            return PackageResult {
                success: false,
                package_path,
                manifest,
            };
        }

        let mut archives = Vec::new();
        let mut plugins = Vec::new();
        if !pack.is_empty() {
            match self.build_archives(pack, mod_name, &work_dir) {
                Ok((created, descriptors)) => {
                    archives = created;
                    plugins = descriptors;
                }
                Err(message) => manifest.fail(message),
            }
        }

        let mut loose_bundle = None;
        if !loose.is_empty() {
            self.emit_progress(PackageStage::CompressingLoose, 0, 0);
            let bundle = work_dir.join(format!("{}_loose.zip", mod_name));
            match self.compressor.compress(loose.files(), &bundle, Some(loose.root())) {
                Ok(message) => {
                    tracing::debug!("{}", message);
                    loose_bundle = Some(bundle);
                }
                Err(err) => manifest.fail(format!("Loose file compression failed: {}", err)),
            }
        }

        self.emit_progress(PackageStage::Finalizing, 0, 0);
        manifest.archives = move_all(&archives, &package_path, &mut manifest.messages);
        manifest.plugins = move_all(&plugins, &package_path, &mut manifest.messages);
        if let Some(bundle) = &loose_bundle {
            manifest.loose_bundle =
                move_all(std::slice::from_ref(bundle), &package_path, &mut manifest.messages).pop();
        }

        let moved = manifest.archives.len()
            + manifest.plugins.len()
            + usize::from(manifest.loose_bundle.is_some());
        let expected = archives.len() + plugins.len() + usize::from(loose_bundle.is_some());
        if moved != expected {
            manifest.success = false;
        }

        if !manifest.archives.is_empty() {
            manifest.components.push(PackageComponent::Archives);
        }
        if !manifest.plugins.is_empty() {
            manifest.components.push(PackageComponent::Plugins);
        }
        if manifest.loose_bundle.is_some() {
            manifest.components.push(PackageComponent::LooseBundle);
        }

        if let Err(err) = write_manifest(&manifest, &package_path) {
            manifest.fail(format!("Failed to write {}: {}", MANIFEST_FILE_NAME, err));
        }

        if manifest.success {
            remove_work_dir(&work_dir);
            tracing::info!("Package ready at {}", package_path);
        } else {
            tracing::warn!(
                "Package '{}' is incomplete, work files kept in {}",
                mod_name,
                work_dir
            );
        }

        self.emit_progress(PackageStage::Complete, 0, 0);
        PackageResult {
            success: manifest.success,
            package_path,
            manifest,
        }
    }

    /// Create archives and their plugins in `work_dir`.
    fn build_archives(
        &self,
        pack: &FileBucket,
        mod_name: &str,
        work_dir: &Utf8Path,
    ) -> std::result::Result<(Vec<Utf8PathBuf>, Vec<Utf8PathBuf>), String> {
        self.emit_progress(PackageStage::Archiving, 0, 0);

        let callback = self.progress_callback.clone();
        let orchestrator = ArchiveOrchestrator::new(self.archive_tool.clone(), self.game)
            .with_progress(move |progress| {
                if let Some(callback) = &callback {
                    callback(PackageProgress {
                        stage: PackageStage::Archiving,
                        current: progress.current,
                        total: progress.total,
                    });
                }
            });

        let archive_manifest = orchestrator.create_chunked_archive(
            pack.root(),
            &work_dir.join(mod_name),
            pack.files(),
            self.max_chunk_size_gb,
        );
        if !archive_manifest.success {
            return Err(format!("Archive creation failed: {}", archive_manifest.message));
        }

        self.emit_progress(PackageStage::CreatingPlugin, 0, 0);
        let plugins = self
            .esp_factory
            .create(
                mod_name,
                work_dir,
                self.game,
                &archive_manifest.created_archive_paths,
            )
            .map_err(|err| format!("Plugin creation failed: {}", err))?;

        Ok((archive_manifest.created_archive_paths, plugins))
    }

    fn emit_progress(&self, stage: PackageStage, current: usize, total: usize) {
        if let Some(callback) = &self.progress_callback {
            callback(PackageProgress {
                stage,
                current,
                total,
            });
        }
    }
}

impl PackageManifest {
    fn fail(&mut self, message: String) {
        tracing::error!("{}", message);
        self.success = false;
        self.messages.push(message);
    }
}

/// Whether `name` joins onto a directory as exactly one new child.
fn is_plain_component(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && name != BUILD_DIR
        && !name.contains(['/', '\\'])
}

fn prepare_dirs(work_dir: &Utf8Path, package_path: &Utf8Path) -> Result<()> {
    for dir in [work_dir, package_path] {
        if dir.exists() {
            std::fs::remove_dir_all(dir)?;
        }
        std::fs::create_dir_all(dir)?;
    }
    Ok(())
}

/// Move `files` into `target_dir`, recording failures in `messages`.
fn move_all(
    files: &[Utf8PathBuf],
    target_dir: &Utf8Path,
    messages: &mut Vec<String>,
) -> Vec<PackagedFile> {
    let mut moved = Vec::with_capacity(files.len());
    for file in files {
        match move_file(file, target_dir) {
            Ok(packaged) => moved.push(packaged),
            Err(err) => {
                let message = format!("Failed to move {} into the package: {}", file, err);
                tracing::error!("{}", message);
                messages.push(message);
            }
        }
    }
    moved
}

fn move_file(file: &Utf8Path, target_dir: &Utf8Path) -> Result<PackagedFile> {
    let name = file
        .file_name()
        .ok_or_else(|| Error::Other(format!("'{}' has no file name", file)))?
        .to_string();
    let target = target_dir.join(&name);

    if std::fs::rename(file, &target).is_err() {
        // Rename fails across filesystems
        std::fs::copy(file, &target)?;
        std::fs::remove_file(file)?;
    }

    let size_bytes = std::fs::metadata(&target)?.len();
    Ok(PackagedFile { name, size_bytes })
}

fn write_manifest(manifest: &PackageManifest, package_path: &Utf8Path) -> Result<()> {
    let json = serde_json::to_string_pretty(manifest)?;
    std::fs::write(package_path.join(MANIFEST_FILE_NAME), json)?;
    Ok(())
}

fn remove_work_dir(work_dir: &Utf8Path) {
    if let Err(err) = std::fs::remove_dir_all(work_dir) {
        tracing::warn!("Failed to remove work directory {}: {}", work_dir, err);
        return;
    }
    // Drop `.build` too once no other package is being assembled in it
    if let Some(build_dir) = work_dir.parent() {
        let _ = std::fs::remove_dir(build_dir);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compress::ZipCompressor;
    use crate::error::ToolError;
    use crate::naming::descriptor_name;
    use crate::orchestrator::BYTES_PER_GB;
    use crate::tool::ArchiveRequest;
    use std::sync::Mutex;

    struct FakeArchiveTool {
        fail: bool,
    }

    impl ArchiveTool for FakeArchiveTool {
        fn create_archive(
            &self,
            request: &ArchiveRequest<'_>,
        ) -> std::result::Result<String, ToolError> {
            if self.fail {
                return Err(ToolError::Exit {
                    program: "fake".to_string(),
                    status: "exit status: 2".to_string(),
                    output: "archiver exploded".to_string(),
                });
            }
            std::fs::write(request.output_path, b"BSA\0").unwrap();
            Ok(String::new())
        }
    }

    struct FakeEspFactory;

    impl EspFactory for FakeEspFactory {
        fn create(
            &self,
            mod_name: &str,
            output_dir: &Utf8Path,
            _game: GameType,
            archive_paths: &[Utf8PathBuf],
        ) -> Result<Vec<Utf8PathBuf>> {
            (0..archive_paths.len())
                .map(|i| {
                    let path = output_dir.join(format!("{}.esp", descriptor_name(mod_name, i)));
                    std::fs::write(&path, b"TES4")?;
                    Ok(path)
                })
                .collect()
        }
    }

    struct FailingCompressor;

    impl CompressionTool for FailingCompressor {
        fn compress(
            &self,
            _files: &[Utf8PathBuf],
            _archive_path: &Utf8Path,
            _base_dir: Option<&Utf8Path>,
        ) -> Result<String> {
            Err(Error::Other("disk full".to_string()))
        }
    }

    fn temp_root() -> (tempfile::TempDir, Utf8PathBuf) {
        let temp = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap();
        (temp, root)
    }

    fn bucket(root: &Utf8Path, files: &[(&str, usize)]) -> FileBucket {
        for (relative, size) in files {
            let path = root.join(relative);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(&path, vec![b'x'; *size]).unwrap();
        }
        FileBucket::from_dir(root.to_path_buf()).unwrap()
    }

    fn assembler(archive_fails: bool, compressor: Arc<dyn CompressionTool>) -> PackageAssembler {
        PackageAssembler::new(
            Arc::new(FakeArchiveTool { fail: archive_fails }),
            compressor,
            Arc::new(FakeEspFactory),
            GameType::SkyrimSpecialEdition,
        )
    }

    fn names(files: &[PackagedFile]) -> Vec<&str> {
        files.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn test_full_package() {
        let (_temp, root) = temp_root();
        let pack = bucket(&root.join("pack"), &[("meshes/a.nif", 10), ("textures/b.dds", 20)]);
        let loose = bucket(&root.join("loose"), &[("scripts/c.pex", 5)]);
        let out = root.join("dist");

        let result =
            assembler(false, Arc::new(ZipCompressor)).assemble(&pack, &loose, "MyMod", &out);

        assert!(result.success, "{:?}", result.manifest.messages);
        assert_eq!(result.package_path, out.join("MyMod"));
        assert_eq!(names(&result.manifest.archives), vec!["MyMod.bsa"]);
        assert_eq!(names(&result.manifest.plugins), vec!["MyMod.esp"]);
        assert_eq!(
            result.manifest.loose_bundle.as_ref().map(|f| f.name.as_str()),
            Some("MyMod_loose.zip")
        );
        assert_eq!(
            result.manifest.components,
            vec![
                PackageComponent::Archives,
                PackageComponent::Plugins,
                PackageComponent::LooseBundle
            ]
        );
        assert_eq!(result.manifest.pack_file_count, 2);
        assert_eq!(result.manifest.pack_size_bytes, 30);
        assert_eq!(result.manifest.loose_file_count, 1);
        assert_eq!(result.manifest.loose_size_bytes, 5);

        for name in ["MyMod.bsa", "MyMod.esp", "MyMod_loose.zip", MANIFEST_FILE_NAME] {
            assert!(out.join("MyMod").join(name).is_file(), "missing {}", name);
        }
        assert!(!out.join(BUILD_DIR).exists());
    }

    #[test]
    fn test_package_json_uses_camel_case() {
        let (_temp, root) = temp_root();
        let pack = bucket(&root.join("pack"), &[("meshes/a.nif", 10)]);
        let loose = FileBucket::default();
        let out = root.join("dist");

        let result =
            assembler(false, Arc::new(ZipCompressor)).assemble(&pack, &loose, "MyMod", &out);
        assert!(result.success);

        let text = std::fs::read_to_string(out.join("MyMod").join(MANIFEST_FILE_NAME)).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["modName"], "MyMod");
        assert_eq!(json["game"], "sse");
        assert_eq!(json["packFileCount"], 1);
        assert_eq!(json["looseBundle"], serde_json::Value::Null);
        assert_eq!(json["components"], serde_json::json!(["archives", "plugins"]));
    }

    #[test]
    fn test_empty_buckets_are_a_valid_empty_package() {
        let (_temp, root) = temp_root();
        let out = root.join("dist");

        let result = assembler(false, Arc::new(ZipCompressor)).assemble(
            &FileBucket::default(),
            &FileBucket::from_dir(root.join("missing")).unwrap(),
            "Empty",
            &out,
        );

        assert!(result.success);
        assert!(result.manifest.components.is_empty());
        assert!(result.manifest.messages.is_empty());
        assert!(out.join("Empty").join(MANIFEST_FILE_NAME).is_file());
    }

    #[test]
    fn test_archive_failure_still_bundles_loose_files() {
        let (_temp, root) = temp_root();
        let pack = bucket(&root.join("pack"), &[("meshes/a.nif", 10)]);
        let loose = bucket(&root.join("loose"), &[("scripts/c.pex", 5)]);
        let out = root.join("dist");

        let result =
            assembler(true, Arc::new(ZipCompressor)).assemble(&pack, &loose, "MyMod", &out);

        assert!(!result.success);
        assert!(!result.manifest.success);
        assert!(result.manifest.archives.is_empty());
        assert!(result.manifest.plugins.is_empty());
        assert_eq!(result.manifest.components, vec![PackageComponent::LooseBundle]);
        assert!(result.manifest.messages[0].contains("archiver exploded"));
        assert!(out.join("MyMod").join("MyMod_loose.zip").is_file());
        // Work directory is kept for inspection
        assert!(out.join(BUILD_DIR).join("MyMod").is_dir());
    }

    #[test]
    fn test_compression_failure_still_packages_archives() {
        let (_temp, root) = temp_root();
        let pack = bucket(&root.join("pack"), &[("meshes/a.nif", 10)]);
        let loose = bucket(&root.join("loose"), &[("scripts/c.pex", 5)]);
        let out = root.join("dist");

        let result =
            assembler(false, Arc::new(FailingCompressor)).assemble(&pack, &loose, "MyMod", &out);

        assert!(!result.success);
        assert_eq!(names(&result.manifest.archives), vec!["MyMod.bsa"]);
        assert!(result.manifest.loose_bundle.is_none());
        assert!(result.manifest.messages.iter().any(|m| m.contains("disk full")));
    }

    #[test]
    fn test_chunked_archives_get_matching_plugins() {
        let (_temp, root) = temp_root();
        let pack = bucket(&root.join("pack"), &[("meshes/a.nif", 60), ("meshes/b.nif", 60)]);
        let out = root.join("dist");
        let stages = Arc::new(Mutex::new(Vec::new()));
        let sink = stages.clone();

        let result = assembler(false, Arc::new(ZipCompressor))
            .with_max_chunk_size_gb(100.0 / BYTES_PER_GB as f64)
            .with_progress(move |p| sink.lock().unwrap().push(p))
            .assemble(&pack, &FileBucket::default(), "Big", &out);

        assert!(result.success, "{:?}", result.manifest.messages);
        assert_eq!(names(&result.manifest.archives), vec!["Big.bsa", "Big_pack0.bsa"]);
        assert_eq!(names(&result.manifest.plugins), vec!["Big.esp", "Big_0.esp"]);

        let stages = stages.lock().unwrap();
        assert!(stages.contains(&PackageProgress {
            stage: PackageStage::Archiving,
            current: 2,
            total: 2
        }));
        assert_eq!(stages.last().map(|p| p.stage), Some(PackageStage::Complete));
    }

    #[test]
    fn test_rebuild_replaces_previous_package() {
        let (_temp, root) = temp_root();
        let out = root.join("dist");
        std::fs::create_dir_all(out.join("MyMod")).unwrap();
        std::fs::write(out.join("MyMod").join("old.bsa"), b"old").unwrap();

        let pack = bucket(&root.join("pack"), &[("meshes/a.nif", 10)]);
        let result = assembler(false, Arc::new(ZipCompressor)).assemble(
            &pack,
            &FileBucket::default(),
            "MyMod",
            &out,
        );

        assert!(result.success);
        assert!(!out.join("MyMod").join("old.bsa").exists());
    }

    #[test]
    fn test_unsafe_mod_names_leave_output_untouched() {
        let (_temp, root) = temp_root();
        let out = root.join("dist");
        let pack = bucket(&out.join("stage"), &[("meshes/a.nif", 10)]);
        std::fs::write(out.join("keep_me.txt"), b"user data").unwrap();

        for name in ["", ".", "..", ".build", "a/b", "a\\b"] {
            let result = assembler(false, Arc::new(ZipCompressor)).assemble(
                &pack,
                &FileBucket::default(),
                name,
                &out,
            );
            assert!(!result.success, "accepted {:?}", name);
            assert!(result.manifest.messages[0].contains("Invalid mod name"));
        }

        assert!(out.join("keep_me.txt").is_file());
        assert!(out.join("stage/meshes/a.nif").is_file());
        assert!(!out.join(BUILD_DIR).exists());
    }

    #[test]
    fn test_bucket_from_dir() {
        let (_temp, root) = temp_root();
        let pack = bucket(&root, &[("b/2.nif", 2), ("a/1.nif", 1)]);
        assert_eq!(pack.files(), &[root.join("a/1.nif"), root.join("b/2.nif")]);
        assert_eq!(pack.len(), 2);
        assert_eq!(pack.total_size_bytes(), 3);
    }
}
