//! Chunked archive creation and mod package assembly.
//!
//! Files classified as safe to pack are grouped into size-bounded chunks
//! ([`pack_chunks`]), each chunk is staged into a temporary directory that
//! mirrors its relative layout and handed to an external archiving tool
//! ([`ArchiveOrchestrator`]). The [`PackageAssembler`] then combines the
//! archives, their plugin descriptors and a compressed bundle of loose override
//! files into one distributable directory.
//!
//! The external collaborators are traits so that callers decide how archives,
//! bundles and plugins are produced:
//!
//! - [`ArchiveTool`]: implemented by [`BsarchTool`]
//! - [`CompressionTool`]: implemented by [`ZipCompressor`]
//! - [`EspFactory`]: implemented by [`TemplateEspFactory`]
//!
//! # Example
//!
//! ```no_run
//! use bgs_archive::{BsarchTool, FileBucket, PackageAssembler, TemplateEspFactory, ZipCompressor};
//! use bgs_game::GameType;
//! use camino::Utf8PathBuf;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let assembler = PackageAssembler::new(
//!     Arc::new(BsarchTool::new(Utf8PathBuf::from("/tools/bsarch.exe"))),
//!     Arc::new(ZipCompressor::default()),
//!     Arc::new(TemplateEspFactory::new(Utf8PathBuf::from("/tools/templates"))),
//!     GameType::SkyrimSpecialEdition,
//! )
//! .with_max_chunk_size_gb(2.0);
//!
//! let pack = FileBucket::from_dir(Utf8PathBuf::from("/work/pack"))?;
//! let loose = FileBucket::from_dir(Utf8PathBuf::from("/work/loose"))?;
//! let result = assembler.assemble(&pack, &loose, "MyMod", &Utf8PathBuf::from("/work/dist"));
//! println!("success={} package={}", result.success, result.package_path);
//! # Ok(())
//! # }
//! ```

pub mod chunk;
pub mod compress;
pub mod error;
pub mod esp;
pub mod naming;
pub mod orchestrator;
pub mod package;
pub mod tool;

pub use chunk::{pack_chunks, Chunk, ChunkPlan};
pub use compress::{CompressionTool, ZipCompressor};
pub use error::{Error, Result, ToolError};
pub use esp::{EspFactory, TemplateEspFactory};
pub use naming::{archive_file_name, archive_path, descriptor_name, parse_archive_index};
pub use orchestrator::{
    gb_to_bytes, tool_timeout, ArchiveManifest, ArchiveOrchestrator, ArchiveProgress,
};
pub use package::{
    FileBucket, PackageAssembler, PackageComponent, PackageManifest, PackageProgress,
    PackageResult, PackageStage, PackagedFile,
};
pub use tool::{ArchiveRequest, ArchiveTool, BsarchTool};
