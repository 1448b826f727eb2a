//! Classification of generated mod files against a base game installation.
//!
//! Every file produced by a generator is compared with the installation it is
//! meant to extend, and sorted into one of four outcomes:
//!
//! - **Pack**: no counterpart exists in the installation, so the file can go
//!   into a binary archive.
//! - **Loose**: a counterpart exists but the content differs, so the file must
//!   stay loose to override it.
//! - **Skip**: a counterpart exists with identical content; nothing to ship.
//! - **Fail**: an I/O error prevented a decision.
//!
//! Counterparts are found with a case-insensitive path lookup
//! ([`resolve_case_insensitive`]) and compared by streaming SHA-1 digests
//! ([`hash_file`]). Files are classified in parallel on a bounded thread pool.
//!
//! # Example
//!
//! ```no_run
//! use bgs_classify::Classifier;
//! use camino::Utf8PathBuf;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let report = Classifier::new(
//!     Utf8PathBuf::from("/games/Skyrim Special Edition/Data"),
//!     Utf8PathBuf::from("/work/generated"),
//! )
//! .with_threads(8)
//! .with_outputs(Utf8PathBuf::from("/work/pack"), Utf8PathBuf::from("/work/loose"))
//! .with_progress(|p| println!("{}/{} {}", p.current, p.total, p.label))
//! .classify()?;
//!
//! println!(
//!     "pack={} loose={} skip={} fail={}",
//!     report.pack.len(),
//!     report.loose.len(),
//!     report.skip.len(),
//!     report.failed.len()
//! );
//! # Ok(())
//! # }
//! ```

pub mod data_path;
pub mod engine;
pub mod error;
pub mod hash;
pub mod report;
pub mod resolve;

pub use data_path::data_relative_path;
pub use engine::{ClassifyProgress, Classifier, DEFAULT_THREAD_COUNT};
pub use error::{Error, Result};
pub use hash::{hash_file, ContentDigest, HashError, HASH_BLOCK_SIZE};
pub use report::{
    ClassificationReport, ClassificationResult, ClassifiedFile, FailedFile, FailureKind,
    FileRecord, Verdict,
};
pub use resolve::resolve_case_insensitive;
