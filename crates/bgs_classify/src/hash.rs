//! Streaming content digests used for file identity comparison.
//!
//! SHA-1 is used purely to tell whether two files hold the same bytes; it is not
//! relied upon for any security property.

use camino::{Utf8Path, Utf8PathBuf};
use sha1::{Digest, Sha1};
use std::fmt;
use std::fs::File;
use std::io::Read;
use thiserror::Error;

/// Size of each block read from disk while hashing.
pub const HASH_BLOCK_SIZE: usize = 8 * 1024;

/// SHA-1 digest of a file's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentDigest([u8; 20]);

impl ContentDigest {
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// Hashing a file failed. Carries the path so the failure can be reported per file.
#[derive(Error, Debug)]
#[error("Failed to hash '{path}': {source}")]
pub struct HashError {
    pub path: Utf8PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Compute the content digest of the file at `path`.
///
/// The file is read in [`HASH_BLOCK_SIZE`] blocks, so memory use is constant
/// regardless of file size.
pub fn hash_file(path: &Utf8Path) -> Result<ContentDigest, HashError> {
    let wrap = |source| HashError {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::open(path.as_std_path()).map_err(wrap)?;
    let mut hasher = Sha1::new();
    let mut buffer = [0u8; HASH_BLOCK_SIZE];

    loop {
        let read = match file.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(wrap(e)),
        };
        hasher.update(&buffer[..read]);
    }

    let mut digest = [0u8; 20];
    digest.copy_from_slice(&hasher.finalize());
    Ok(ContentDigest(digest))
}
