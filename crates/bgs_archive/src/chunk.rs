//! Greedy size-bounded chunking of files destined for archives.
//!
//! Files are sorted largest first (stable, so ties keep their input order) and
//! poured into the current chunk until the next file would overflow the limit.
//! A file larger than the limit on its own is emitted as a singleton chunk.
//!
//! This is the classical first-fit-decreasing style heuristic without
//! look-ahead. Chunk boundaries decide which archive becomes the primary one,
//! so the heuristic must stay exactly as is for archive names to be stable.

use camino::Utf8PathBuf;

/// An ordered group of files that becomes one archive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chunk {
    pub files: Vec<Utf8PathBuf>,
    /// Sum of the sizes of `files`.
    pub total_size_bytes: u64,
}

impl Chunk {
    fn push(&mut self, path: Utf8PathBuf, size: u64) {
        self.files.push(path);
        self.total_size_bytes += size;
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Partition `(path, size)` pairs into chunks of at most `max_chunk_size_bytes`.
///
/// Every chunk respects the limit except a singleton holding one file that is
/// itself larger than the limit. Empty input yields no chunks.
pub fn pack_chunks(mut files: Vec<(Utf8PathBuf, u64)>, max_chunk_size_bytes: u64) -> Vec<Chunk> {
    files.sort_by(|a, b| b.1.cmp(&a.1));

    let mut chunks = Vec::new();
    let mut current = Chunk::default();

    for (path, size) in files {
        if size > max_chunk_size_bytes {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
            }
            tracing::debug!(
                "Oversized file gets its own chunk: {} ({} > {} bytes)",
                path,
                size,
                max_chunk_size_bytes
            );
            let mut singleton = Chunk::default();
            singleton.push(path, size);
            chunks.push(singleton);
            continue;
        }

        if !current.is_empty() && current.total_size_bytes + size > max_chunk_size_bytes {
            chunks.push(std::mem::take(&mut current));
        }
        current.push(path, size);
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

/// Summary of a chunk assignment, for previews and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChunkPlan {
    pub chunk_count: usize,
    pub file_count: usize,
    /// Chunks whose single file exceeds the limit.
    pub oversized_count: usize,
    pub total_size_bytes: u64,
    pub largest_chunk_bytes: u64,
}

impl ChunkPlan {
    pub fn summarize(chunks: &[Chunk], max_chunk_size_bytes: u64) -> Self {
        Self {
            chunk_count: chunks.len(),
            file_count: chunks.iter().map(|c| c.files.len()).sum(),
            oversized_count: chunks
                .iter()
                .filter(|c| c.total_size_bytes > max_chunk_size_bytes)
                .count(),
            total_size_bytes: chunks.iter().map(|c| c.total_size_bytes).sum(),
            largest_chunk_bytes: chunks
                .iter()
                .map(|c| c.total_size_bytes)
                .max()
                .unwrap_or(0),
        }
    }
}
