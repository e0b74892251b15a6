//! Byte-for-byte verification of candidate groups.
//!
//! This is the authoritative step of the pipeline. Candidates reach it with
//! equal sizes and, when there were more than two of them, equal digests,
//! but only a direct comparison of their bytes confirms a duplicate. Hash
//! collisions therefore never produce a false positive.

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use super::groups::{DuplicateGroup, SizeBucket};
use super::partition::partition_by;
use crate::scanner::{FileEntry, HashError};

/// Chunk size read from each file per comparison step.
pub const COMPARE_CHUNK_SIZE: usize = 64 * 1024;

/// Statistics from verifying one or more candidate groups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifyStats {
    /// Candidate files that entered verification
    pub input_files: usize,
    /// Pairwise comparisons performed
    pub comparisons: usize,
    /// Bytes read across both sides of every comparison
    pub bytes_compared: u64,
    /// Comparisons that found differing content
    pub mismatches: usize,
}

impl VerifyStats {
    /// Accumulate another set of statistics into this one.
    pub fn merge(&mut self, other: &VerifyStats) {
        self.input_files += other.input_files;
        self.comparisons += other.comparisons;
        self.bytes_compared += other.bytes_compared;
        self.mismatches += other.mismatches;
    }
}

/// Compare the first `size` bytes of two files.
///
/// Zero-length comparisons succeed without opening either file. Reading
/// stops at the first chunk that differs.
///
/// Returns whether the files are identical and how many bytes were read
/// from both files combined.
///
/// # Errors
///
/// Returns [`HashError`] if either file cannot be opened or read, or ends
/// before `size` bytes.
pub fn files_identical(a: &Path, b: &Path, size: u64) -> Result<(bool, u64), HashError> {
    if size == 0 {
        return Ok((true, 0));
    }

    let mut file_a = File::open(a).map_err(|e| HashError::from_io(a.to_path_buf(), e))?;
    let mut file_b = File::open(b).map_err(|e| HashError::from_io(b.to_path_buf(), e))?;
    let mut buf_a = vec![0u8; COMPARE_CHUNK_SIZE];
    let mut buf_b = vec![0u8; COMPARE_CHUNK_SIZE];

    let mut remaining = size;
    let mut bytes_read = 0u64;
    while remaining > 0 {
        let chunk = remaining.min(COMPARE_CHUNK_SIZE as u64) as usize;
        read_chunk(&mut file_a, &mut buf_a[..chunk], a, size, size - remaining)?;
        read_chunk(&mut file_b, &mut buf_b[..chunk], b, size, size - remaining)?;
        bytes_read += 2 * chunk as u64;

        if buf_a[..chunk] != buf_b[..chunk] {
            log::trace!(
                "Content differs within bytes {}..{}: {} vs {}",
                size - remaining,
                size - remaining + chunk as u64,
                a.display(),
                b.display()
            );
            return Ok((false, bytes_read));
        }
        remaining -= chunk as u64;
    }

    Ok((true, bytes_read))
}

/// Fill `buf` completely, reporting a short file as [`HashError::Truncated`].
fn read_chunk(
    file: &mut File,
    buf: &mut [u8],
    path: &Path,
    expected: u64,
    offset: u64,
) -> Result<(), HashError> {
    let mut filled = 0;
    while filled < buf.len() {
        match file.read(&mut buf[filled..]) {
            Ok(0) => {
                return Err(HashError::Truncated {
                    path: path.to_path_buf(),
                    expected,
                    actual: offset + filled as u64,
                });
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(HashError::from_io(path.to_path_buf(), e)),
        }
    }
    Ok(())
}

/// Split one candidate group into confirmed duplicate groups.
///
/// # Errors
///
/// Propagates the first read failure; no partial result is returned.
pub fn verify_bucket(bucket: SizeBucket) -> Result<(Vec<DuplicateGroup>, VerifyStats), HashError> {
    let size = bucket.size;
    let mut stats = VerifyStats {
        input_files: bucket.len(),
        ..Default::default()
    };

    let classes = partition_by(bucket.files, |a: &FileEntry, b: &FileEntry| {
        let (same, bytes) = files_identical(&a.path, &b.path, size)?;
        stats.comparisons += 1;
        stats.bytes_compared += bytes;
        if !same {
            stats.mismatches += 1;
        }
        Ok(same)
    })?;

    let groups = classes
        .into_iter()
        .map(|entries| DuplicateGroup::from_entries(size, entries))
        .collect();

    Ok((groups, stats))
}
