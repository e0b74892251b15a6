//! BLAKE3 content hasher with streaming support.
//!
//! # Overview
//!
//! This module provides the [`Hasher`] struct for computing 128-bit digests
//! of file contents. Two read modes are supported:
//!
//! - **Prefix hash**: the first [`PREHASH_SIZE`] bytes (or the whole file if
//!   shorter), used as a cheap pre-filter
//! - **Full hash**: every byte up to the size recorded by the scanner
//!
//! Digests are only ever used to narrow candidate groups. Files are never
//! reported as duplicates on the strength of a digest alone.
//!
//! # Example
//!
//! ```no_run
//! use crossdupe::scanner::{hash_to_hex, Hasher};
//! use std::path::Path;
//!
//! let hasher = Hasher::new();
//! let digest = hasher.full_hash(Path::new("file.bin"), 1024).unwrap();
//! println!("{}", hash_to_hex(&digest));
//! ```

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use super::HashError;

/// Number of leading bytes covered by the prefix hash.
pub const PREHASH_SIZE: u64 = 4096;

/// Read buffer size used while hashing.
const HASH_CHUNK_SIZE: usize = 4096;

/// 128-bit content digest.
pub type ContentHash = [u8; 16];

/// Streaming file hasher.
#[derive(Debug, Clone, Default)]
pub struct Hasher;

impl Hasher {
    /// Create a new hasher.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Hash the first [`PREHASH_SIZE`] bytes of a file.
    ///
    /// Files shorter than the prefix are hashed in full.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] if the file cannot be opened or read, or holds
    /// fewer bytes than `size`.
    pub fn prehash(&self, path: &Path, size: u64) -> Result<ContentHash, HashError> {
        self.hash_bytes(path, size.min(PREHASH_SIZE))
    }

    /// Hash the entire declared length of a file.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] if the file cannot be opened or read, or holds
    /// fewer bytes than `size`.
    pub fn full_hash(&self, path: &Path, size: u64) -> Result<ContentHash, HashError> {
        self.hash_bytes(path, size)
    }

    /// Hash exactly `bytes_to_read` bytes from the start of `path`.
    fn hash_bytes(&self, path: &Path, bytes_to_read: u64) -> Result<ContentHash, HashError> {
        let mut file = File::open(path).map_err(|e| HashError::from_io(path.to_path_buf(), e))?;
        let mut hasher = blake3::Hasher::new();
        let mut buffer = [0u8; HASH_CHUNK_SIZE];
        let mut bytes_left = bytes_to_read;

        while bytes_left > 0 {
            let next_read = bytes_left.min(HASH_CHUNK_SIZE as u64) as usize;
            let n = match file.read(&mut buffer[..next_read]) {
                Ok(0) => {
                    return Err(HashError::Truncated {
                        path: path.to_path_buf(),
                        expected: bytes_to_read,
                        actual: bytes_to_read - bytes_left,
                    });
                }
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(HashError::from_io(path.to_path_buf(), e)),
            };
            hasher.update(&buffer[..n]);
            bytes_left -= n as u64;
        }

        let mut digest = [0u8; 16];
        hasher.finalize_xof().fill(&mut digest);
        Ok(digest)
    }
}

/// Render a digest as lowercase hexadecimal.
#[must_use]
pub fn hash_to_hex(hash: &ContentHash) -> String {
    hash.iter().map(|b| format!("{b:02x}")).collect()
}
