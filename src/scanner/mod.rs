//! Scanner module for directory traversal and content hashing.
//!
//! This module provides functionality for:
//! - Enumerating regular files under a root, top level only or recursively
//! - Prefix and full-content hashing with a 128-bit BLAKE3 digest
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`walker`]: Directory traversal and file discovery
//! - [`hasher`]: Streaming content hashing
//!
//! # Example
//!
//! ```no_run
//! use crossdupe::scanner::{Origin, Walker};
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("."), true, Origin::First);
//! for entry in walker.walk() {
//!     match entry {
//!         Ok(file) => println!("{}: {} bytes", file.path.display(), file.size),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```

pub mod hasher;
pub mod walker;

use std::path::PathBuf;

use serde::Serialize;

// Re-export main types
pub use hasher::{hash_to_hex, ContentHash, Hasher, PREHASH_SIZE};
pub use walker::Walker;

/// Which of the two roots a file was discovered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// The first directory tree (`DIR1`)
    First,
    /// The second directory tree (`DIR2`)
    Second,
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Origin::First => write!(f, "DIR1"),
            Origin::Second => write!(f, "DIR2"),
        }
    }
}

/// A regular file discovered by the scanner.
///
/// Entries are created once per run and moved, never cloned, through each
/// stage of the duplicate detection pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Path to the file, rooted at the directory it was found under
    pub path: PathBuf,
    /// File size in bytes at scan time
    pub size: u64,
    /// Root the file belongs to
    pub origin: Origin,
}

impl FileEntry {
    /// Create a new FileEntry.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the file
    /// * `size` - File size in bytes
    /// * `origin` - Root the file was discovered under
    #[must_use]
    pub fn new(path: PathBuf, size: u64, origin: Origin) -> Self {
        Self { path, size, origin }
    }
}

/// Errors that can occur during directory scanning.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// Permission was denied when accessing a file or directory.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The specified path was not found.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// An I/O error occurred while listing a directory or reading metadata.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    /// Classify an I/O error raised for `path`.
    pub(crate) fn from_io(path: PathBuf, error: std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path),
            std::io::ErrorKind::NotFound => Self::NotFound(path),
            _ => Self::Io {
                path,
                source: error,
            },
        }
    }
}

/// Errors that can occur while reading file content.
#[derive(thiserror::Error, Debug)]
pub enum HashError {
    /// The specified file was not found.
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when reading the file.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The file ended before its scanned size was reached.
    #[error("File shorter than expected: {path} (expected {expected} bytes, read {actual})")]
    Truncated {
        /// Path of the file
        path: PathBuf,
        /// Size recorded by the scanner
        expected: u64,
        /// Bytes actually available
        actual: u64,
    },

    /// An I/O error occurred while reading the file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl HashError {
    /// Classify an I/O error raised while opening or reading `path`.
    pub(crate) fn from_io(path: PathBuf, error: std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path),
            std::io::ErrorKind::NotFound => Self::NotFound(path),
            _ => Self::Io {
                path,
                source: error,
            },
        }
    }
}
