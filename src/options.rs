//! Root directory validation.
//!
//! [`ScanOptions::validate`] must succeed before any scanning starts. It
//! checks that:
//!
//! 1. both roots are existing directories,
//! 2. their canonical forms differ,
//! 3. with recursion enabled, neither canonical root contains the other.
//!
//! Containment is decided on whole path components, so `/data/foo` and
//! `/data/foobar` are siblings, not parent and child.
//!
//! # Example
//!
//! ```no_run
//! use crossdupe::options::ScanOptions;
//!
//! let options = ScanOptions::new("/mnt/a", "/mnt/b", true);
//! let validated = options.validate().unwrap();
//! println!("{}", validated.canonical_first().display());
//! ```

use std::path::{Path, PathBuf};

use crate::scanner::Origin;

/// The two roots to compare and how to walk them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// First directory tree
    pub dir1: PathBuf,
    /// Second directory tree
    pub dir2: PathBuf,
    /// Walk full subtrees instead of direct children only
    pub recursive: bool,
}

/// Errors raised when the roots cannot be compared.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// A root does not exist or is not a directory.
    #[error("{which} is not a directory: {path}")]
    NotADirectory {
        /// Which root failed
        which: Origin,
        /// Path as given by the caller
        path: PathBuf,
    },

    /// A root could not be canonicalized.
    #[error("Failed to resolve {which} ({path}): {source}")]
    Canonicalize {
        /// Which root failed
        which: Origin,
        /// Path as given by the caller
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Both roots resolve to the same directory.
    #[error("DIR1 and DIR2 must not point to the same directory: {0}")]
    SameDirectory(PathBuf),

    /// One root lies inside the other while recursion is enabled.
    #[error("{inner} is inside {outer}; one DIR cannot be a subfolder of the other when recursing")]
    NestedDirectories {
        /// Canonical path of the containing root
        outer: PathBuf,
        /// Canonical path of the contained root
        inner: PathBuf,
    },
}

/// Options that passed validation, with both roots canonicalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedOptions {
    canonical_first: PathBuf,
    canonical_second: PathBuf,
}

impl ValidatedOptions {
    /// Canonical form of `dir1`.
    #[must_use]
    pub fn canonical_first(&self) -> &Path {
        &self.canonical_first
    }

    /// Canonical form of `dir2`.
    #[must_use]
    pub fn canonical_second(&self) -> &Path {
        &self.canonical_second
    }
}

impl ScanOptions {
    /// Create new scan options.
    #[must_use]
    pub fn new(dir1: impl Into<PathBuf>, dir2: impl Into<PathBuf>, recursive: bool) -> Self {
        Self {
            dir1: dir1.into(),
            dir2: dir2.into(),
            recursive,
        }
    }

    /// Check the roots can be compared.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] whose rule is violated, checked in
    /// the order: directory existence, distinctness, nesting.
    pub fn validate(&self) -> Result<ValidatedOptions, ConfigError> {
        ensure_directory(&self.dir1, Origin::First)?;
        ensure_directory(&self.dir2, Origin::Second)?;

        let canonical_first = canonicalize(&self.dir1, Origin::First)?;
        let canonical_second = canonicalize(&self.dir2, Origin::Second)?;

        if canonical_first == canonical_second {
            return Err(ConfigError::SameDirectory(canonical_first));
        }

        if self.recursive {
            if canonical_second.starts_with(&canonical_first) {
                return Err(ConfigError::NestedDirectories {
                    outer: canonical_first,
                    inner: canonical_second,
                });
            }
            if canonical_first.starts_with(&canonical_second) {
                return Err(ConfigError::NestedDirectories {
                    outer: canonical_second,
                    inner: canonical_first,
                });
            }
        }

        log::debug!(
            "Validated roots: {} and {} (recursive: {})",
            canonical_first.display(),
            canonical_second.display(),
            self.recursive
        );

        Ok(ValidatedOptions {
            canonical_first,
            canonical_second,
        })
    }
}

fn ensure_directory(path: &Path, which: Origin) -> Result<(), ConfigError> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(ConfigError::NotADirectory {
            which,
            path: path.to_path_buf(),
        })
    }
}

fn canonicalize(path: &Path, which: Origin) -> Result<PathBuf, ConfigError> {
    path.canonicalize()
        .map_err(|source| ConfigError::Canonicalize {
            which,
            path: path.to_path_buf(),
            source,
        })
}
