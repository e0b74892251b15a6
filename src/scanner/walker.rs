//! Directory walker implementation using walkdir.
//!
//! # Overview
//!
//! This module provides the [`Walker`] struct for enumerating the regular
//! files under one root. Symbolic links, directories and special files are
//! never yielded. Children of each directory are visited in file-name order,
//! so the discovery order of a given tree is stable across runs.
//!
//! # Example
//!
//! ```no_run
//! use crossdupe::scanner::{Origin, Walker};
//! use std::path::Path;
//!
//! // Top-level files only
//! let walker = Walker::new(Path::new("/home/user/Downloads"), false, Origin::First);
//! let files: Vec<_> = walker.walk().collect::<Result<_, _>>().unwrap();
//! println!("Found {} files", files.len());
//! ```

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::{FileEntry, Origin, ScanError};

/// Directory walker for file discovery under a single root.
#[derive(Debug, Clone)]
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
    /// Descend into subdirectories
    recursive: bool,
    /// Tag applied to every yielded entry
    origin: Origin,
}

impl Walker {
    /// Create a new walker for the given path.
    ///
    /// # Arguments
    ///
    /// * `path` - Root directory to scan
    /// * `recursive` - Walk the full subtree instead of direct children only
    /// * `origin` - Which root this walker enumerates
    #[must_use]
    pub fn new(path: &Path, recursive: bool, origin: Origin) -> Self {
        Self {
            root: path.to_path_buf(),
            recursive,
            origin,
        }
    }

    /// Walk the directory tree, yielding regular files.
    ///
    /// The returned iterator is lazy and finite. Failures to open the root,
    /// list a directory or stat an entry are yielded as [`ScanError`] values;
    /// the caller decides whether to abort or skip.
    pub fn walk(&self) -> impl Iterator<Item = Result<FileEntry, ScanError>> + '_ {
        let mut walk_dir = WalkDir::new(&self.root)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name();
        if !self.recursive {
            walk_dir = walk_dir.max_depth(1);
        }

        walk_dir
            .into_iter()
            .filter_map(move |entry_result| match entry_result {
                Ok(entry) => {
                    // file_type() does not follow symlinks here
                    if !entry.file_type().is_file() {
                        if entry.file_type().is_symlink() {
                            log::trace!("Skipping symlink: {}", entry.path().display());
                        }
                        return None;
                    }

                    match entry.metadata() {
                        Ok(metadata) => {
                            let path = entry.into_path();
                            log::trace!("Found {} ({} bytes)", path.display(), metadata.len());
                            Some(Ok(FileEntry::new(path, metadata.len(), self.origin)))
                        }
                        Err(e) => Some(Err(self.convert_error(e))),
                    }
                }
                Err(e) => Some(Err(self.convert_error(e))),
            })
    }

    /// Convert a walkdir error into a [`ScanError`] naming the failing path.
    fn convert_error(&self, error: walkdir::Error) -> ScanError {
        let path = error
            .path()
            .map_or_else(|| self.root.clone(), Path::to_path_buf);
        log::warn!("Walker error for {}: {}", path.display(), error);

        match error.into_io_error() {
            Some(io_error) => ScanError::from_io(path, io_error),
            None => ScanError::Io {
                path,
                source: std::io::Error::other("filesystem loop detected"),
            },
        }
    }
}
