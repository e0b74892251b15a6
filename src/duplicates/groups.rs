//! Size bucketing and duplicate group types.
//!
//! # Overview
//!
//! Size bucketing is the first phase of duplicate detection. Each tree's
//! files are grouped by exact byte size, then only sizes present in *both*
//! trees are kept: a size seen under one root alone cannot produce a
//! cross-tree duplicate. No file content is read in this phase.
//!
//! # Example
//!
//! ```
//! use crossdupe::scanner::{FileEntry, Origin};
//! use crossdupe::duplicates::{group_by_size, merge_size_groups};
//! use std::path::PathBuf;
//!
//! let first = vec![
//!     FileEntry::new(PathBuf::from("/a/1.txt"), 1024, Origin::First),
//!     FileEntry::new(PathBuf::from("/a/2.txt"), 2048, Origin::First),
//! ];
//! let second = vec![FileEntry::new(PathBuf::from("/b/1.txt"), 1024, Origin::Second)];
//!
//! let (buckets, stats) = merge_size_groups(group_by_size(first), group_by_size(second));
//!
//! assert_eq!(buckets.len(), 1);
//! assert_eq!(buckets[0].size, 1024);
//! assert_eq!(stats.eliminated_files, 1);  // The 2048-byte file
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

use crate::scanner::{FileEntry, Origin};

/// A group of candidate files sharing one size.
///
/// Every intermediate generation of the pipeline is a list of buckets: the
/// size buckets themselves, then the sub-groups split off by each hash pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeBucket {
    /// File size in bytes (shared by all files in this bucket)
    pub size: u64,
    /// Files with this exact size, in discovery order
    pub files: Vec<FileEntry>,
}

impl SizeBucket {
    /// Create a bucket with initial files.
    #[must_use]
    pub fn new(size: u64, files: Vec<FileEntry>) -> Self {
        debug_assert!(files.iter().all(|f| f.size == size));
        Self { size, files }
    }

    /// Number of files in this bucket.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if this bucket is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Confirmed group of byte-identical files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateGroup {
    /// File size in bytes, shared by every member
    pub size: u64,
    /// Paths of all members in discovery order (first tree before second)
    pub files: Vec<PathBuf>,
    /// Number of members found under the first root
    pub first_tree: usize,
    /// Number of members found under the second root
    pub second_tree: usize,
}

impl DuplicateGroup {
    /// Build a group from verified entries.
    ///
    /// Entries from the first root are moved ahead of those from the second;
    /// each root keeps its own relative order.
    #[must_use]
    pub fn from_entries(size: u64, mut entries: Vec<FileEntry>) -> Self {
        entries.sort_by_key(|e| e.origin == Origin::Second);
        let first_tree = entries
            .iter()
            .filter(|e| e.origin == Origin::First)
            .count();
        let second_tree = entries.len() - first_tree;
        Self {
            size,
            files: entries.into_iter().map(|e| e.path).collect(),
            first_tree,
            second_tree,
        }
    }

    /// Number of files in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if this group is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Whether members come from both roots.
    #[must_use]
    pub fn spans_both_trees(&self) -> bool {
        self.first_tree > 0 && self.second_tree > 0
    }

    /// Number of duplicate copies (total - 1 original).
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.files.len().saturating_sub(1)
    }

    /// Total wasted space (all copies minus one).
    #[must_use]
    pub fn wasted_space(&self) -> u64 {
        self.size * self.duplicate_count() as u64
    }
}

/// Statistics from the size bucketing phase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupingStats {
    /// Files scanned under the first root
    pub first_tree_files: usize,
    /// Files scanned under the second root
    pub second_tree_files: usize,
    /// Sizes present in both trees
    pub shared_sizes: usize,
    /// Files kept as candidates
    pub candidate_files: usize,
    /// Files dropped because their size occurs under one root only
    pub eliminated_files: usize,
}

impl GroupingStats {
    /// Percentage of files eliminated by size bucketing.
    #[must_use]
    pub fn elimination_rate(&self) -> f64 {
        let total = self.first_tree_files + self.second_tree_files;
        if total == 0 {
            0.0
        } else {
            (self.eliminated_files as f64 / total as f64) * 100.0
        }
    }
}

/// Group one tree's files by exact size.
///
/// Sizes are kept in ascending order; files within a size keep the order
/// they were yielded in.
#[must_use]
pub fn group_by_size(files: impl IntoIterator<Item = FileEntry>) -> BTreeMap<u64, Vec<FileEntry>> {
    let mut groups: BTreeMap<u64, Vec<FileEntry>> = BTreeMap::new();
    for file in files {
        groups.entry(file.size).or_default().push(file);
    }
    groups
}

/// Merge two trees' size groups into candidate buckets (Phase 1).
///
/// For each size present in both maps the first tree's files are followed
/// by the second tree's files in one [`SizeBucket`]. Sizes found under one
/// root only are dropped. Buckets come out in ascending size order.
#[must_use]
pub fn merge_size_groups(
    first: BTreeMap<u64, Vec<FileEntry>>,
    mut second: BTreeMap<u64, Vec<FileEntry>>,
) -> (Vec<SizeBucket>, GroupingStats) {
    let mut stats = GroupingStats {
        first_tree_files: first.values().map(Vec::len).sum(),
        second_tree_files: second.values().map(Vec::len).sum(),
        ..Default::default()
    };

    let mut buckets = Vec::new();
    for (size, mut files) in first {
        let Some(others) = second.remove(&size) else {
            stats.eliminated_files += files.len();
            log::trace!("Eliminated size {} (first tree only, {} files)", size, files.len());
            continue;
        };

        files.extend(others);
        stats.shared_sizes += 1;
        stats.candidate_files += files.len();
        log::debug!("Size bucket {} bytes: {} candidates", size, files.len());
        buckets.push(SizeBucket::new(size, files));
    }

    stats.eliminated_files += second.values().map(Vec::len).sum::<usize>();

    (buckets, stats)
}
