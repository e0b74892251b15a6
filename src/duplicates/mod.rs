//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - Size-based candidate bucketing across two trees (Phase 1)
//! - Prehash comparison (Phase 2)
//! - Full hash comparison (Phase 3)
//! - Byte-for-byte verification (Phase 4)
//! - The equivalence-class partition shared by every phase

pub mod finder;
pub mod groups;
pub mod partition;
pub mod verify;

pub use finder::{
    split_by_full_hash, split_by_prehash, verify_groups, DuplicateFinder, FinderConfig,
    FinderError, HashStats, ScanSummary,
};
pub use groups::{group_by_size, merge_size_groups, DuplicateGroup, GroupingStats, SizeBucket};
pub use partition::partition_by;
pub use verify::{files_identical, VerifyStats, COMPARE_CHUNK_SIZE};
