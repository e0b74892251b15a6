//! Duplicate finder implementation with multi-phase detection.
//!
//! # Overview
//!
//! This module orchestrates the duplicate detection pipeline:
//! 1. **Validate** - Check the two roots (see [`crate::options`])
//! 2. **Scan** - Enumerate regular files under each root
//! 3. **Phase 1 - Size grouping**: Keep sizes present in both trees (see [`crate::duplicates::groups`])
//! 4. **Phase 2 - Prehash**: Split groups of 3+ files by a digest of their first 4KB
//! 5. **Phase 3 - Full hash**: Split remaining groups of 3+ larger files by a digest of their content
//! 6. **Phase 4 - Verify**: Confirm every group with a byte-for-byte comparison
//!
//! Each phase takes ownership of the previous generation of groups and
//! returns a new one. Groups of exactly two files skip both hash phases.
//!
//! # Example
//!
//! ```no_run
//! use crossdupe::duplicates::{
//!     group_by_size, merge_size_groups, split_by_full_hash, split_by_prehash, verify_groups,
//!     FinderConfig,
//! };
//! use crossdupe::scanner::{FileEntry, Hasher, Origin, Walker};
//! use std::path::Path;
//!
//! let first: Vec<FileEntry> = Walker::new(Path::new("a"), true, Origin::First)
//!     .walk()
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! let second: Vec<FileEntry> = Walker::new(Path::new("b"), true, Origin::Second)
//!     .walk()
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//!
//! let config = FinderConfig::default();
//! let hasher = Hasher::new();
//! let (buckets, _) = merge_size_groups(group_by_size(first), group_by_size(second));
//! let (buckets, _) = split_by_prehash(buckets, &hasher, &config).unwrap();
//! let (buckets, _) = split_by_full_hash(buckets, &hasher, &config).unwrap();
//! let (groups, _) = verify_groups(buckets, &config).unwrap();
//!
//! println!("{} duplicate groups", groups.len());
//! ```

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use bytesize::ByteSize;
use rayon::prelude::*;

use super::groups::{group_by_size, merge_size_groups, DuplicateGroup, SizeBucket};
use super::partition::partition_by;
use super::verify::{verify_bucket, VerifyStats};
use crate::options::{ConfigError, ScanOptions};
use crate::progress::ProgressCallback;
use crate::scanner::{
    hash_to_hex, ContentHash, FileEntry, HashError, Hasher, Origin, ScanError, Walker,
    PREHASH_SIZE,
};

/// Configuration for the duplicate finder.
#[derive(Clone)]
pub struct FinderConfig {
    /// Number of I/O threads for parallel hashing and verification.
    /// Default is 4 to prevent disk thrashing.
    pub io_threads: usize,
    /// Drop groups whose members all come from one root.
    pub cross_tree_only: bool,
    /// Optional progress callback for reporting.
    pub progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for FinderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinderConfig")
            .field("io_threads", &self.io_threads)
            .field("cross_tree_only", &self.cross_tree_only)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            io_threads: 4,
            cross_tree_only: false,
            progress_callback: None,
        }
    }
}

impl FinderConfig {
    /// Create a new configuration with custom I/O thread count.
    #[must_use]
    pub fn with_io_threads(mut self, threads: usize) -> Self {
        self.io_threads = threads.max(1);
        self
    }

    /// Only report groups spanning both roots.
    #[must_use]
    pub fn with_cross_tree_only(mut self, enabled: bool) -> Self {
        self.cross_tree_only = enabled;
        self
    }

    /// Set the progress callback.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress_callback = Some(callback);
        self
    }
}

/// Statistics from one hashing phase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HashStats {
    /// Files that entered the phase
    pub input_files: usize,
    /// Files whose digest was computed
    pub hashed_files: usize,
    /// Bytes read while hashing
    pub bytes_hashed: u64,
    /// Groups passed through without hashing
    pub skipped_groups: usize,
    /// Files dropped because no other file shared their digest
    pub eliminated_files: usize,
    /// Files that left the phase as candidates
    pub output_files: usize,
    /// Candidate groups that left the phase
    pub output_groups: usize,
}

impl HashStats {
    /// Percentage of input files eliminated by this phase.
    #[must_use]
    pub fn elimination_rate(&self) -> f64 {
        if self.input_files == 0 {
            0.0
        } else {
            (self.eliminated_files as f64 / self.input_files as f64) * 100.0
        }
    }
}

/// Run `op` on a bounded pool of `threads` workers.
///
/// Falls back to the global rayon pool if a dedicated one cannot be built.
fn with_io_pool<R, OP>(threads: usize, op: OP) -> R
where
    OP: FnOnce() -> R + Send,
    R: Send,
{
    match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
        Ok(pool) => pool.install(op),
        Err(e) => {
            log::warn!(
                "Failed to create I/O thread pool ({}), using global pool with {} threads",
                e,
                rayon::current_num_threads()
            );
            op()
        }
    }
}

/// Split every eligible bucket by a per-file digest.
///
/// Buckets for which `needs_hash` is false pass through untouched. Output
/// keeps the input bucket order, and sub-groups of one bucket follow the
/// order of their first member.
fn split_by_digest<F>(
    buckets: Vec<SizeBucket>,
    phase: &str,
    config: &FinderConfig,
    needs_hash: fn(&SizeBucket) -> bool,
    bytes_per_file: fn(u64) -> u64,
    digest: F,
) -> Result<(Vec<SizeBucket>, HashStats), HashError>
where
    F: Fn(&FileEntry) -> Result<ContentHash, HashError> + Sync,
{
    let mut stats = HashStats {
        input_files: buckets.iter().map(SizeBucket::len).sum(),
        ..Default::default()
    };

    let digests: Vec<ContentHash> = {
        let to_hash: Vec<&FileEntry> = buckets
            .iter()
            .filter(|b| needs_hash(b))
            .flat_map(|b| b.files.iter())
            .collect();

        if let Some(ref callback) = config.progress_callback {
            callback.on_phase_start(phase, to_hash.len());
        }
        log::info!("{}: hashing {} files", phase, to_hash.len());

        with_io_pool(config.io_threads, || {
            to_hash
                .par_iter()
                .enumerate()
                .map(|(idx, file)| {
                    if let Some(ref callback) = config.progress_callback {
                        callback.on_progress(idx + 1, file.path.to_string_lossy().as_ref());
                    }
                    let hash = digest(*file)?;
                    log::trace!("{} {}: {}", phase, hash_to_hex(&hash), file.path.display());
                    if let Some(ref callback) = config.progress_callback {
                        callback.on_item_completed(bytes_per_file(file.size));
                    }
                    Ok(hash)
                })
                .collect::<Result<Vec<_>, HashError>>()
        })?
    };

    let mut digests = digests.into_iter();
    let mut output = Vec::new();

    for bucket in buckets {
        if !needs_hash(&bucket) {
            stats.skipped_groups += 1;
            output.push(bucket);
            continue;
        }

        let size = bucket.size;
        let input_len = bucket.len();
        // Files are zipped first so no digest is pulled past the bucket's end
        let hashed: Vec<(FileEntry, ContentHash)> =
            bucket.files.into_iter().zip(digests.by_ref()).collect();
        stats.hashed_files += hashed.len();
        stats.bytes_hashed += bytes_per_file(size) * hashed.len() as u64;

        let classes = partition_by(hashed, |a, b| Ok::<_, HashError>(a.1 == b.1))?;

        let mut kept = 0;
        for class in classes {
            log::debug!(
                "{} group {} ({} bytes): {} candidates",
                phase,
                hash_to_hex(&class[0].1),
                size,
                class.len()
            );
            kept += class.len();
            output.push(SizeBucket::new(
                size,
                class.into_iter().map(|(file, _)| file).collect(),
            ));
        }
        stats.eliminated_files += input_len - kept;
    }

    stats.output_files = output.iter().map(SizeBucket::len).sum();
    stats.output_groups = output.len();

    if let Some(ref callback) = config.progress_callback {
        callback.on_phase_end(phase);
    }

    log::info!(
        "{} complete: {} files → {} candidates in {} groups ({:.1}% eliminated)",
        phase,
        stats.input_files,
        stats.output_files,
        stats.output_groups,
        stats.elimination_rate()
    );

    Ok((output, stats))
}

fn needs_prehash(bucket: &SizeBucket) -> bool {
    bucket.len() > 2 && bucket.size > 0
}

fn needs_full_hash(bucket: &SizeBucket) -> bool {
    bucket.len() > 2 && bucket.size > PREHASH_SIZE
}

/// Split candidate buckets by prefix hash (Phase 2).
///
/// Only buckets with three or more files are hashed. Pairs and zero-byte
/// buckets pass through to verification unchanged. Sub-groups of one file
/// are discarded.
///
/// # Errors
///
/// Returns the first [`HashError`] hit while reading any file; no partial
/// result is produced.
pub fn split_by_prehash(
    buckets: Vec<SizeBucket>,
    hasher: &Hasher,
    config: &FinderConfig,
) -> Result<(Vec<SizeBucket>, HashStats), HashError> {
    split_by_digest(
        buckets,
        "prehash",
        config,
        needs_prehash,
        |size| size.min(PREHASH_SIZE),
        |file| hasher.prehash(&file.path, file.size),
    )
}

/// Split candidate buckets by full-content hash (Phase 3).
///
/// Buckets with three or more files larger than [`PREHASH_SIZE`] are
/// hashed. For smaller files the prefix already covered every byte, so
/// those buckets pass through along with pairs.
///
/// # Errors
///
/// Returns the first [`HashError`] hit while reading any file.
pub fn split_by_full_hash(
    buckets: Vec<SizeBucket>,
    hasher: &Hasher,
    config: &FinderConfig,
) -> Result<(Vec<SizeBucket>, HashStats), HashError> {
    split_by_digest(
        buckets,
        "fullhash",
        config,
        needs_full_hash,
        |size| size,
        |file| hasher.full_hash(&file.path, file.size),
    )
}

/// Confirm candidate buckets byte-for-byte (Phase 4).
///
/// Independent buckets are verified in parallel; groups come back in
/// bucket order.
///
/// # Errors
///
/// Returns the first [`HashError`] hit while reading any file.
pub fn verify_groups(
    buckets: Vec<SizeBucket>,
    config: &FinderConfig,
) -> Result<(Vec<DuplicateGroup>, VerifyStats), HashError> {
    if let Some(ref callback) = config.progress_callback {
        callback.on_phase_start("verify", buckets.len());
    }
    log::info!("verify: comparing {} candidate groups", buckets.len());

    let results = with_io_pool(config.io_threads, || {
        buckets
            .into_par_iter()
            .enumerate()
            .map(|(idx, bucket)| {
                if let Some(ref callback) = config.progress_callback {
                    let path = bucket
                        .files
                        .first()
                        .map(|f| f.path.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    callback.on_progress(idx + 1, &path);
                }
                verify_bucket(bucket)
            })
            .collect::<Result<Vec<_>, HashError>>()
    })?;

    let mut stats = VerifyStats::default();
    let mut groups = Vec::new();
    for (bucket_groups, bucket_stats) in results {
        stats.merge(&bucket_stats);
        groups.extend(bucket_groups);
    }

    if let Some(ref callback) = config.progress_callback {
        callback.on_phase_end("verify");
    }

    log::info!(
        "verify complete: {} duplicate groups, {} hash collisions rejected",
        groups.len(),
        stats.mismatches
    );

    Ok((groups, stats))
}

/// Summary statistics from a duplicate scan.
#[derive(Debug, Clone, Default)]
pub struct ScanSummary {
    /// Files found under the first root
    pub first_tree_files: usize,
    /// Files found under the second root
    pub second_tree_files: usize,
    /// Total size of all scanned files in bytes
    pub total_size: u64,
    /// Files eliminated because their size occurs under one root only
    pub eliminated_by_size: usize,
    /// Candidates left after size grouping
    pub candidates_after_size: usize,
    /// Candidates left after the prefix hash
    pub candidates_after_prehash: usize,
    /// Candidates left after the full hash
    pub candidates_after_fullhash: usize,
    /// Groups that reached verification without being hashed
    pub unhashed_groups: usize,
    /// Bytes read by both hash phases
    pub bytes_hashed: u64,
    /// Bytes read by byte-for-byte verification
    pub bytes_compared: u64,
    /// Comparisons where equal digests hid differing content
    pub collisions_rejected: usize,
    /// Number of confirmed duplicate groups
    pub duplicate_groups: usize,
    /// Total number of duplicate files (excluding one original per group)
    pub duplicate_files: usize,
    /// Total space that can be reclaimed by removing duplicates
    pub reclaimable_space: u64,
    /// Duration of the entire scan
    pub scan_duration: Duration,
}

impl ScanSummary {
    /// Total files scanned across both roots.
    #[must_use]
    pub fn total_files(&self) -> usize {
        self.first_tree_files + self.second_tree_files
    }

    /// Calculate the percentage of space that is wasted by duplicates.
    #[must_use]
    pub fn wasted_percentage(&self) -> f64 {
        if self.total_size == 0 {
            0.0
        } else {
            (self.reclaimable_space as f64 / self.total_size as f64) * 100.0
        }
    }

    /// Format reclaimable space as human-readable string.
    #[must_use]
    pub fn reclaimable_display(&self) -> String {
        ByteSize::b(self.reclaimable_space).to_string()
    }

    /// Format total size as human-readable string.
    #[must_use]
    pub fn total_size_display(&self) -> String {
        ByteSize::b(self.total_size).to_string()
    }
}

/// Errors that can occur during duplicate finding.
///
/// Every variant aborts the run; no partial result is returned.
#[derive(thiserror::Error, Debug)]
pub enum FinderError {
    /// The two roots cannot be compared.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A directory could not be listed or a file could not be stat'ed.
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// A candidate file could not be read.
    #[error(transparent)]
    Hash(#[from] HashError),
}

/// Duplicate finder that orchestrates the multi-phase detection pipeline.
///
/// # Example
///
/// ```no_run
/// use crossdupe::duplicates::{DuplicateFinder, FinderConfig};
/// use crossdupe::options::ScanOptions;
///
/// let finder = DuplicateFinder::new(FinderConfig::default().with_io_threads(2));
/// let options = ScanOptions::new("/mnt/a", "/mnt/b", true);
///
/// let (groups, summary) = finder.find_duplicates(&options).unwrap();
///
/// println!("Found {} duplicate groups", groups.len());
/// println!("Reclaimable space: {}", summary.reclaimable_display());
/// ```
#[derive(Debug)]
pub struct DuplicateFinder {
    config: FinderConfig,
    hasher: Hasher,
}

impl DuplicateFinder {
    /// Create a new duplicate finder with the given configuration.
    #[must_use]
    pub fn new(config: FinderConfig) -> Self {
        Self {
            config,
            hasher: Hasher::new(),
        }
    }

    /// Create a new duplicate finder with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(FinderConfig::default())
    }

    /// The configuration this finder runs with.
    #[must_use]
    pub fn config(&self) -> &FinderConfig {
        &self.config
    }

    /// Find files with identical content across the two roots.
    ///
    /// Groups are ordered by ascending size, then by the discovery order of
    /// their first member. Within a group, files from the first root come
    /// before files from the second.
    ///
    /// Only sizes present under both roots become candidates. A group whose
    /// members all lie under one root is therefore reported only when the
    /// other root holds some file of the same size; enable
    /// [`FinderConfig::cross_tree_only`] to drop such groups altogether.
    ///
    /// # Errors
    ///
    /// - [`FinderError::Config`] if the roots fail validation; nothing is
    ///   scanned in that case
    /// - [`FinderError::Scan`] if either tree cannot be fully listed
    /// - [`FinderError::Hash`] if any candidate file cannot be read
    pub fn find_duplicates(
        &self,
        options: &ScanOptions,
    ) -> Result<(Vec<DuplicateGroup>, ScanSummary), FinderError> {
        let start_time = Instant::now();
        let mut summary = ScanSummary::default();

        let validated = options.validate()?;
        log::info!(
            "Starting duplicate scan of {} and {}",
            validated.canonical_first().display(),
            validated.canonical_second().display()
        );

        let first = self.scan_tree(&options.dir1, options.recursive, Origin::First)?;
        let second = self.scan_tree(&options.dir2, options.recursive, Origin::Second)?;

        summary.total_size = first.iter().chain(&second).map(|f| f.size).sum();

        // Phase 1: Group by size
        let (buckets, size_stats) = merge_size_groups(group_by_size(first), group_by_size(second));
        summary.first_tree_files = size_stats.first_tree_files;
        summary.second_tree_files = size_stats.second_tree_files;
        summary.eliminated_by_size = size_stats.eliminated_files;
        summary.candidates_after_size = size_stats.candidate_files;

        log::info!(
            "Phase 1 complete: {} → {} files in {} sizes ({:.1}% eliminated)",
            summary.total_files(),
            size_stats.candidate_files,
            size_stats.shared_sizes,
            size_stats.elimination_rate()
        );

        if buckets.is_empty() {
            log::info!("No sizes shared between the trees, scan complete");
            summary.scan_duration = start_time.elapsed();
            return Ok((Vec::new(), summary));
        }

        // Phase 2: Prehash
        let (buckets, prehash_stats) = split_by_prehash(buckets, &self.hasher, &self.config)?;
        summary.candidates_after_prehash = prehash_stats.output_files;
        summary.unhashed_groups = prehash_stats.skipped_groups;
        summary.bytes_hashed = prehash_stats.bytes_hashed;

        // Phase 3: Full hash
        let (buckets, fullhash_stats) = split_by_full_hash(buckets, &self.hasher, &self.config)?;
        summary.candidates_after_fullhash = fullhash_stats.output_files;
        summary.bytes_hashed += fullhash_stats.bytes_hashed;

        // Phase 4: Verify
        let (mut groups, verify_stats) = verify_groups(buckets, &self.config)?;
        summary.bytes_compared = verify_stats.bytes_compared;
        summary.collisions_rejected = verify_stats.mismatches;

        if self.config.cross_tree_only {
            let before = groups.len();
            groups.retain(DuplicateGroup::spans_both_trees);
            log::debug!(
                "Dropped {} groups found under a single root",
                before - groups.len()
            );
        }

        summary.duplicate_groups = groups.len();
        summary.duplicate_files = groups.iter().map(DuplicateGroup::duplicate_count).sum();
        summary.reclaimable_space = groups.iter().map(DuplicateGroup::wasted_space).sum();
        summary.scan_duration = start_time.elapsed();

        log::info!(
            "Scan complete: {} duplicate groups, {} duplicate files, {} reclaimable",
            summary.duplicate_groups,
            summary.duplicate_files,
            summary.reclaimable_display()
        );

        Ok((groups, summary))
    }

    /// Drain one root into a list of files, stopping at the first error.
    fn scan_tree(
        &self,
        root: &Path,
        recursive: bool,
        origin: Origin,
    ) -> Result<Vec<FileEntry>, ScanError> {
        if let Some(ref callback) = self.config.progress_callback {
            callback.on_phase_start("scanning", 0);
            callback.on_message(&format!("Scanning {}", root.display()));
        }

        let walker = Walker::new(root, recursive, origin);
        let mut files = Vec::new();
        for result in walker.walk() {
            let file = result?;
            if let Some(ref callback) = self.config.progress_callback {
                callback.on_progress(files.len() + 1, file.path.to_string_lossy().as_ref());
            }
            files.push(file);
        }

        if let Some(ref callback) = self.config.progress_callback {
            callback.on_phase_end("scanning");
        }

        log::info!(
            "Found {} files under {} ({})",
            files.len(),
            root.display(),
            origin
        );
        Ok(files)
    }
}
