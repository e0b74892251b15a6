//! JSON output formatter for duplicate scan results.
//!
//! Provides machine-readable JSON output for scripting and automation.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "duplicates": [
//!     {
//!       "size": 1024,
//!       "files": ["/a/file1.txt", "/b/copy.txt"],
//!       "first_tree": 1,
//!       "second_tree": 1
//!     }
//!   ],
//!   "summary": {
//!     "first_tree_files": 100,
//!     "second_tree_files": 80,
//!     "total_size": 1048576,
//!     "duplicate_groups": 5,
//!     "duplicate_files": 10,
//!     "reclaimable_space": 51200,
//!     "scan_duration_ms": 1234,
//!     "exit_code": 0,
//!     "exit_code_name": "CD000"
//!   }
//! }
//! ```

use std::io::Write;

use serde::Serialize;

use crate::duplicates::{DuplicateGroup, ScanSummary};
use crate::error::ExitCode;

/// A single duplicate group in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonDuplicateGroup {
    /// File size in bytes
    pub size: u64,
    /// Paths of all members, first root's files first
    pub files: Vec<String>,
    /// Members found under the first root
    pub first_tree: usize,
    /// Members found under the second root
    pub second_tree: usize,
}

impl From<&DuplicateGroup> for JsonDuplicateGroup {
    fn from(group: &DuplicateGroup) -> Self {
        Self {
            size: group.size,
            files: group
                .files
                .iter()
                .map(|p| p.to_string_lossy().into_owned())
                .collect(),
            first_tree: group.first_tree,
            second_tree: group.second_tree,
        }
    }
}

/// Summary statistics in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSummary {
    /// Files scanned under the first root
    pub first_tree_files: usize,
    /// Files scanned under the second root
    pub second_tree_files: usize,
    /// Total size of all scanned files in bytes
    pub total_size: u64,
    /// Files dropped because their size occurs under one root only
    pub eliminated_by_size: usize,
    /// Candidates after size grouping
    pub candidates_after_size: usize,
    /// Candidates after the prefix hash
    pub candidates_after_prehash: usize,
    /// Candidates after the full hash
    pub candidates_after_fullhash: usize,
    /// Bytes read by hashing
    pub bytes_hashed: u64,
    /// Bytes read by byte-for-byte verification
    pub bytes_compared: u64,
    /// Number of confirmed duplicate groups
    pub duplicate_groups: usize,
    /// Total number of duplicate files (excluding originals)
    pub duplicate_files: usize,
    /// Total space that can be reclaimed by removing duplicates (bytes)
    pub reclaimable_space: u64,
    /// Duration of the scan in milliseconds
    pub scan_duration_ms: u64,
    /// The exit code number
    pub exit_code: i32,
    /// The machine-readable exit code name (e.g., "CD000")
    pub exit_code_name: String,
}

impl JsonSummary {
    /// Create a JSON summary from a ScanSummary and an exit code.
    #[must_use]
    pub fn from_scan_summary(summary: &ScanSummary, exit_code: ExitCode) -> Self {
        Self {
            first_tree_files: summary.first_tree_files,
            second_tree_files: summary.second_tree_files,
            total_size: summary.total_size,
            eliminated_by_size: summary.eliminated_by_size,
            candidates_after_size: summary.candidates_after_size,
            candidates_after_prehash: summary.candidates_after_prehash,
            candidates_after_fullhash: summary.candidates_after_fullhash,
            bytes_hashed: summary.bytes_hashed,
            bytes_compared: summary.bytes_compared,
            duplicate_groups: summary.duplicate_groups,
            duplicate_files: summary.duplicate_files,
            reclaimable_space: summary.reclaimable_space,
            scan_duration_ms: summary.scan_duration.as_millis() as u64,
            exit_code: exit_code.as_i32(),
            exit_code_name: exit_code.code_prefix().to_string(),
        }
    }
}

/// Complete JSON output structure.
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput {
    /// List of duplicate groups
    pub duplicates: Vec<JsonDuplicateGroup>,
    /// Scan summary statistics
    pub summary: JsonSummary,
}

impl JsonOutput {
    /// Create a new JSON output from duplicate groups, summary and exit code.
    ///
    /// # Example
    ///
    /// ```
    /// use crossdupe::duplicates::{DuplicateGroup, ScanSummary};
    /// use crossdupe::error::ExitCode;
    /// use crossdupe::output::json::JsonOutput;
    /// use crossdupe::scanner::{FileEntry, Origin};
    /// use std::path::PathBuf;
    ///
    /// let groups = vec![DuplicateGroup::from_entries(
    ///     4,
    ///     vec![
    ///         FileEntry::new(PathBuf::from("/a/x"), 4, Origin::First),
    ///         FileEntry::new(PathBuf::from("/b/x"), 4, Origin::Second),
    ///     ],
    /// )];
    ///
    /// let output = JsonOutput::new(&groups, &ScanSummary::default(), ExitCode::Success);
    /// assert_eq!(output.duplicates.len(), 1);
    /// assert_eq!(output.duplicates[0].second_tree, 1);
    /// ```
    #[must_use]
    pub fn new(groups: &[DuplicateGroup], summary: &ScanSummary, exit_code: ExitCode) -> Self {
        Self {
            duplicates: groups.iter().map(JsonDuplicateGroup::from).collect(),
            summary: JsonSummary::from_scan_summary(summary, exit_code),
        }
    }

    /// Serialize to compact JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (unlikely for valid data).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to pretty-printed JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (unlikely for valid data).
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write JSON to a writer, followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W, pretty: bool) -> Result<(), JsonOutputError> {
        let json = if pretty {
            self.to_json_pretty()?
        } else {
            self.to_json()?
        };
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

/// Errors that can occur during JSON output.
#[derive(thiserror::Error, Debug)]
pub enum JsonOutputError {
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error during writing
    #[error("I/O error during JSON generation: {0}")]
    Io(#[from] std::io::Error),
}
