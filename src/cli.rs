//! Command-line interface definitions for crossdupe.
//!
//! This module defines all CLI arguments using the clap derive API.
//!
//! # Example
//!
//! ```bash
//! # Compare the top level of two directories
//! crossdupe ~/photos /mnt/backup/photos
//!
//! # Compare full subtrees and emit JSON for scripting
//! crossdupe -r ~/photos /mnt/backup/photos --output json
//!
//! # Only report files present under both roots
//! crossdupe -r --cross-only ~/photos /mnt/backup/photos
//!
//! # Verbose mode for debugging
//! crossdupe -v ~/a ~/b
//! ```

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Find files with identical content in two directory trees.
///
/// Candidates are narrowed by size, then by BLAKE3 digests of their first
/// 4KB and of their full content, and every reported group is confirmed
/// with a byte-for-byte comparison.
#[derive(Debug, Parser)]
#[command(name = "crossdupe")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// First directory tree
    #[arg(value_name = "DIR1")]
    pub dir1: PathBuf,

    /// Second directory tree
    #[arg(value_name = "DIR2")]
    pub dir2: PathBuf,

    /// Walk full subtrees instead of direct children only
    ///
    /// Neither directory may contain the other when recursing.
    #[arg(short, long)]
    pub recursive: bool,

    /// Output format [default: text, or the config file's value]
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Number of I/O threads for hashing and verification [default: 4]
    ///
    /// Lower values reduce disk thrashing on HDDs.
    #[arg(long, value_name = "N")]
    pub io_threads: Option<usize>,

    /// Only report groups with files under both directories
    #[arg(long)]
    pub cross_only: bool,

    /// Path to a TOML configuration file
    ///
    /// If not specified, a default platform-specific path is used.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable progress bars
    #[arg(long)]
    pub no_progress: bool,

    /// Report errors as JSON objects on stderr
    #[arg(long)]
    pub json_errors: bool,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Output format for scan results.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable report
    #[default]
    Text,
    /// JSON output for scripting
    Json,
    /// CSV output for spreadsheets
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}
