//! crossdupe - find identical files across two directory trees
//!
//! Files are narrowed to candidates by size, then by BLAKE3 digests of their
//! first 4KB and their full content, and every reported group is confirmed
//! with a byte-for-byte comparison. Digests only ever rule files out.
//!
//! # Example
//!
//! ```no_run
//! let groups = crossdupe::find_duplicates("/mnt/a", "/mnt/b", true).unwrap();
//! for group in &groups {
//!     println!("{} bytes: {:?}", group.size, group.files);
//! }
//! ```

pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod options;
pub mod output;
pub mod progress;
pub mod scanner;

use std::io;
use std::path::Path;
use std::sync::Arc;

use crate::cli::{Cli, OutputFormat};
use crate::config::Config;
use crate::error::ExitCode;
use crate::output::{CsvOutput, JsonOutput, TextOutput};
use crate::progress::Progress;

pub use duplicates::{DuplicateFinder, DuplicateGroup, FinderConfig, FinderError, ScanSummary};
pub use options::{ConfigError, ScanOptions};

/// Find files with identical content under `root1` and `root2`.
///
/// Runs with the default [`FinderConfig`]. Use [`DuplicateFinder`] directly
/// for statistics, progress reporting or tuning.
///
/// # Errors
///
/// Returns [`FinderError::Config`] if the roots are invalid, and
/// [`FinderError::Scan`] or [`FinderError::Hash`] if any directory or file
/// cannot be read. No partial result is returned.
pub fn find_duplicates(
    root1: impl AsRef<Path>,
    root2: impl AsRef<Path>,
    recursive: bool,
) -> Result<Vec<DuplicateGroup>, FinderError> {
    let options = ScanOptions::new(root1.as_ref(), root2.as_ref(), recursive);
    DuplicateFinder::with_defaults()
        .find_duplicates(&options)
        .map(|(groups, _)| groups)
}

/// Run the command-line application.
///
/// Loads layered configuration, runs the scan and writes the report to
/// stdout.
///
/// # Errors
///
/// Returns an error if configuration is invalid, the scan fails, or the
/// report cannot be written.
pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = Config::load(cli.config.as_deref())?.with_cli_overrides(&cli);
    log::debug!("Effective configuration: {:?}", config);

    let mut finder_config = FinderConfig::default()
        .with_io_threads(config.io_threads)
        .with_cross_tree_only(config.cross_tree_only);
    if config.progress && config.output == OutputFormat::Text {
        finder_config = finder_config.with_progress_callback(Arc::new(Progress::new()));
    }

    let options = ScanOptions::new(&cli.dir1, &cli.dir2, config.recursive);
    let (groups, summary) = DuplicateFinder::new(finder_config).find_duplicates(&options)?;

    let exit_code = if groups.is_empty() {
        ExitCode::NoDuplicates
    } else {
        ExitCode::Success
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match config.output {
        OutputFormat::Text => TextOutput::new(&groups, &summary).write_to(&mut out)?,
        OutputFormat::Json => JsonOutput::new(&groups, &summary, exit_code).write_to(&mut out, true)?,
        OutputFormat::Csv => CsvOutput::new(&groups).write_to(&mut out)?,
    }

    Ok(exit_code)
}
