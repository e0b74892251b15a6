//! Output formatters for duplicate scan results.
//!
//! This module provides different output formats for scan results:
//! - Plain text for terminals
//! - JSON for automation and scripting
//! - CSV for spreadsheet import
//!
//! # Example
//!
//! ```no_run
//! use crossdupe::duplicates::DuplicateFinder;
//! use crossdupe::error::ExitCode;
//! use crossdupe::options::ScanOptions;
//! use crossdupe::output::JsonOutput;
//!
//! let finder = DuplicateFinder::with_defaults();
//! let (groups, summary) = finder
//!     .find_duplicates(&ScanOptions::new("a", "b", true))
//!     .unwrap();
//!
//! let output = JsonOutput::new(&groups, &summary, ExitCode::Success);
//! println!("{}", output.to_json_pretty().unwrap());
//! ```

pub mod csv;
pub mod json;
pub mod text;

// Re-export main types
pub use self::csv::CsvOutput;
pub use json::JsonOutput;
pub use text::TextOutput;
