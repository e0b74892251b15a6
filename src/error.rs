//! Structured error handling and exit codes.

use serde::Serialize;

use crate::config::ConfigFileError;
use crate::duplicates::FinderError;

/// Exit codes for the crossdupe binary.
///
/// - 0: Success (completed normally, duplicates found)
/// - 1: General error (unexpected failure)
/// - 2: No duplicates found (completed normally, no duplicates)
/// - 3: Configuration error (roots invalid, or a bad config file)
/// - 4: File access error (a directory or file could not be read)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// Success: Scan completed and duplicates were found.
    Success = 0,
    /// General error: An unexpected error occurred.
    GeneralError = 1,
    /// No duplicates: Scan completed but no duplicates were found.
    NoDuplicates = 2,
    /// The two roots cannot be compared, or configuration is invalid.
    ConfigError = 3,
    /// Listing a directory or reading a file failed mid-run.
    FileAccessError = 4,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "CD000",
            Self::GeneralError => "CD001",
            Self::NoDuplicates => "CD002",
            Self::ConfigError => "CD003",
            Self::FileAccessError => "CD004",
        }
    }

    /// Pick the exit code for an error returned by the application.
    #[must_use]
    pub fn for_error(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<FinderError>() {
            Some(FinderError::Config(_)) => Self::ConfigError,
            Some(FinderError::Scan(_) | FinderError::Hash(_)) => Self::FileAccessError,
            None if err.downcast_ref::<ConfigFileError>().is_some() => Self::ConfigError,
            None => Self::GeneralError,
        }
    }
}

/// Structured error information for JSON output.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// The error code (e.g., "CD003")
    pub code: String,
    /// The exit code number
    pub exit_code: i32,
    /// Human-readable error message, including its causes
    pub message: String,
}

impl StructuredError {
    /// Create a new structured error from an anyhow error and an exit code.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        Self {
            code: exit_code.code_prefix().to_string(),
            exit_code: exit_code.as_i32(),
            message: format!("{err:#}"),
        }
    }
}
