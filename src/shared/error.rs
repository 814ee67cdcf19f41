use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes let scripts distinguish a refused edit from a broken setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (API error, network error, file I/O error, etc.)
    ApplicationError = 3,
    /// The requested operation was refused by a lock or business rule
    OperationBlocked = 4,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
            ExitCode::OperationBlocked => write!(f, "Operation Blocked (4)"),
        }
    }
}

/// Application-specific errors.
///
/// Tree-shape anomalies are never errors; they are recorded on the forest.
#[derive(Debug, Error)]
pub enum BomError {
    #[error("BOM snapshot not found: {path}\n\n💡 Hint: {suggestion}")]
    SnapshotNotFound { path: PathBuf, suggestion: String },

    #[error("Failed to parse BOM snapshot: {path}\nDetails: {details}\n\n💡 Hint: The file must contain {{\"header\", \"components\", \"routing\"}} as returned by the BOM API")]
    SnapshotParseError { path: PathBuf, details: String },

    #[error("Invalid API URL: {url}\nReason: {reason}\n\n💡 Hint: Use an absolute http(s) URL such as https://erp.example.com/api")]
    InvalidApiUrl { url: String, reason: String },

    #[error("BOM API request failed: {endpoint}\nDetails: {details}")]
    ApiRequestFailed { endpoint: String, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Node not found: {node_id}\n\n💡 Hint: Run `bom-explorer show --format json` to list node ids")]
    NodeNotFound { node_id: String },

    #[error("Another operation is still in progress on this BOM; wait for it to finish")]
    SessionBusy,

    /// Validation error for configuration and arguments
    #[error("Validation error: {message}")]
    Validation { message: String },
}
