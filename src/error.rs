//! Error types for profilepkg
//!
//! Uses `thiserror` for library errors; the binary boundary wraps these in
//! `anyhow` for reporting.

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Result type alias for profilepkg operations
pub type PkgResult<T> = Result<T, PkgError>;

/// Main error type for profilepkg operations
#[derive(Error, Debug)]
pub enum PkgError {
    /// A native tool we depend on is missing or lacks the executable bit
    #[error("a required executable, '{path}', could not be found or is not executable")]
    MissingExecutable { path: PathBuf },

    /// Output directory missing or not writable
    #[error("output directory '{path}' either doesn't exist or is not writable")]
    OutputDirUnusable { path: PathBuf },

    /// Profile decoded fine but lacks the one key we require
    #[error("expected 'PayloadIdentifier' key in profile, but none found")]
    MissingPayloadIdentifier,

    /// Profile could not be decoded even after the unsign fallback
    #[error("profile '{path}' is malformed: {message}")]
    MalformedProfile { path: PathBuf, message: String },

    /// `security cms -D` failed on a profile we suspected was signed
    #[error("profile '{path}' could not be unsigned: {message}")]
    UnsignFailed { path: PathBuf, message: String },

    /// A native tool ran but exited non-zero
    #[error("{tool} failed with {status}")]
    ToolFailed { tool: String, status: ExitStatus },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Plist decoding error
    #[error("plist error: {0}")]
    Plist(#[from] plist::Error),
}
