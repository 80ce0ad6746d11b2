//! Error types for nbmend operations.
//!
//! This module defines [`NbmendError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `NbmendError` for domain-specific errors that need distinct handling
//! - Per-file failures are reported and skipped; only usage errors stop a run

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for nbmend operations.
#[derive(Debug, Error)]
pub enum NbmendError {
    /// Notebook file could not be read.
    #[error("Failed to read notebook {path}: {source}")]
    NotebookRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Notebook file is not valid JSON.
    #[error("Failed to parse notebook {path}: {message}")]
    NotebookParse { path: PathBuf, message: String },

    /// Repaired notebook could not be written back.
    #[error("Failed to write notebook {path}: {source}")]
    NotebookWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Settings file not found at the given location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse the settings file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid command-line usage.
    #[error("{message}")]
    Usage { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for nbmend operations.
pub type Result<T> = std::result::Result<T, NbmendError>;
