//! src/error.rs
//! ============================================================================
//! # `AppError`: Unified Error Type for the Virtual Drive
//!
//! This module defines the error enum used across the entire application.
//! Each variant carries enough context to be rendered as a user-facing
//! notification, and all fallible operations return `Result<T, AppError>`.
//!
//! Every error here is local and non-fatal: it surfaces as a transient
//! notice and never terminates the session.

use std::{io, path::PathBuf};
use thiserror::Error;

/// Unified error type for all virtual-drive operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Standard IO error, auto-converted from `io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Input validation errors (empty folder name, blank path, ...).
    #[error("Invalid input: {field} - {message}")]
    InvalidInput {
        field: String, // "folder name", "upload path", etc.
        message: String,
    },

    /// A staged file exceeds the simulated-upload size limit.
    #[error("{name} is too large ({size_bytes} bytes, limit is {max_bytes})")]
    FileTooLarge {
        name: String,
        size_bytes: u64,
        max_bytes: u64,
    },

    /// An entry id that does not resolve to anything in the tree.
    #[error("Not found: {what}")]
    NotFound { what: String },

    /// A local file could not be read while staging it for upload.
    #[error("Failed to stage {path:?}: {source}")]
    Staging {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// TOML config parsing error.
    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    /// Config file I/O error with path.
    #[error("Failed to read config file {path:?}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Terminal I/O or rendering error.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Any other error, with description.
    #[error("Unexpected error: {0}")]
    Other(String),
}

impl AppError {
    /// Create an input validation error.
    pub fn invalid_input<S1: Into<String>, S2: Into<String>>(field: S1, message: S2) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a size-limit rejection for a staged file.
    pub fn file_too_large<S: Into<String>>(name: S, size_bytes: u64, max_bytes: u64) -> Self {
        Self::FileTooLarge {
            name: name.into(),
            size_bytes,
            max_bytes,
        }
    }

    /// Create a missing-entry error.
    pub fn not_found<S: Into<String>>(what: S) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Create a staging failure for a local path.
    pub fn staging<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        Self::Staging {
            path: path.into(),
            source,
        }
    }
}

// Allow conversion from `anyhow::Error` as fallback.
impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        Self::Other(e.to_string())
    }
}
