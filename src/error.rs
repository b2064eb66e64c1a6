//! Error types for bundle runs.
//!
//! Every stage reports through [`BundleError`]; nothing is recovered internally.
//! The binary converts whatever reaches the top into a single `Error: ...` line.

use crate::config::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a bundle run.
#[derive(Debug, Error)]
pub enum BundleError {
    /// A required option was not supplied.
    #[error("missing required option --{0}")]
    MissingOption(&'static str),

    /// The language token is neither `all` nor a known identifier.
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// The directory walk failed (missing or unreadable root, unreadable subdirectory).
    #[error("failed to read directory tree: {0}")]
    Walk(#[from] walkdir::Error),

    /// A selected file could not be read.
    #[error("failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A selected file is not valid UTF-8 text.
    #[error("{path} could not be decoded as UTF-8 text")]
    Decode { path: PathBuf },

    /// The output file could not be created or written.
    #[error("failed to write {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The defaults file could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The language listing could not be rendered as JSON.
    #[error("failed to serialize language list: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for bundle operations.
pub type BundleResult<T> = Result<T, BundleError>;
