//! Error types for loading environment files.
//!
//! Responsibilities:
//! - Define per-candidate failures (`SourceError`).
//! - Define the aggregate failure returned to callers (`LoadError`).
//!
//! Does NOT handle:
//! - Accessor conversion failures; those fall back to defaults and never error.
//!
//! Invariants:
//! - `SourceError` carries the candidate path for logging.
//! - `LoadError::NoFileLoaded` carries no per-file detail.
//! - Neither error includes raw file content, so loaded secrets never leak into messages.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Why a single candidate file could not be loaded.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse JSON document at {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to parse YAML document at {path}: {source}")]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Document root at {path} is not a mapping")]
    NotAMapping { path: PathBuf },

    /// Strict mode only. Holds the 1-based line number, never the line itself.
    #[error("Malformed line {line} in {path}: expected KEY=VALUE")]
    MalformedLine { path: PathBuf, line: usize },

    /// Strict mode only.
    #[error("Failed to serialize sequence for key '{key}' in {path}")]
    Serialize { path: PathBuf, key: String },
}

impl SourceError {
    /// The candidate path this error belongs to.
    pub fn path(&self) -> &Path {
        match self {
            Self::Read { path, .. }
            | Self::Json { path, .. }
            | Self::Yaml { path, .. }
            | Self::NotAMapping { path }
            | Self::MalformedLine { path, .. }
            | Self::Serialize { path, .. } => path,
        }
    }
}

/// Errors returned by the load entry points.
#[derive(Error, Debug)]
pub enum LoadError {
    /// Every candidate was empty or failed to load.
    #[error("failed to load any of the specified files")]
    NoFileLoaded,
}
