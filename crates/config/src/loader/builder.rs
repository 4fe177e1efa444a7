//! Environment loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `EnvLoader` collecting candidate paths and options.
//! - Dispatch each candidate to the key-value or structured loader by format.
//! - Stop at the first candidate that loads (first success wins).
//!
//! Does NOT handle:
//! - Line scanning (delegated to dotenv.rs).
//! - JSON/YAML parsing and flattening (delegated to structured.rs and flatten.rs).
//!
//! Invariants / Assumptions:
//! - Candidates are tried in the order they were added; empty paths are skipped.
//! - Remaining candidates are never touched once one succeeds.
//! - Per-candidate errors are logged, never returned; total failure is `LoadError::NoFileLoaded`.
//! - Loads are not atomic: a candidate that fails part-way may leave earlier writes applied.

use std::path::{Path, PathBuf};

use super::dotenv::load_key_value;
use super::error::{LoadError, SourceError};
use super::structured::{load_json, load_yaml};
use crate::format::Format;
use crate::table::{EnvTable, ProcessEnv};

/// Outcome of a successful load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loaded {
    /// The candidate that was loaded.
    pub path: PathBuf,
    /// The concrete format it was parsed as.
    pub format: Format,
    /// Number of entries the table accepted; refused writes are not counted.
    pub entries: usize,
}

/// Loader that writes the first loadable candidate file into an environment table.
#[derive(Debug, Clone, Default)]
pub struct EnvLoader {
    format: Format,
    paths: Vec<PathBuf>,
    strict: bool,
}

impl EnvLoader {
    /// Create a loader with auto-detected format, no candidates, and lenient parsing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Force a format for every candidate. `Format::Auto` restores extension sniffing.
    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    /// Append a candidate path.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.paths.push(path.into());
        self
    }

    /// Append several candidate paths, keeping their order.
    pub fn with_paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.paths.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Fail a candidate on malformed key-value lines and unserializable sequences
    /// instead of skipping them.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Candidate paths in the order they will be tried.
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Load into the process environment.
    pub fn load(&self) -> Result<Loaded, LoadError> {
        self.load_into(&mut ProcessEnv)
    }

    /// Load into `table`.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::NoFileLoaded` if every candidate is empty or fails.
    pub fn load_into(&self, table: &mut impl EnvTable) -> Result<Loaded, LoadError> {
        for path in &self.paths {
            if path.as_os_str().is_empty() {
                tracing::debug!("Skipping empty candidate path");
                continue;
            }

            let format = self.format.resolve(path);
            match self.load_one(path, format, table) {
                Ok(entries) => {
                    tracing::debug!(
                        path = %path.display(),
                        format = %format,
                        entries,
                        "Loaded environment file"
                    );
                    return Ok(Loaded {
                        path: path.clone(),
                        format,
                        entries,
                    });
                }
                Err(e) => {
                    tracing::debug!(error = %e, "Candidate failed, trying next");
                }
            }
        }

        Err(LoadError::NoFileLoaded)
    }

    fn load_one(
        &self,
        path: &Path,
        format: Format,
        table: &mut impl EnvTable,
    ) -> Result<usize, SourceError> {
        match format {
            Format::Json => load_json(path, table, self.strict),
            Format::Yaml => load_yaml(path, table, self.strict),
            Format::KeyValue | Format::Auto => load_key_value(path, table, self.strict),
        }
    }
}

/// Load the first loadable file among `paths` into the process environment,
/// detecting each file's format from its extension.
pub fn load_env<I, P>(paths: I) -> Result<Loaded, LoadError>
where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
{
    load_env_with_format(Format::Auto, paths)
}

/// Like [`load_env`], but parse every candidate as `format` unless it is `Format::Auto`.
pub fn load_env_with_format<I, P>(format: Format, paths: I) -> Result<Loaded, LoadError>
where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
{
    EnvLoader::new().with_format(format).with_paths(paths).load()
}
