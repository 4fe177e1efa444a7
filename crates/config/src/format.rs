//! Source file formats and extension sniffing.
//!
//! Responsibilities:
//! - Define the closed set of supported formats (`Format`).
//! - Resolve `Format::Auto` to a concrete format from a file extension.
//! - Parse format names supplied as text (`"json"`, `"yml"`, ...).
//!
//! Does NOT handle:
//! - Reading or parsing file contents (see `loader`).
//!
//! Invariants:
//! - Resolution never fails: unknown or missing extensions resolve to `KeyValue`.
//! - Extension matching is case-insensitive.
//! - `resolve()` never returns `Auto`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::constants::{JSON_EXTENSIONS, KEY_VALUE_EXTENSIONS, YAML_EXTENSIONS};

/// Format of a configuration source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    /// Pick the format from the file extension.
    #[default]
    Auto,
    /// `KEY=VALUE` lines (`.env` style).
    KeyValue,
    /// JSON object, flattened to dotted keys.
    Json,
    /// YAML mapping, flattened to dotted keys.
    Yaml,
}

impl Format {
    /// Detect the format of `path` from its extension.
    ///
    /// `.env` is key-value, `.json` is JSON, `.yaml`/`.yml` is YAML, and
    /// everything else (including no extension) falls back to key-value.
    pub fn detect(path: &Path) -> Self {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return Self::KeyValue;
        };
        let ext = ext.to_ascii_lowercase();

        if JSON_EXTENSIONS.contains(&ext.as_str()) {
            Self::Json
        } else if YAML_EXTENSIONS.contains(&ext.as_str()) {
            Self::Yaml
        } else {
            Self::KeyValue
        }
    }

    /// Resolve this format for `path`: explicit formats are kept, `Auto` is detected.
    pub fn resolve(self, path: &Path) -> Self {
        match self {
            Self::Auto => Self::detect(path),
            concrete => concrete,
        }
    }

    /// Returns true if this format is parsed into a tree and flattened.
    pub fn is_structured(self) -> bool {
        matches!(self, Self::Json | Self::Yaml)
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::KeyValue => "key_value",
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a format name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown file format: {0}")]
pub struct UnknownFormat(pub String);

impl FromStr for Format {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().trim_start_matches('.').to_ascii_lowercase();
        match name.as_str() {
            "auto" => Ok(Self::Auto),
            "key_value" | "key-value" | "keyvalue" | "dotenv" => Ok(Self::KeyValue),
            other if KEY_VALUE_EXTENSIONS.contains(&other) => Ok(Self::KeyValue),
            other if JSON_EXTENSIONS.contains(&other) => Ok(Self::Json),
            other if YAML_EXTENSIONS.contains(&other) => Ok(Self::Yaml),
            _ => Err(UnknownFormat(s.to_string())),
        }
    }
}
