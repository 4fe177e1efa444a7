//! Loading of environment files into an environment table.
//!
//! Responsibilities:
//! - Load `.env`-style key-value files, JSON objects, and YAML mappings.
//! - Flatten nested documents into dotted keys (`database.host`).
//! - Provide the `EnvLoader` builder and the `load_env*` entry points.
//!
//! Does NOT handle:
//! - Reading values back with type conversion (see `accessor.rs`).
//! - The storage behind the table (see `table.rs`).
//!
//! Invariants / Assumptions:
//! - First success wins across candidate files; nothing is merged.
//! - Every pair is written as soon as it is produced, so later pairs overwrite earlier ones.
//! - Lenient by default: malformed key-value lines and unserializable sequences are skipped.

mod builder;
mod dotenv;
mod error;
mod flatten;
mod structured;

pub use builder::{EnvLoader, Loaded, load_env, load_env_with_format};
pub use dotenv::{ParsedLine, parse_line};
pub use error::{LoadError, SourceError};
pub use flatten::{Node, Tree, UnserializableSequence, flatten_into};
