//! Environment loading for applications configured through process variables.
//!
//! This crate reads `.env`-style key-value files, JSON objects and YAML
//! mappings, flattens nested documents into dotted keys, writes the result
//! into the process environment (or any other [`EnvTable`]), and reads values
//! back as typed scalars with default fallback.

mod accessor;
pub mod constants;
mod format;
mod loader;
mod table;

pub use accessor::{
    EnvValue, get_env, get_env_bool, get_env_duration, get_env_float, get_env_int,
    get_env_nested, get_env_string, nested_key,
};
pub use format::{Format, UnknownFormat};
pub use loader::{
    EnvLoader, LoadError, Loaded, Node, ParsedLine, SourceError, Tree, UnserializableSequence,
    flatten_into, load_env, load_env_with_format, parse_line,
};
pub use table::{EnvTable, MemoryEnv, ProcessEnv};
