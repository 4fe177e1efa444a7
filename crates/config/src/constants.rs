//! Centralized constants for the envload crate.
//!
//! Keeps file-extension tables and key separators in one place so the
//! format dispatcher, the flattener and the accessors agree on them.

// =============================================================================
// Format Detection
// =============================================================================

/// Extensions (lowercase, without the dot) recognised as key-value files.
pub const KEY_VALUE_EXTENSIONS: &[&str] = &["env"];

/// Extensions recognised as JSON documents.
pub const JSON_EXTENSIONS: &[&str] = &["json"];

/// Extensions recognised as YAML documents.
pub const YAML_EXTENSIONS: &[&str] = &["yaml", "yml"];

// =============================================================================
// Key Shapes
// =============================================================================

/// Separator joining path segments of a flattened key (`db.host`).
pub const FLATTEN_SEPARATOR: char = '.';

/// Separator used when a dotted key is translated to an environment key (`DB_HOST`).
pub const ENV_KEY_SEPARATOR: char = '_';

// =============================================================================
// Key-Value Syntax
// =============================================================================

/// Starts a full-line or inline comment outside quotes.
pub const COMMENT_CHAR: char = '#';

/// Separates key from value; only the first occurrence counts.
pub const ASSIGNMENT_CHAR: char = '=';

/// Characters that open and close a quoted span.
pub const QUOTE_CHARS: &[char] = &['"', '\''];

// =============================================================================
// Scalar Rendering
// =============================================================================

/// Floats with a zero fraction below this magnitude render without a decimal point.
pub const INTEGRAL_FLOAT_LIMIT: f64 = 1e21;
