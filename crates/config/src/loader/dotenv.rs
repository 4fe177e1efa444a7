//! Key-value (`.env` style) file scanning.
//!
//! Responsibilities:
//! - Split one line into a key and an unquoted value (`parse_line`).
//! - Stream a file line by line, writing each pair into an `EnvTable` as it is read.
//!
//! Does NOT handle:
//! - Escape sequences or variable substitution; values are taken verbatim.
//! - Multi-line values.
//!
//! Invariants:
//! - A `#` starts a comment only outside a quoted span, and a span is closed
//!   only by the same quote character that opened it.
//! - Malformed lines are skipped in lenient mode; the file still loads.
//! - Open and read failures fail the whole file, but writes already made stay applied.
//! - Lines are read as bytes; invalid UTF-8 is replaced rather than failing the file.
//! - Keys are not validated; an empty key is a valid (if unusual) result.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::error::SourceError;
use crate::constants::{ASSIGNMENT_CHAR, COMMENT_CHAR, QUOTE_CHARS};
use crate::table::EnvTable;

/// Result of scanning one line of a key-value file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedLine<'a> {
    /// Blank line or comment.
    Skip,
    /// A `KEY=VALUE` assignment with the value unquoted.
    Pair { key: &'a str, value: &'a str },
    /// Content without an `=`.
    Malformed,
}

/// Scan a single line of a key-value file.
pub fn parse_line(raw: &str) -> ParsedLine<'_> {
    let line = raw.trim();
    if line.is_empty() || line.starts_with(COMMENT_CHAR) {
        return ParsedLine::Skip;
    }

    let line = strip_inline_comment(line);
    if line.is_empty() {
        return ParsedLine::Skip;
    }

    let Some((key, value)) = line.split_once(ASSIGNMENT_CHAR) else {
        return ParsedLine::Malformed;
    };

    ParsedLine::Pair {
        key: key.trim(),
        value: unquote(value.trim()),
    }
}

/// Cut the line at the first `#` outside quotes and re-trim.
fn strip_inline_comment(line: &str) -> &str {
    let mut open_quote: Option<char> = None;

    for (idx, ch) in line.char_indices() {
        match open_quote {
            Some(quote) if ch == quote => open_quote = None,
            Some(_) => {}
            None if ch == COMMENT_CHAR => return line[..idx].trim(),
            None if QUOTE_CHARS.contains(&ch) => open_quote = Some(ch),
            None => {}
        }
    }

    line
}

/// Strip one pair of matching surrounding quotes, without unescaping.
fn unquote(value: &str) -> &str {
    QUOTE_CHARS
        .iter()
        .find_map(|&quote| {
            (value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote))
                .then(|| &value[1..value.len() - 1])
        })
        .unwrap_or(value)
}

/// Load a key-value file into `table`, returning the number of entries the table stored.
///
/// In strict mode the first malformed line fails the file with
/// `SourceError::MalformedLine`.
pub fn load_key_value(
    path: &Path,
    table: &mut impl EnvTable,
    strict: bool,
) -> Result<usize, SourceError> {
    let read_error = |source| SourceError::Read {
        path: path.to_path_buf(),
        source,
    };

    let reader = BufReader::new(File::open(path).map_err(read_error)?);
    let mut written = 0;

    for (idx, raw) in reader.split(b'\n').enumerate() {
        let mut raw = raw.map_err(read_error)?;
        if raw.last() == Some(&b'\r') {
            raw.pop();
        }
        let line = String::from_utf8_lossy(&raw);

        match parse_line(&line) {
            ParsedLine::Pair { key, value } => {
                if table.set(key, value) {
                    written += 1;
                }
            }
            ParsedLine::Malformed if strict => {
                return Err(SourceError::MalformedLine {
                    path: path.to_path_buf(),
                    line: idx + 1,
                });
            }
            ParsedLine::Malformed => {
                tracing::trace!(
                    path = %path.display(),
                    line = idx + 1,
                    "Skipping line without '='"
                );
            }
            ParsedLine::Skip => {}
        }
    }

    Ok(written)
}
