//! Flattening of parsed JSON/YAML trees into dotted environment keys.
//!
//! Responsibilities:
//! - Walk a document tree depth-first and emit one entry per leaf.
//! - Render scalars as text and serialize sequences as compact JSON arrays.
//!
//! Does NOT handle:
//! - Reading or parsing files (see `structured`).
//!
//! Invariants:
//! - Mapping nodes never produce an entry of their own; only leaves do.
//! - Keys are joined with `.`; the root level has no prefix.
//! - Entries are emitted in document order and written to the table immediately.
//! - In lenient mode a sequence that cannot be serialized is dropped silently.

use serde::Serialize;
use std::borrow::Cow;

use crate::constants::{FLATTEN_SEPARATOR, INTEGRAL_FLOAT_LIMIT};
use crate::table::EnvTable;

/// How a document node is flattened.
pub enum Node<'a, T: ?Sized> {
    /// Key/child pairs in document order.
    Mapping(Vec<(Cow<'a, str>, &'a T)>),
    /// Serialized as a whole.
    Sequence(&'a T),
    /// Already rendered to text.
    Scalar(String),
}

/// A parsed document tree that can be flattened.
pub trait Tree: Serialize {
    fn node(&self) -> Node<'_, Self>;
}

impl Tree for serde_json::Value {
    fn node(&self) -> Node<'_, Self> {
        use serde_json::Value;

        match self {
            Value::Object(map) => {
                Node::Mapping(map.iter().map(|(k, v)| (Cow::Borrowed(k.as_str()), v)).collect())
            }
            Value::Array(_) => Node::Sequence(self),
            Value::Null => Node::Scalar("null".to_string()),
            Value::Bool(b) => Node::Scalar(b.to_string()),
            Value::Number(n) => Node::Scalar(match n.as_f64() {
                Some(f) if n.is_f64() => render_float(f),
                _ => n.to_string(),
            }),
            Value::String(s) => Node::Scalar(s.clone()),
        }
    }
}

impl Tree for serde_yaml::Value {
    fn node(&self) -> Node<'_, Self> {
        use serde_yaml::Value;

        match self {
            Value::Mapping(map) => Node::Mapping(
                map.iter()
                    .filter_map(|(k, v)| match yaml_key(k) {
                        Some(key) => Some((key, v)),
                        None => {
                            tracing::trace!("Skipping YAML mapping entry with a non-scalar key");
                            None
                        }
                    })
                    .collect(),
            ),
            Value::Sequence(_) => Node::Sequence(self),
            Value::Tagged(tagged) => tagged.value.node(),
            Value::Null => Node::Scalar("null".to_string()),
            Value::Bool(b) => Node::Scalar(b.to_string()),
            Value::Number(n) => Node::Scalar(match n.as_f64() {
                Some(f) if n.is_f64() => render_float(f),
                _ => n.to_string(),
            }),
            Value::String(s) => Node::Scalar(s.clone()),
        }
    }
}

/// YAML allows any node as a key; scalars are stringified, collections are refused.
fn yaml_key(key: &serde_yaml::Value) -> Option<Cow<'_, str>> {
    use serde_yaml::Value;

    match key {
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Bool(b) => Some(Cow::Owned(b.to_string())),
        Value::Null => Some(Cow::Borrowed("null")),
        Value::Tagged(tagged) => yaml_key(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

/// Render a float in its shortest form, without a trailing `.0` for integral values.
pub(crate) fn render_float(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < INTEGRAL_FLOAT_LIMIT {
        format!("{f:.0}")
    } else {
        f.to_string()
    }
}

/// Serialize a sequence as compact JSON, writing integral floats in integer form.
fn render_sequence<S: Serialize + ?Sized>(seq: &S) -> serde_json::Result<String> {
    let mut value = serde_json::to_value(seq)?;
    integralize_floats(&mut value);
    serde_json::to_string(&value)
}

/// Replace floats like `1.0` with integers, matching scalar rendering.
///
/// Integral floats outside the 64-bit integer range are left as floats.
fn integralize_floats(value: &mut serde_json::Value) {
    use serde_json::Value;

    match value {
        Value::Array(items) => items.iter_mut().for_each(integralize_floats),
        Value::Object(map) => map.values_mut().for_each(integralize_floats),
        Value::Number(n) if n.is_f64() => {
            let Some(f) = n.as_f64() else {
                return;
            };
            if !f.is_finite() || f.fract() != 0.0 || f.abs() >= INTEGRAL_FLOAT_LIMIT {
                return;
            }
            // 2^63 and 2^64 are exact as f64, so these bounds exclude overflow.
            if f >= i64::MIN as f64 && f < i64::MAX as f64 {
                *value = Value::from(f as i64);
            } else if f >= 0.0 && f < u64::MAX as f64 {
                *value = Value::from(f as u64);
            }
        }
        _ => {}
    }
}

/// A sequence that could not be serialized while flattening.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnserializableSequence {
    pub key: String,
}

/// Flatten `root` into `table` under `prefix`, returning the number of entries written.
///
/// In strict mode an unserializable sequence stops the walk with an error;
/// otherwise it is skipped and the walk continues.
pub fn flatten_into<T: Tree + ?Sized>(
    root: &T,
    prefix: &str,
    table: &mut impl EnvTable,
    strict: bool,
) -> Result<usize, UnserializableSequence> {
    let Node::Mapping(children) = root.node() else {
        return Ok(0);
    };

    let mut written = 0;
    for (key, child) in children {
        let full_key = if prefix.is_empty() {
            key.into_owned()
        } else {
            format!("{prefix}{FLATTEN_SEPARATOR}{key}")
        };

        match child.node() {
            Node::Mapping(_) => written += flatten_into(child, &full_key, table, strict)?,
            Node::Sequence(seq) => match render_sequence(seq) {
                Ok(text) => {
                    if table.set(&full_key, &text) {
                        written += 1;
                    }
                }
                Err(_) if strict => return Err(UnserializableSequence { key: full_key }),
                Err(e) => {
                    tracing::trace!(
                        key = %full_key,
                        error = %e,
                        "Dropping unserializable sequence"
                    );
                }
            },
            Node::Scalar(text) => {
                if table.set(&full_key, &text) {
                    written += 1;
                }
            }
        }
    }

    Ok(written)
}
