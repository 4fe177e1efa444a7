//! JSON and YAML document loading.
//!
//! Responsibilities:
//! - Read a document, parse it into a tree, and flatten it into an `EnvTable`.
//!
//! Does NOT handle:
//! - The flattening rules themselves (see `flatten`).
//!
//! Invariants:
//! - The document root must be a mapping; a null or empty document loads zero entries.
//! - Nothing is written unless the whole document parses.

use std::path::Path;

use super::error::SourceError;
use super::flatten::{Tree, flatten_into};
use crate::table::EnvTable;

fn read(path: &Path) -> Result<String, SourceError> {
    std::fs::read_to_string(path).map_err(|source| SourceError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// True for YAML streams with nothing but blank lines, comments and document markers.
fn has_no_document(content: &str) -> bool {
    content.lines().map(str::trim).all(|line| {
        line.is_empty() || line.starts_with('#') || line == "---" || line == "..."
    })
}

fn flatten_document<T: Tree>(
    path: &Path,
    root: &T,
    table: &mut impl EnvTable,
    strict: bool,
) -> Result<usize, SourceError> {
    flatten_into(root, "", table, strict).map_err(|e| SourceError::Serialize {
        path: path.to_path_buf(),
        key: e.key,
    })
}

/// Load a JSON object file into `table`, returning the number of entries written.
pub fn load_json(
    path: &Path,
    table: &mut impl EnvTable,
    strict: bool,
) -> Result<usize, SourceError> {
    let content = read(path)?;
    let root: serde_json::Value =
        serde_json::from_str(&content).map_err(|source| SourceError::Json {
            path: path.to_path_buf(),
            source,
        })?;

    match &root {
        serde_json::Value::Object(_) => flatten_document(path, &root, table, strict),
        serde_json::Value::Null => Ok(0),
        _ => Err(SourceError::NotAMapping {
            path: path.to_path_buf(),
        }),
    }
}

/// Load a YAML mapping file into `table`, returning the number of entries written.
pub fn load_yaml(
    path: &Path,
    table: &mut impl EnvTable,
    strict: bool,
) -> Result<usize, SourceError> {
    let content = read(path)?;
    if has_no_document(&content) {
        return Ok(0);
    }

    let root: serde_yaml::Value =
        serde_yaml::from_str(&content).map_err(|source| SourceError::Yaml {
            path: path.to_path_buf(),
            source,
        })?;

    match &root {
        serde_yaml::Value::Mapping(_) => flatten_document(path, &root, table, strict),
        serde_yaml::Value::Null => Ok(0),
        _ => Err(SourceError::NotAMapping {
            path: path.to_path_buf(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::MemoryEnv;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write(temp_dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = temp_dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_json_document() {
        let temp_dir = TempDir::new().unwrap();
        let path = write(
            &temp_dir,
            "config.json",
            r#"{
                "app": {"name": "MyApp", "version": "1.0.0", "debug": true, "port": 8080},
                "database": {"host": "localhost", "port": 5432, "name": "mydb"},
                "features": ["auth", "logging", "metrics"],
                "timeout": 30.5
            }"#,
        );

        let mut env = MemoryEnv::new();
        let written = load_json(&path, &mut env, false).unwrap();

        assert_eq!(written, 9);
        let expected = [
            ("app.name", "MyApp"),
            ("app.version", "1.0.0"),
            ("app.debug", "true"),
            ("app.port", "8080"),
            ("database.host", "localhost"),
            ("database.port", "5432"),
            ("database.name", "mydb"),
            ("features", r#"["auth","logging","metrics"]"#),
            ("timeout", "30.5"),
        ];
        for (key, value) in expected {
            assert_eq!(env.get(key).as_deref(), Some(value), "key {key}");
        }
    }

    #[test]
    fn test_load_yaml_document() {
        let temp_dir = TempDir::new().unwrap();
        let path = write(
            &temp_dir,
            "config.yaml",
            "app:\n  name: MyApp\n  version: 1.0.0\n  debug: true\n  port: 8080\n\n\
             database:\n  host: localhost\n  port: 5432\n\n\
             features:\n  - auth\n  - logging\n  - metrics\n\ntimeout: 30.5\n",
        );

        let mut env = MemoryEnv::new();
        let written = load_yaml(&path, &mut env, false).unwrap();

        assert_eq!(written, 8);
        assert_eq!(env.get("app.version").as_deref(), Some("1.0.0"));
        assert_eq!(env.get("app.debug").as_deref(), Some("true"));
        assert_eq!(env.get("database.port").as_deref(), Some("5432"));
        assert_eq!(
            env.get("features").as_deref(),
            Some(r#"["auth","logging","metrics"]"#)
        );
        assert_eq!(env.get("timeout").as_deref(), Some("30.5"));
    }

    #[test]
    fn test_malformed_json_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let path = write(&temp_dir, "broken.json", r#"{"a": "b", "c": "#);

        let mut env = MemoryEnv::new();
        let result = load_json(&path, &mut env, false);

        assert!(matches!(result, Err(SourceError::Json { .. })));
        assert!(env.is_empty());
    }

    #[test]
    fn test_malformed_yaml_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = write(&temp_dir, "broken.yaml", "key: [unclosed\n");

        let mut env = MemoryEnv::new();
        let result = load_yaml(&path, &mut env, false);

        assert!(matches!(result, Err(SourceError::Yaml { .. })));
    }

    #[test]
    fn test_non_mapping_root_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let json = write(&temp_dir, "list.json", "[1, 2, 3]");
        let yaml = write(&temp_dir, "scalar.yaml", "just a string\n");

        let mut env = MemoryEnv::new();
        assert!(matches!(
            load_json(&json, &mut env, false),
            Err(SourceError::NotAMapping { .. })
        ));
        assert!(matches!(
            load_yaml(&yaml, &mut env, false),
            Err(SourceError::NotAMapping { .. })
        ));
    }

    #[test]
    fn test_null_and_empty_documents_load_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let json = write(&temp_dir, "null.json", "null");
        let yaml = write(&temp_dir, "empty.yaml", "# only a comment\n");
        let blank = write(&temp_dir, "blank.yml", "");
        let marker = write(&temp_dir, "marker.yml", "---\n");

        let mut env = MemoryEnv::new();
        assert_eq!(load_json(&json, &mut env, false).unwrap(), 0);
        assert_eq!(load_yaml(&yaml, &mut env, false).unwrap(), 0);
        assert_eq!(load_yaml(&blank, &mut env, false).unwrap(), 0);
        assert_eq!(load_yaml(&marker, &mut env, false).unwrap(), 0);
        assert!(env.is_empty());
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let temp_dir = TempDir::new().unwrap();
        let mut env = MemoryEnv::new();

        let result = load_json(&temp_dir.path().join("nope.json"), &mut env, false);

        match result {
            Err(err @ SourceError::Read { .. }) => {
                assert_eq!(err.path(), temp_dir.path().join("nope.json"));
            }
            other => panic!("expected read error, got {other:?}"),
        }
    }
}
