//! Loads a `.env`, a JSON and a YAML file in turn and reads typed values back.
//!
//! Run with `RUST_LOG=envload=debug cargo run -p envload --example walkthrough`
//! to see which candidates are tried.

use std::error::Error;
use std::fs;
use std::time::Duration;

use envload::{
    EnvLoader, Format, get_env, get_env_bool, get_env_duration, get_env_float, get_env_int,
    get_env_nested, get_env_string, load_env, load_env_with_format,
};
use tempfile::TempDir;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const KEY_VALUE: &str = "\
# application settings
APP_NAME=\"Walkthrough App\"
APP_VERSION=2.0.0
DEBUG=true
PORT=9000 # inline comments are dropped
TIMEOUT=45s
RETRY_INTERVAL=1m30s
DB_HOST=db.internal
";

const JSON: &str = r#"{
  "database": {"host": "json-host", "port": 6543, "name": "orders"},
  "timeout": 12.5,
  "app": {"name": "from-json", "port": 8443, "debug": false}
}"#;

const YAML: &str = "\
api:
  host: api.internal
  port: 3001
  timeout: 60
  features: [auth, logging]
";

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();

    let dir = TempDir::new()?;
    let env_path = dir.path().join("config.env");
    let json_path = dir.path().join("config.json");
    let yaml_path = dir.path().join("config.yaml");
    fs::write(&env_path, KEY_VALUE)?;
    fs::write(&json_path, JSON)?;
    fs::write(&yaml_path, YAML)?;

    println!("=== Key-value file ===");
    load_env([&env_path])?;
    println!("App Name: {}", get_env_string("APP_NAME", "DefaultApp"));
    println!("App Version: {}", get_env_string("APP_VERSION", "1.0.0"));
    println!("Debug: {}", get_env_bool("DEBUG", false));
    println!("Port: {}", get_env_int("PORT", 8080));

    println!("\n=== JSON file ===");
    load_env([&json_path])?;
    println!("Database Host: {}", get_env_string("database.host", "localhost"));
    println!("Database Port: {}", get_env_int("database.port", 5432));
    println!("Database Name: {}", get_env_string("database.name", "mydb"));
    println!("Timeout: {:.1}", get_env_float("timeout", 30.0));

    println!("\n=== YAML file ===");
    load_env([&yaml_path])?;
    println!("API Host: {}", get_env_string("api.host", "localhost"));
    println!("API Port: {}", get_env_int("api.port", 3000));
    println!("API Features: {}", get_env_string("api.features", "[]"));

    println!("\n=== Dot-notation lookup ===");
    // `db.host` reads DB_HOST, `db.port` is unset and falls back.
    println!("DB Host: {}", get_env_nested("db.host", "localhost".to_string()));
    println!("DB Port: {}", get_env_nested("db.port", 5432));

    println!("\n=== Forced format and fallthrough ===");
    let missing = dir.path().join("missing.json");
    let loaded = load_env_with_format(Format::Json, [&missing, &json_path])?;
    println!("Loaded {} entries from {}", loaded.entries, loaded.path.display());

    let err = EnvLoader::new()
        .with_path(&missing)
        .load()
        .err()
        .map(|e| e.to_string());
    println!("All candidates missing: {}", err.unwrap_or_default());

    println!("\n=== Generic reads ===");
    println!("String: {}", get_env("app.name", "DefaultApp".to_string()));
    println!("Int: {}", get_env("app.port", 8080));
    println!("Bool: {}", get_env("app.debug", true));
    println!("Duration: {:?}", get_env("TIMEOUT", Duration::from_secs(30)));

    println!("\n=== Durations ===");
    let defaults = [
        ("TIMEOUT", Duration::from_secs(30)),
        ("RETRY_INTERVAL", Duration::from_secs(300)),
        ("CLEANUP_INTERVAL", Duration::from_secs(3600)),
    ];
    for (key, default) in defaults {
        println!("{key}: {:?}", get_env_duration(key, default));
    }

    Ok(())
}
