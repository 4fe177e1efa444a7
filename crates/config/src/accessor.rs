//! Typed reads of environment values with default fallback.
//!
//! Responsibilities:
//! - Convert stored environment text into scalars (`EnvValue`).
//! - Fall back to the caller's default on absence, empty text, or parse failure.
//! - Translate dot-notation keys (`db.host`) to environment keys (`DB_HOST`).
//!
//! Does NOT handle:
//! - Writing values (see `loader` and `table`).
//!
//! Invariants:
//! - Accessors never return errors and never panic on stored content.
//! - Stored text is parsed as-is; surrounding whitespace is not trimmed.
//! - A type that implements `EnvValue` without overriding `parse_env` always
//!   yields its default.

use std::time::Duration;

use crate::constants::{ENV_KEY_SEPARATOR, FLATTEN_SEPARATOR};
use crate::table::{EnvTable, ProcessEnv};

/// A value that can be read back from environment text.
pub trait EnvValue: Sized {
    /// Parse `raw` into `Self`, returning `None` when it does not fit the type.
    fn parse_env(_raw: &str) -> Option<Self> {
        None
    }
}

macro_rules! impl_env_value_via_from_str {
    ($($ty:ty),* $(,)?) => {
        $(
            impl EnvValue for $ty {
                fn parse_env(raw: &str) -> Option<Self> {
                    raw.parse().ok()
                }
            }
        )*
    };
}

impl_env_value_via_from_str!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
);

impl EnvValue for bool {
    fn parse_env(raw: &str) -> Option<Self> {
        match raw {
            "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
            "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
            _ => None,
        }
    }
}

impl EnvValue for String {
    fn parse_env(raw: &str) -> Option<Self> {
        Some(raw.to_string())
    }
}

/// Durations are a quantity plus unit suffix: `300ms`, `30s`, `5m`, `1h30m`.
impl EnvValue for Duration {
    fn parse_env(raw: &str) -> Option<Self> {
        humantime::parse_duration(raw).ok()
    }
}

/// Translate a dot-notation key to an environment key: `db.host` -> `DB_HOST`.
pub fn nested_key(dotted: &str) -> String {
    dotted
        .replace(FLATTEN_SEPARATOR, &ENV_KEY_SEPARATOR.to_string())
        .to_uppercase()
}

pub(crate) fn lookup<E, T>(table: &E, key: &str, default: T) -> T
where
    E: EnvTable + ?Sized,
    T: EnvValue,
{
    match table.get(key) {
        Some(raw) if !raw.is_empty() => T::parse_env(&raw).unwrap_or(default),
        _ => default,
    }
}

/// Read `key` from the process environment as `T`, or return `default`.
pub fn get_env<T: EnvValue>(key: &str, default: T) -> T {
    lookup(&ProcessEnv, key, default)
}

/// Read a dot-notation key (`db.host` reads `DB_HOST`) from the process environment.
pub fn get_env_nested<T: EnvValue>(dotted: &str, default: T) -> T {
    get_env(&nested_key(dotted), default)
}

pub fn get_env_string(key: &str, default: &str) -> String {
    get_env(key, default.to_string())
}

pub fn get_env_int(key: &str, default: i64) -> i64 {
    get_env(key, default)
}

pub fn get_env_bool(key: &str, default: bool) -> bool {
    get_env(key, default)
}

pub fn get_env_float(key: &str, default: f64) -> f64 {
    get_env(key, default)
}

pub fn get_env_duration(key: &str, default: Duration) -> Duration {
    get_env(key, default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::MemoryEnv;

    fn table() -> MemoryEnv {
        [
            ("TEST_STRING", "hello"),
            ("TEST_INT", "42"),
            ("NEGATIVE_INT", "-7"),
            ("INVALID_INT", "not_a_number"),
            ("BIG_UINT", "18446744073709551615"),
            ("TEST_FLOAT", "2.5"),
            ("TEST_DURATION", "5m"),
            ("EMPTY", ""),
            ("PADDED_INT", " 42 "),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_integer_reads() {
        let env = table();
        assert_eq!(env.get_or("TEST_INT", 0), 42);
        assert_eq!(env.get_or("NEGATIVE_INT", 0i64), -7);
        assert_eq!(env.get_or("INVALID_INT", 100), 100);
        assert_eq!(env.get_or("MISSING", 5u32), 5);
        assert_eq!(env.get_or("BIG_UINT", 0u64), u64::MAX);
        assert_eq!(env.get_or("NEGATIVE_INT", 9u64), 9);
        assert_eq!(env.get_or("BIG_UINT", 1i64), 1);
    }

    #[test]
    fn test_empty_value_returns_default() {
        let env = table();
        assert_eq!(env.get_or("EMPTY", "fallback".to_string()), "fallback");
        assert_eq!(env.get_or("EMPTY", 3), 3);
    }

    #[test]
    fn test_whitespace_is_not_trimmed() {
        let env = table();
        assert_eq!(env.get_or("PADDED_INT", 1), 1);
        assert_eq!(env.get_or("PADDED_INT", String::new()), " 42 ");
    }

    #[test]
    fn test_bool_literal_forms() {
        for raw in ["1", "t", "T", "true", "TRUE", "True"] {
            assert_eq!(bool::parse_env(raw), Some(true), "{raw} should be true");
        }
        for raw in ["0", "f", "F", "false", "FALSE", "False"] {
            assert_eq!(bool::parse_env(raw), Some(false), "{raw} should be false");
        }
        for raw in ["yes", "no", "tRuE", "2", " true"] {
            assert_eq!(bool::parse_env(raw), None, "{raw} should be rejected");
        }
    }

    #[test]
    fn test_float_and_duration_reads() {
        let env = table();
        assert_eq!(env.get_or("TEST_FLOAT", 0.0), 2.5);
        assert_eq!(env.get_or("TEST_STRING", 1.5), 1.5);
        assert_eq!(
            env.get_or("TEST_DURATION", Duration::ZERO),
            Duration::from_secs(300)
        );
        assert_eq!(
            env.get_or("TEST_INT", Duration::from_secs(1)),
            Duration::from_secs(1)
        );
    }

    #[test]
    fn test_duration_unit_suffixes() {
        assert_eq!(Duration::parse_env("30s"), Some(Duration::from_secs(30)));
        assert_eq!(Duration::parse_env("1h"), Some(Duration::from_secs(3600)));
        assert_eq!(
            Duration::parse_env("250ms"),
            Some(Duration::from_millis(250))
        );
        assert_eq!(Duration::parse_env("1h30m"), Some(Duration::from_secs(5400)));
        assert_eq!(Duration::parse_env("soon"), None);
    }

    #[test]
    fn test_duration_fractions_and_bare_zero() {
        assert_eq!(
            Duration::parse_env("1.5h"),
            Some(Duration::from_secs(5400))
        );
        assert_eq!(
            Duration::parse_env("1.5s"),
            Some(Duration::from_millis(1500))
        );
        assert_eq!(Duration::parse_env("0"), Some(Duration::ZERO));
        assert_eq!(Duration::parse_env("-5s"), None);
    }

    #[test]
    fn test_unrecognised_type_always_defaults() {
        #[derive(Debug, PartialEq)]
        struct Opaque(u8);
        impl EnvValue for Opaque {}

        let env = table();
        assert_eq!(env.get_or("TEST_INT", Opaque(1)), Opaque(1));
        assert_eq!(env.get_or("TEST_STRING", Opaque(2)), Opaque(2));
    }

    #[test]
    fn test_nested_key_translation() {
        assert_eq!(nested_key("db.host"), "DB_HOST");
        assert_eq!(nested_key("app.server.port"), "APP_SERVER_PORT");
        assert_eq!(nested_key("plain"), "PLAIN");
        assert_eq!(nested_key("Already_Snake"), "ALREADY_SNAKE");
    }

    #[test]
    fn test_get_nested_or() {
        let env: MemoryEnv = [("DB_HOST", "myhost")].into_iter().collect();
        assert_eq!(env.get_nested_or("db.host", "localhost".to_string()), "myhost");
        assert_eq!(env.get_nested_or("db.port", 5432), 5432);
    }
}
