//! Key/value configuration store.
//!
//! Values are flat strings keyed by dotted paths. Entries can be set
//! programmatically or loaded from a TOML file, where `[section]` tables
//! flatten to `section.key` entries. Last write wins.
//!
//! Keys the dispatcher itself recognizes:
//!
//! * `routing.base` — literal path prefix stripped from incoming paths
//!   before matching.
//!
//! Anything else (for example `views.dir`) is opaque storage for the
//! surrounding application.

use std::collections::HashMap;
use std::path::Path;

/// An error raised while loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid TOML.
    #[error("malformed configuration file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// A flat string-keyed configuration store.
#[derive(Default)]
pub struct Config {
    values: HashMap<String, String>,
}

impl Config {
    /// Create an empty store.
    pub fn new() -> Self {
        Default::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }

    /// Loads configuration from a TOML string, flattening tables to dotted
    /// keys.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let root: toml::Value = source.parse()?;
        let mut config = Self::new();
        flatten(None, &root, &mut config.values);
        Ok(config)
    }

    /// Returns the value for `key`, if set.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Sets `key` to `value`, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }
}

fn flatten(prefix: Option<&str>, value: &toml::Value, out: &mut HashMap<String, String>) {
    match value {
        toml::Value::Table(table) => {
            for (name, child) in table {
                let key = match prefix {
                    Some(prefix) => format!("{}.{}", prefix, name),
                    None => name.clone(),
                };
                flatten(Some(&key), child, out);
            }
        }
        toml::Value::String(text) => {
            if let Some(key) = prefix {
                out.insert(key.to_string(), text.clone());
            }
        }
        other => {
            if let Some(key) = prefix {
                out.insert(key.to_string(), other.to_string());
            }
        }
    }
}
