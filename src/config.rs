// Configuration: where the book log lives and how it logs.
//
// Read from `<config dir>/booklog/config.json` when that file exists; every
// field is optional and falls back to its default. No command-line flags or
// environment variables configure the app; the default locations come from
// `dirs`, which resolves the platform's data and config directories.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::cancel::DEFAULT_TOKEN;

const APP_DIR: &str = "booklog";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// SQLite database file holding the `books` table.
    pub database_path: PathBuf,
    /// Where log lines go; stderr when `None` or when it cannot be opened.
    pub log_file: Option<PathBuf>,
    /// `tracing_subscriber::EnvFilter` directive, e.g. `"debug"`.
    pub log_level: String,
    /// Answer that cancels the running handler.
    pub cancel_token: String,
}

/// `<data dir>/booklog`, or the working directory on platforms without one.
fn data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("."))
}

impl Default for Config {
    fn default() -> Self {
        let dir = data_dir();
        Config {
            database_path: dir.join("books.db"),
            log_file: Some(dir.join("booklog.log")),
            log_level: "warn".to_string(),
            cancel_token: DEFAULT_TOKEN.to_string(),
        }
    }
}

impl Config {
    /// Location of the optional config file.
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.json"))
    }

    /// Load the config file if there is one, defaults otherwise.
    pub fn load() -> Result<Self> {
        match Self::path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_json(&data).with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_json(data: &str) -> Result<Self> {
        let mut config: Config = serde_json::from_str(data).context("Parsing config json")?;
        if config.cancel_token.trim().is_empty() {
            config.cancel_token = DEFAULT_TOKEN.to_string();
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        assert_eq!(Config::from_json("{}").unwrap(), Config::default());
    }

    #[test]
    fn fields_override_defaults() {
        let config = Config::from_json(
            r#"{ "database_path": "/tmp/mine.db", "log_level": "debug", "cancel_token": "x" }"#,
        )
        .unwrap();
        assert_eq!(config.database_path, PathBuf::from("/tmp/mine.db"));
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.cancel_token, "x");
        assert_eq!(config.log_file, Config::default().log_file);
    }

    #[test]
    fn blank_cancel_token_falls_back() {
        let config = Config::from_json(r#"{ "cancel_token": " " }"#).unwrap();
        assert_eq!(config.cancel_token, DEFAULT_TOKEN);
    }

    #[test]
    fn reads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "log_file": null }"#).unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.log_file, None);
    }

    #[test]
    fn invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();

        let err = Config::from_file(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Invalid config file"));
    }
}
