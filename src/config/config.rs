use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_CONFIG_PATH: &str = "config.json";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// JSON file with users, posts and follows to start from.
    pub seed_file: Option<String>,
    /// User to log in as on startup.
    pub user: Option<String>,
    /// Filter used when `RUST_LOG` is not set.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            seed_file: None,
            user: None,
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} not found")]
    NotFound(PathBuf),
    #[error("error reading {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("error parsing {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

pub fn load_config(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Falls back to the default configuration on any error, handing the error
/// back so the caller can report it once logging is up.
pub fn load_config_or_default(path: impl AsRef<Path>) -> (Config, Option<ConfigError>) {
    match load_config(path) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_file_falls_back() {
        let (config, error) = load_config_or_default("/no/such/config.json");
        assert_eq!(config, Config::default());
        assert!(matches!(error, Some(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"user": "alice"}}"#).unwrap();
        file.flush().unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.user.as_deref(), Some("alice"));
        assert_eq!(config.seed_file, None);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_malformed_file_falls_back() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ user: ").unwrap();
        file.flush().unwrap();

        let (config, error) = load_config_or_default(file.path());
        assert_eq!(config, Config::default());
        assert!(matches!(error, Some(ConfigError::Parse { .. })));
    }
}
