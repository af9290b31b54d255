//! Configuration management module.
//!
//! This module handles loading and saving the application configuration:
//! the backend base URL, an optional access token and the log level.

mod error;

pub use error::ConfigError;

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

const FILE_NAME: &str = "config.yml";
const DEFAULT_DIRECTORY_PATH: &str = ".config/task-form";
const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";
const DEFAULT_LOG_LEVEL: &str = "info";

/// Oversees management of configuration file.
///
#[derive(Clone, Debug)]
pub struct Config {
    pub base_url: String,
    pub access_token: Option<String>,
    pub log_level: String,
    file_path: Option<PathBuf>,
}

/// Define specification for configuration file.
///
#[derive(Serialize, Deserialize)]
struct FileSpec {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

impl Config {
    /// Return a new instance holding the defaults.
    ///
    pub fn new() -> Config {
        Config {
            base_url: default_base_url(),
            access_token: None,
            log_level: default_log_level(),
            file_path: None,
        }
    }

    /// Load the configuration from the disk using the custom directory if
    /// provided. If no file exists yet, one is written with the defaults.
    ///
    pub fn load(&mut self, custom_path: Option<&str>) -> Result<(), ConfigError> {
        let dir_path = match custom_path {
            Some(path) => Path::new(path).to_path_buf(),
            None => Config::default_path()?,
        };

        if !dir_path.exists() {
            fs::create_dir_all(&dir_path).map_err(|e| ConfigError::CreateDirectoryFailed {
                path: dir_path.clone(),
                source: e,
            })?;
        }

        let file_path = dir_path.join(FILE_NAME);
        self.file_path = Some(file_path.clone());

        if !file_path.exists() {
            log::info!("Writing default configuration to {}", file_path.display());
            return self.save();
        }

        let contents = fs::read_to_string(&file_path).map_err(|e| ConfigError::LoadFailed {
            path: file_path.clone(),
            message: e.to_string(),
        })?;
        let data: FileSpec =
            serde_yaml::from_str(&contents).map_err(|e| ConfigError::LoadFailed {
                path: file_path.clone(),
                message: e.to_string(),
            })?;
        self.base_url = data.base_url;
        self.access_token = data.access_token;
        self.log_level = data.log_level;
        Ok(())
    }

    /// Serialize the configuration and write it to the disk.
    ///
    pub fn save(&self) -> Result<(), ConfigError> {
        let file_path = self.file_path.as_ref().ok_or(ConfigError::FilePathNotSet)?;
        let data = FileSpec {
            base_url: self.base_url.clone(),
            access_token: self.access_token.clone(),
            log_level: self.log_level.clone(),
        };
        let content = serde_yaml::to_string(&data)
            .map_err(|e| ConfigError::SerializationFailed(e.to_string()))?;

        let save_failed = |e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        };
        let mut file = fs::File::create(file_path).map_err(save_failed)?;
        write!(file, "{}", content).map_err(save_failed)?;
        file.flush().map_err(save_failed)?;
        Ok(())
    }

    /// Return the configured log level.
    ///
    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        self.log_level
            .parse::<LevelFilter>()
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }

    /// Returns the path buffer for the default configuration directory or
    /// an error if the home directory could not be found.
    ///
    fn default_path() -> Result<PathBuf, ConfigError> {
        match dirs::home_dir() {
            Some(home) => Ok(home.join(DEFAULT_DIRECTORY_PATH)),
            None => Err(ConfigError::HomeDirectoryNotFound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn load_writes_defaults_when_missing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested");
        let mut config = Config::new();
        config.load(path.to_str()).unwrap();

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.access_token, None);
        let written = fs::read_to_string(path.join(FILE_NAME)).unwrap();
        assert!(written.contains("base_url"));
        assert!(!written.contains("access_token"));
    }

    #[test]
    fn load_reads_existing_file() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(FILE_NAME),
            "base_url: https://tasks.example.com/api\naccess_token: abc\nlog_level: debug\n",
        )
        .unwrap();

        let mut config = Config::new();
        config.load(dir.path().to_str()).unwrap();
        assert_eq!(config.base_url, "https://tasks.example.com/api");
        assert_eq!(config.access_token.as_deref(), Some("abc"));
        assert_eq!(config.level_filter().unwrap(), LevelFilter::Debug);
    }

    #[test]
    fn load_fills_missing_keys_with_defaults() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(FILE_NAME), "access_token: abc\n").unwrap();

        let mut config = Config::new();
        config.load(dir.path().to_str()).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn load_rejects_malformed_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(FILE_NAME), "base_url: [unterminated\n").unwrap();

        let mut config = Config::new();
        assert!(matches!(
            config.load(dir.path().to_str()),
            Err(ConfigError::LoadFailed { .. })
        ));
    }

    #[test]
    fn save_without_path_fails() {
        assert!(matches!(Config::new().save(), Err(ConfigError::FilePathNotSet)));
    }

    #[test]
    fn invalid_log_level() {
        let mut config = Config::new();
        config.log_level = "loud".to_string();
        assert!(matches!(
            config.level_filter(),
            Err(ConfigError::InvalidLogLevel(_))
        ));
    }
}
