//! Runtime configuration from environment variables.
//!
//! | Variable              | Default                   |
//! |-----------------------|---------------------------|
//! | `STROKECAST_API_URL`  | `http://localhost:5000`   |
//! | `STROKECAST_PAGE`     | unset (open the dashboard)|
//! | `STROKECAST_LOG_MODE` | `auto` (`file`, `stdout`) |
//! | `STROKECAST_LOG_FILE` | `strokecast.log`          |

use std::path::PathBuf;

use crate::adapters::DEFAULT_BASE_URL;
use crate::application::PageConfig;
use crate::{Result, StrokecastError};

pub const API_URL_ENV: &str = "STROKECAST_API_URL";
pub const PAGE_ENV: &str = "STROKECAST_PAGE";
pub const LOG_MODE_ENV: &str = "STROKECAST_LOG_MODE";
pub const LOG_FILE_ENV: &str = "STROKECAST_LOG_FILE";

const DEFAULT_LOG_FILE: &str = "strokecast.log";

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    /// File when attached to a terminal, stdout otherwise
    Auto,
    File,
    Stdout,
}

impl LogMode {
    /// Resolve `Auto` against whether stdout is a terminal.
    #[must_use]
    pub fn use_file(self, interactive: bool) -> bool {
        match self {
            Self::File => true,
            Self::Stdout => false,
            Self::Auto => interactive,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Backend origin, without trailing slash
    pub api_url: String,
    /// Page opened at startup instead of the dashboard
    pub start_page: Option<&'static PageConfig>,
    pub log_mode: LogMode,
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_BASE_URL.to_string(),
            start_page: None,
            log_mode: LogMode::Auto,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl Config {
    /// Read configuration from the process environment.
    ///
    /// # Errors
    /// Returns `StrokecastError::Config` for malformed values.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup` (empty values count as unset).
    ///
    /// # Errors
    /// Returns `StrokecastError::Config` for malformed values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(url) = get(API_URL_ENV) {
            let url = url.trim().trim_end_matches('/');
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(StrokecastError::Config(format!(
                    "{API_URL_ENV} must be an http(s) URL, got '{url}'"
                )));
            }
            config.api_url = url.to_string();
        }

        if let Some(slug) = get(PAGE_ENV) {
            config.start_page = Some(PageConfig::from_slug(&slug)?);
        }

        if let Some(mode) = get(LOG_MODE_ENV) {
            config.log_mode = match mode.trim().to_ascii_lowercase().as_str() {
                "auto" => LogMode::Auto,
                "file" => LogMode::File,
                "stdout" => LogMode::Stdout,
                other => {
                    return Err(StrokecastError::Config(format!(
                        "{LOG_MODE_ENV} must be auto, file or stdout, got '{other}'"
                    )))
                }
            };
        }

        if let Some(path) = get(LOG_FILE_ENV) {
            config.log_file = PathBuf::from(path);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.api_url, "http://localhost:5000");
        assert!(config.start_page.is_none());
        assert_eq!(config.log_mode, LogMode::Auto);
        assert_eq!(config.log_file, PathBuf::from("strokecast.log"));
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            (API_URL_ENV, "http://10.0.0.5:5000/"),
            (PAGE_ENV, "xgboost"),
            (LOG_MODE_ENV, "Stdout"),
            (LOG_FILE_ENV, "/tmp/sc.log"),
        ]))
        .unwrap();
        assert_eq!(config.api_url, "http://10.0.0.5:5000");
        assert_eq!(config.start_page.map(|p| p.slug), Some("xgboost"));
        assert_eq!(config.log_mode, LogMode::Stdout);
        assert_eq!(config.log_file, PathBuf::from("/tmp/sc.log"));
    }

    #[test]
    fn test_blank_values_ignored() {
        let config = Config::from_lookup(lookup(&[(API_URL_ENV, "  "), (PAGE_ENV, "")])).unwrap();
        assert_eq!(config.api_url, DEFAULT_BASE_URL);
        assert!(config.start_page.is_none());
    }

    #[test]
    fn test_rejects_malformed_values() {
        assert!(Config::from_lookup(lookup(&[(API_URL_ENV, "localhost:5000")])).is_err());
        assert!(Config::from_lookup(lookup(&[(PAGE_ENV, "svm")])).is_err());
        assert!(Config::from_lookup(lookup(&[(LOG_MODE_ENV, "syslog")])).is_err());
    }

    #[test]
    fn test_log_mode_resolution() {
        assert!(LogMode::Auto.use_file(true));
        assert!(!LogMode::Auto.use_file(false));
        assert!(LogMode::File.use_file(false));
        assert!(!LogMode::Stdout.use_file(true));
    }
}
