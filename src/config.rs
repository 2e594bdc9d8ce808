//! Configuration management for appcatfinder.
//!
//! All settings are loaded from `./config/appcatfinder.toml`. Defaults live
//! in the config template, embedded at compile time, so a missing file falls
//! back to the stock behavior instead of failing.

use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Configuration file path relative to the working directory.
pub const CONFIG_PATH: &str = "./config/appcatfinder.toml";

/// Default configuration file content - the only place defaults exist.
pub const DEFAULT_CONFIG: &str = include_str!("../config/appcatfinder.toml");

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read configuration file: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse configuration file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid URL in 'lookup.page_url': {0}")]
    InvalidUrl(String),

    #[error("configuration field '{0}' cannot be empty")]
    EmptyRequired(&'static str),

    #[error("'timing.poll_interval_ms' must be greater than 0")]
    ZeroPollInterval,

    #[error("configuration file already exists at {0}")]
    AlreadyExists(PathBuf),
}

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub lookup: LookupConfig,
    pub timing: TimingConfig,
    pub report: ReportConfig,
}

/// Target page contract: URL, element selectors, and browser launch knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct LookupConfig {
    pub page_url: String,
    pub search_input: String,
    pub search_button: String,
    pub category_list: String,
    pub subcategory_list: String,
    pub invalid_input_marker: String,
    #[serde(default)]
    pub chrome_path: Option<String>,
    pub bypass_proxy: bool,
}

/// Waits and delays, all bounded or deliberately fixed.
#[derive(Debug, Clone, Deserialize)]
pub struct TimingConfig {
    pub page_timeout_secs: u64,
    pub results_timeout_secs: u64,
    pub poll_interval_ms: u64,
    pub settle_delay_ms: u64,
    pub query_delay_secs: u64,
}

impl TimingConfig {
    pub fn page_timeout(&self) -> Duration {
        Duration::from_secs(self.page_timeout_secs)
    }

    pub fn results_timeout(&self) -> Duration {
        Duration::from_secs(self.results_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn query_delay(&self) -> Duration {
        Duration::from_secs(self.query_delay_secs)
    }
}

/// Label used for the query column in the output sheet. The two generations
/// of the report diverged here; both stay supported.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum QueryLabel {
    Url,
    Application,
}

impl QueryLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryLabel::Url => "URL",
            QueryLabel::Application => "Application",
        }
    }
}

/// Output styling variant knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    pub query_label: QueryLabel,
    pub color_whole_row: bool,
    pub sheet_name: String,
}

impl AppConfig {
    /// Load from [`CONFIG_PATH`], falling back to the embedded template when
    /// the file does not exist.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new(CONFIG_PATH))
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = if path.exists() {
            fs::read_to_string(path)?
        } else {
            DEFAULT_CONFIG.to_string()
        };
        Self::parse(&content)
    }

    fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Write the default template to [`CONFIG_PATH`] for editing.
    pub fn create_default_config() -> Result<PathBuf, ConfigError> {
        let path = PathBuf::from(CONFIG_PATH);
        if path.exists() {
            return Err(ConfigError::AlreadyExists(path));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, DEFAULT_CONFIG)?;
        Ok(path)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        url::Url::parse(&self.lookup.page_url)
            .map_err(|_| ConfigError::InvalidUrl(self.lookup.page_url.clone()))?;

        let required = [
            ("lookup.search_input", &self.lookup.search_input),
            ("lookup.search_button", &self.lookup.search_button),
            ("lookup.category_list", &self.lookup.category_list),
            ("lookup.subcategory_list", &self.lookup.subcategory_list),
            (
                "lookup.invalid_input_marker",
                &self.lookup.invalid_input_marker,
            ),
            ("report.sheet_name", &self.report.sheet_name),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::EmptyRequired(field));
            }
        }

        if self.timing.poll_interval_ms == 0 {
            return Err(ConfigError::ZeroPollInterval);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses_and_validates() {
        let config = AppConfig::parse(DEFAULT_CONFIG).expect("embedded template must be valid");

        assert_eq!(config.lookup.search_input, "#tbSearch");
        assert_eq!(config.lookup.category_list, "#CategoryList");
        assert_eq!(config.timing.page_timeout(), Duration::from_secs(20));
        assert_eq!(config.timing.query_delay(), Duration::from_secs(2));
        assert_eq!(config.report.query_label, QueryLabel::Url);
        assert!(config.report.color_whole_row);
    }

    #[test]
    fn test_invalid_page_url_is_rejected() {
        let content = DEFAULT_CONFIG.replace(
            "page_url = \"https://applipedia.paloaltonetworks.com/\"",
            "page_url = \"not a url\"",
        );
        let err = AppConfig::parse(&content).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl(_)));
    }

    #[test]
    fn test_empty_selector_is_rejected() {
        let content =
            DEFAULT_CONFIG.replace("search_input = \"#tbSearch\"", "search_input = \"  \"");
        let err = AppConfig::parse(&content).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::EmptyRequired("lookup.search_input")
        ));
    }

    #[test]
    fn test_zero_poll_interval_is_rejected() {
        let content = DEFAULT_CONFIG.replace("poll_interval_ms = 250", "poll_interval_ms = 0");
        let err = AppConfig::parse(&content).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroPollInterval));
    }

    #[test]
    fn test_query_label_variants_deserialize() {
        let content =
            DEFAULT_CONFIG.replace("query_label = \"url\"", "query_label = \"application\"");
        let config = AppConfig::parse(&content).unwrap();
        assert_eq!(config.report.query_label, QueryLabel::Application);
        assert_eq!(config.report.query_label.as_str(), "Application");
    }
}
