//! Runtime configuration: credentials, endpoints, and article counts.
//!
//! A [`Config`] is built once at startup from an optional YAML file, then
//! overlaid with command-line/environment values, validated, and handed to
//! the components that need it. Nothing reads configuration from global state.
//!
//! # Example config.yaml
//!
//! ```yaml
//! fact_check_api_key: "..."
//! news_api_key: "..."
//! gemini_api_key: "..."
//! gemini_model: gemini-1.5-flash
//! max_news_articles: 3
//! max_releases: 2
//! ```

use crate::cli::Cli;
use crate::error::ConfigError;
use serde::Deserialize;
use std::fmt;
use tokio::fs;
use tracing::{info, instrument};

pub const DEFAULT_FACT_CHECK_URL: &str =
    "https://factchecktools.googleapis.com/v1alpha1/claims:search";
pub const DEFAULT_NEWS_SEARCH_URL: &str = "https://newsapi.org/v2/everything";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_WHO_RELEASES_URL: &str = "https://www.who.int/news-room/releases";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub fact_check_api_key: String,
    pub news_api_key: String,
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub fact_check_url: String,
    pub news_search_url: String,
    pub gemini_base_url: String,
    pub who_releases_url: String,
    /// Sent with WHO requests, which reject clients without a browser-like agent.
    pub user_agent: String,
    pub max_news_articles: usize,
    pub max_releases: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fact_check_api_key: String::new(),
            news_api_key: String::new(),
            gemini_api_key: String::new(),
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            fact_check_url: DEFAULT_FACT_CHECK_URL.to_string(),
            news_search_url: DEFAULT_NEWS_SEARCH_URL.to_string(),
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            who_releases_url: DEFAULT_WHO_RELEASES_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_news_articles: 3,
            max_releases: 2,
        }
    }
}

// Keys stay out of logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("gemini_model", &self.gemini_model)
            .field("fact_check_url", &self.fact_check_url)
            .field("news_search_url", &self.news_search_url)
            .field("gemini_base_url", &self.gemini_base_url)
            .field("who_releases_url", &self.who_releases_url)
            .field("user_agent", &self.user_agent)
            .field("max_news_articles", &self.max_news_articles)
            .field("max_releases", &self.max_releases)
            .finish_non_exhaustive()
    }
}

impl Config {
    /// Parse a config from YAML text. Missing fields take their defaults.
    pub fn from_yaml(path: &str, yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })
    }

    /// Load the config file if one was given, otherwise start from defaults.
    #[instrument(level = "info")]
    pub async fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let yaml = fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_string(),
                source,
            })?;
        let config = Self::from_yaml(path, &yaml)?;
        info!(path, "Loaded configuration file");
        Ok(config)
    }

    /// Overlay values given on the command line or through the environment.
    pub fn apply_cli(mut self, cli: &Cli) -> Self {
        if let Some(key) = &cli.fact_check_api_key {
            self.fact_check_api_key = key.clone();
        }
        if let Some(key) = &cli.news_api_key {
            self.news_api_key = key.clone();
        }
        if let Some(key) = &cli.gemini_api_key {
            self.gemini_api_key = key.clone();
        }
        if let Some(model) = &cli.gemini_model {
            self.gemini_model = model.clone();
        }
        if let Some(n) = cli.max_news_articles {
            self.max_news_articles = n;
        }
        if let Some(n) = cli.max_releases {
            self.max_releases = n;
        }
        self
    }

    /// All three credentials are required before the first query.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fact_check_api_key.trim().is_empty() {
            return Err(ConfigError::MissingKey("fact_check_api_key"));
        }
        if self.news_api_key.trim().is_empty() {
            return Err(ConfigError::MissingKey("news_api_key"));
        }
        if self.gemini_api_key.trim().is_empty() {
            return Err(ConfigError::MissingKey("gemini_api_key"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn keyed() -> Config {
        Config {
            fact_check_api_key: "fc".to_string(),
            news_api_key: "news".to_string(),
            gemini_api_key: "gem".to_string(),
            ..Config::default()
        }
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.max_news_articles, 3);
        assert_eq!(config.max_releases, 2);
        assert_eq!(config.gemini_model, "gemini-1.5-flash");
        assert_eq!(config.who_releases_url, DEFAULT_WHO_RELEASES_URL);
    }

    #[test]
    fn test_from_yaml_partial() {
        let yaml = "news_api_key: abc\nmax_releases: 4\n";
        let config = Config::from_yaml("config.yaml", yaml).unwrap();
        assert_eq!(config.news_api_key, "abc");
        assert_eq!(config.max_releases, 4);
        assert_eq!(config.max_news_articles, 3);
        assert_eq!(config.news_search_url, DEFAULT_NEWS_SEARCH_URL);
    }

    #[test]
    fn test_from_yaml_rejects_bad_types() {
        let err = Config::from_yaml("config.yaml", "max_releases: lots\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_cli_overrides_file() {
        let cli = Cli::parse_from([
            "awful_fact_check",
            "--gemini-api-key",
            "from-cli",
            "--gemini-model",
            "gemini-2.0-flash",
            "--max-releases",
            "1",
        ]);
        let config = keyed().apply_cli(&cli);
        assert_eq!(config.gemini_api_key, "from-cli");
        assert_eq!(config.gemini_model, "gemini-2.0-flash");
        assert_eq!(config.max_releases, 1);
    }

    #[test]
    fn test_validate() {
        assert!(keyed().validate().is_ok());

        let config = Config {
            news_api_key: "  ".to_string(),
            ..keyed()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingKey("news_api_key"))
        ));
    }

    #[test]
    fn test_debug_hides_keys() {
        let rendered = format!("{:?}", keyed());
        assert!(!rendered.contains("gem\""));
        assert!(!rendered.contains("fact_check_api_key"));
    }

    #[tokio::test]
    async fn test_load_without_path_uses_defaults() {
        let config = Config::load(None).await.unwrap();
        assert_eq!(config.max_news_articles, 3);
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let err = Config::load(Some("/definitely/not/here.yaml")).await.unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
