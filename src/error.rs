//! Typed errors for upstream sources and startup configuration.
//!
//! Every network-facing operation returns [`SourceError`] instead of smuggling
//! failure text through a data field. The pipeline decides what a failure means
//! for the fallback chain; the components only report it.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SourceError>;

/// Failure while talking to one of the upstream sources or the model.
///
/// Messages are held as strings so a failure can be cloned into a report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("Could not decode response: {0}")]
    Decode(String),

    #[error("Invalid URL {url}: {message}")]
    Url { url: String, message: String },

    #[error("Model returned no text")]
    EmptyResponse,
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => SourceError::Upstream {
                status: status.as_u16(),
                message: err.to_string(),
            },
            None if err.is_decode() => SourceError::Decode(err.to_string()),
            None => SourceError::Network(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Decode(err.to_string())
    }
}

/// Failure while assembling the [`Config`](crate::config::Config) at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Missing required credential `{0}` (set it in the config file, on the command line, or in the environment)")]
    MissingKey(&'static str),
}
