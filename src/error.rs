//! Error types for the analysis pipeline and configuration loading.
//!
//! [`AnalysisError`] is what a caller of the analysis client sees; every
//! variant leaves the session untouched so the user can simply resubmit.
//! Malformed *sentiment* values never show up here: the normalizer fails
//! soft to `unknown` / `0.0` instead.

use thiserror::Error;

/// Failure outcomes of a single topic analysis.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The topic was empty after trimming; no request was sent.
    #[error("topic must not be empty")]
    EmptyTopic,

    /// The API answered with anything other than `200 OK`.
    #[error("API error: {status}")]
    Http { status: u16 },

    /// Connection, timeout, body read or JSON decoding failure.
    #[error("request failed: {cause}")]
    Transport { cause: String },

    /// The JSON body was valid but not one of the accepted payload shapes.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl AnalysisError {
    pub fn transport(cause: impl std::fmt::Display) -> Self {
        Self::Transport {
            cause: cause.to_string(),
        }
    }
}

impl From<reqwest::Error> for AnalysisError {
    fn from(e: reqwest::Error) -> Self {
        Self::transport(e)
    }
}

/// Errors raised while assembling [`crate::config::DashboardConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid endpoint URL {endpoint:?}: {source}")]
    Endpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },

    #[error("unsupported endpoint scheme {0:?} (expected http or https)")]
    Scheme(String),

    #[error("timeout_secs must be at least 1")]
    ZeroTimeout,
}
