// src/error.rs
use thiserror::Error;

/// Failures of the single chat request.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid response body: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
        body: String,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("base url must start with http:// or https://, got {0:?}")]
    InvalidBaseUrl(String),

    #[error("chat path must start with '/', got {0:?}")]
    InvalidPath(String),
}
