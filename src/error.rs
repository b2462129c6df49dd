use std::path::PathBuf;
use thiserror::Error;

/// Configuration and scan error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("failed to read {path}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration in {path}: {source}")]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid color value '{value}' for token '{key}'")]
    InvalidColor { key: String, value: String },

    #[error("invalid glob pattern '{pattern}'")]
    InvalidGlob {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("content glob pattern must be a non-empty string")]
    EmptyGlob,

    #[error("merged configuration declares no content globs")]
    NoContentGlobs,

    #[error("scan cancelled")]
    Cancelled,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
