//! Error types for the request module.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for request operations.
pub type RequestResult<T> = Result<T, RequestError>;

/// Errors that can occur while loading an infrastructure request.
#[derive(Error, Debug)]
pub enum RequestError {
    #[error("Request file not found: {0}")]
    NotFound(PathBuf),

    #[error("Unknown environment: {0} (expected dev, stage or prod)")]
    UnknownEnvironment(String),

    #[error("Invalid {kind} resource: {message}")]
    InvalidResource { kind: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
