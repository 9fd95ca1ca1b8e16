//! Error types for the renderer.

use thiserror::Error;

/// Result type alias for rendering operations.
pub type IacResult<T> = Result<T, IacError>;

/// Errors that can occur while rendering a request.
#[derive(Error, Debug)]
pub enum IacError {
    #[error("Unsupported database size '{size}' for environment {env}")]
    UnsupportedSize { size: String, env: String },

    #[error("Duplicate {kind} name: {name}")]
    DuplicateResource { kind: String, name: String },

    #[error("SSM parameter key collision on '{key}': '{first}' and '{second}'")]
    ParameterCollision {
        key: String,
        first: String,
        second: String,
    },

    #[error("Invalid renderer configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Request error: {0}")]
    Request(#[from] golden_request::RequestError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
