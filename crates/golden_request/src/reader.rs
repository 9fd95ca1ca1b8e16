//! Request file reading utilities.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{RequestError, RequestResult};
use crate::models::InfraRequest;

/// Reader for request files.
pub struct RequestReader;

impl RequestReader {
    /// Read and parse a request file.
    pub fn read_file(path: impl AsRef<Path>) -> RequestResult<InfraRequest> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(RequestError::NotFound(path.to_path_buf()));
        }

        debug!("Reading request from {:?}", path);
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse request YAML.
    pub fn parse(content: &str) -> RequestResult<InfraRequest> {
        let request: InfraRequest = serde_yaml::from_str(content)?;
        debug!(
            "Parsed request for {} ({}) with {} resources",
            request.app,
            request.env,
            request.resources.len()
        );
        Ok(request)
    }
}
