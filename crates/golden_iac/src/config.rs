//! Renderer configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{IacError, IacResult};

/// What to do when two SSM parameter paths sanitize to the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// Keep the later parameter and record the collision in the report.
    #[default]
    LastWriteWins,
    /// Abort rendering.
    Error,
}

/// Terraform module sources referenced by generated module blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModuleSources {
    pub s3_secure: String,
    pub irsa_role: String,
    pub kind_cluster: String,
}

impl Default for ModuleSources {
    fn default() -> Self {
        Self {
            s3_secure: "../modules/s3-secure".to_string(),
            irsa_role: "../modules/iam/irsa-role".to_string(),
            kind_cluster: "./modules/ec2-kind-cluster".to_string(),
        }
    }
}

/// Renderer configuration. Every field has a default, so an empty file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub modules: ModuleSources,
    /// Value of the `ManagedBy` tag on every tagged resource.
    pub managed_by: String,
    pub parameter_collisions: CollisionPolicy,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            modules: ModuleSources::default(),
            managed_by: "golden-platform".to_string(),
            parameter_collisions: CollisionPolicy::default(),
        }
    }
}

impl RenderConfig {
    /// Load configuration from a YAML or TOML file, chosen by extension.
    pub fn from_file(path: &Path) -> IacResult<Self> {
        debug!("Loading renderer config from {:?}", path);
        let content = fs::read_to_string(path)?;

        let config: RenderConfig = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            other => {
                return Err(IacError::InvalidConfiguration(format!(
                    "unsupported config format {:?} for {}",
                    other.unwrap_or(""),
                    path.display()
                )))
            }
        };

        config.validate()?;
        Ok(config)
    }

    pub fn with_collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.parameter_collisions = policy;
        self
    }

    fn validate(&self) -> IacResult<()> {
        if self.managed_by.trim().is_empty() {
            return Err(IacError::InvalidConfiguration("managed_by cannot be empty".to_string()));
        }

        let sources = [
            ("s3_secure", &self.modules.s3_secure),
            ("irsa_role", &self.modules.irsa_role),
            ("kind_cluster", &self.modules.kind_cluster),
        ];
        for (name, source) in sources {
            if source.trim().is_empty() {
                return Err(IacError::InvalidConfiguration(format!(
                    "module source '{}' cannot be empty",
                    name
                )));
            }
        }

        Ok(())
    }
}
