//! Terraform JSON document model.
//!
//! The document mirrors the `*.tf.json` layout: top-level `module`, `output`
//! and `resource` maps, with `resource` keyed by Terraform resource type.
//! All maps preserve insertion order so rendering the same request twice
//! produces byte-identical JSON.

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, warn};

use golden_request::Environment;

use crate::config::CollisionPolicy;
use crate::error::{IacError, IacResult};
use crate::sanitize::sanitize_name;

pub const SSM_PARAMETER: &str = "aws_ssm_parameter";
pub const DB_INSTANCE: &str = "aws_db_instance";
pub const SECRETS_MANAGER_SECRET: &str = "aws_secretsmanager_secret";
pub const DEFAULT_VPC: &str = "aws_default_vpc";
pub const DEFAULT_SUBNET: &str = "aws_default_subnet";

/// Resource tags. Absent fields are omitted from the output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Tags {
    #[serde(rename = "Name", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "App", skip_serializing_if = "Option::is_none")]
    pub app: Option<String>,
    #[serde(rename = "Env", skip_serializing_if = "Option::is_none")]
    pub env: Option<Environment>,
    #[serde(rename = "ManagedBy", skip_serializing_if = "Option::is_none")]
    pub managed_by: Option<String>,
}

impl Tags {
    pub fn new(app: &str, env: Environment, managed_by: &str) -> Self {
        Self {
            name: None,
            app: Some(app.to_string()),
            env: Some(env),
            managed_by: Some(managed_by.to_string()),
        }
    }

    pub fn managed_by(managed_by: &str) -> Self {
        Self {
            managed_by: Some(managed_by.to_string()),
            ..Self::default()
        }
    }

    pub fn named(name: impl Into<String>, app: &str, env: Environment) -> Self {
        Self {
            name: Some(name.into()),
            app: Some(app.to_string()),
            env: Some(env),
            managed_by: None,
        }
    }
}

/// A `module` block.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ModuleBlock {
    Bucket(BucketModule),
    Role(RoleModule),
    Cluster(ClusterModule),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketModule {
    pub source: String,
    pub app: String,
    pub env: Environment,
    pub name: String,
    pub versioning: bool,
    pub lifecycle_days: u32,
    pub block_public_access: bool,
    pub server_access_logs: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleModule {
    pub source: String,
    pub app: String,
    pub env: Environment,
    pub namespace: String,
    pub oidc_provider_arn: String,
    pub oidc_provider_url: String,
    pub grants: RoleGrants,
}

/// ARN references a role is allowed to use, by grant category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RoleGrants {
    pub s3: Vec<String>,
    /// Generated master-user secrets of databases. Database access is
    /// granted through the credential, not the data plane.
    pub rds_secrets: Vec<String>,
    pub secrets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterModule {
    pub source: String,
    pub app: String,
    pub env: Environment,
    pub instance_type: String,
    pub key_pair_name: String,
    pub private_key_path: String,
    pub vpc_id: String,
    pub subnet_id: String,
}

/// A block under `resource.<type>`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResourceBlock {
    SsmParameter(SsmParameter),
    DbInstance(DbInstance),
    Secret(SecretsManagerSecret),
    DefaultVpc(DefaultVpc),
    DefaultSubnet(DefaultSubnet),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SsmParameter {
    pub name: String,
    #[serde(rename = "type")]
    pub parameter_type: String,
    pub value: String,
    pub overwrite: bool,
    pub tags: Tags,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DbInstance {
    pub identifier: String,
    pub engine: String,
    pub engine_version: String,
    pub instance_class: String,
    pub allocated_storage: u32,
    pub storage_type: String,
    pub storage_encrypted: bool,
    pub db_name: String,
    pub username: String,
    /// Password is generated and stored in Secrets Manager by RDS.
    pub manage_master_user_password: bool,
    pub multi_az: bool,
    pub backup_retention_period: u32,
    pub backup_window: String,
    pub maintenance_window: String,
    pub deletion_protection: bool,
    pub skip_final_snapshot: bool,
    pub tags: Tags,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SecretsManagerSecret {
    pub name: String,
    pub description: String,
    pub tags: Tags,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefaultVpc {
    pub enable_dns_hostnames: bool,
    pub enable_dns_support: bool,
    pub tags: Tags,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefaultSubnet {
    pub availability_zone: String,
    pub tags: Tags,
}

/// An `output` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputValue {
    pub value: String,
}

/// Terraform interpolation of `<address>.<attribute>`.
pub fn interpolate(address: &str, attribute: &str) -> String {
    format!("${{{}.{}}}", address, attribute)
}

/// The rendered Terraform JSON configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TerraformDocument {
    pub module: IndexMap<String, ModuleBlock>,
    pub output: IndexMap<String, OutputValue>,
    pub resource: IndexMap<String, IndexMap<String, ResourceBlock>>,
}

impl TerraformDocument {
    /// Create an empty document. `aws_ssm_parameter` is always present.
    pub fn new() -> Self {
        let mut resource = IndexMap::new();
        resource.insert(SSM_PARAMETER.to_string(), IndexMap::new());
        Self {
            module: IndexMap::new(),
            output: IndexMap::new(),
            resource,
        }
    }

    /// Insert a module block, returning the block it replaced.
    pub fn insert_module(
        &mut self,
        key: impl Into<String>,
        block: ModuleBlock,
    ) -> Option<ModuleBlock> {
        let key = key.into();
        debug!("Adding module {}", key);
        self.module.insert(key, block)
    }

    pub fn insert_output(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.output.insert(key.into(), OutputValue { value: value.into() });
    }

    /// Insert a resource block under `resource.<resource_type>.<key>`.
    pub fn insert_resource(
        &mut self,
        resource_type: &str,
        key: impl Into<String>,
        block: ResourceBlock,
    ) -> Option<ResourceBlock> {
        let key = key.into();
        debug!("Adding resource {}.{}", resource_type, key);
        self.resource
            .entry(resource_type.to_string())
            .or_default()
            .insert(key, block)
    }

    /// Publish a value as an SSM `String` parameter at `path`.
    ///
    /// The block key is the sanitized path. Returns `true` when a parameter
    /// with a different path already held that key and was overwritten.
    pub fn insert_parameter(
        &mut self,
        path: &str,
        value: impl Into<String>,
        managed_by: &str,
        policy: CollisionPolicy,
    ) -> IacResult<bool> {
        let key = sanitize_name(path);
        let parameters = self.resource.entry(SSM_PARAMETER.to_string()).or_default();

        let collided = match parameters.get(&key) {
            Some(ResourceBlock::SsmParameter(existing)) if existing.name != path => {
                if policy == CollisionPolicy::Error {
                    return Err(IacError::ParameterCollision {
                        key,
                        first: existing.name.clone(),
                        second: path.to_string(),
                    });
                }
                warn!("SSM parameter '{}' overwrites '{}' (key {})", path, existing.name, key);
                true
            }
            _ => false,
        };

        parameters.insert(
            key,
            ResourceBlock::SsmParameter(SsmParameter {
                name: path.to_string(),
                parameter_type: "String".to_string(),
                value: value.into(),
                overwrite: true,
                tags: Tags::managed_by(managed_by),
            }),
        );

        Ok(collided)
    }

    pub fn module(&self, key: &str) -> Option<&ModuleBlock> {
        self.module.get(key)
    }

    pub fn resources(&self, resource_type: &str) -> Option<&IndexMap<String, ResourceBlock>> {
        self.resource.get(resource_type)
    }

    pub fn resource(&self, resource_type: &str, key: &str) -> Option<&ResourceBlock> {
        self.resources(resource_type).and_then(|r| r.get(key))
    }

    /// Look up a parameter by its path.
    pub fn parameter(&self, path: &str) -> Option<&SsmParameter> {
        match self.resource(SSM_PARAMETER, &sanitize_name(path)) {
            Some(ResourceBlock::SsmParameter(p)) if p.name == path => Some(p),
            _ => None,
        }
    }

    pub fn parameter_count(&self) -> usize {
        self.resources(SSM_PARAMETER).map_or(0, |p| p.len())
    }

    /// Serialize as pretty-printed JSON with two-space indentation.
    pub fn to_json_pretty(&self) -> IacResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_value(&self) -> IacResult<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl Default for TerraformDocument {
    fn default() -> Self {
        Self::new()
    }
}
