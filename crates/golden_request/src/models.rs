//! Data models for infrastructure requests.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::error::RequestError;

/// Deployment tier. Every environment-sensitive setting keys off this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Dev,
    Stage,
    Prod,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Dev => "dev",
            Environment::Stage => "stage",
            Environment::Prod => "prod",
        }
    }

    pub fn all() -> [Self; 3] {
        [Environment::Dev, Environment::Stage, Environment::Prod]
    }

    pub fn is_prod(&self) -> bool {
        matches!(self, Environment::Prod)
    }
}

impl FromStr for Environment {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dev" => Ok(Environment::Dev),
            "stage" => Ok(Environment::Stage),
            "prod" => Ok(Environment::Prod),
            other => Err(RequestError::UnknownEnvironment(other.to_string())),
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Root of a parsed request file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InfraRequest {
    pub app: String,
    pub env: Environment,
    pub namespace: String,
    /// Declarations in file order. Order matters: roles only see resources declared above them.
    pub resources: Vec<ResourceDeclaration>,
}

impl InfraRequest {
    /// Iterate declarations of a known kind.
    pub fn of_kind(&self, kind: ResourceKind) -> impl Iterator<Item = &ResourceDeclaration> {
        self.resources.iter().filter(move |r| r.kind() == Some(kind))
    }
}

/// The resource kinds the renderer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Bucket,
    Database,
    Secret,
    Role,
    Cluster,
}

impl ResourceKind {
    /// Wire name used in the `type` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Bucket => "s3_bucket",
            ResourceKind::Database => "rds_database",
            ResourceKind::Secret => "secret",
            ResourceKind::Role => "irsa_role",
            ResourceKind::Cluster => "kind_cluster",
        }
    }

    pub fn from_type(s: &str) -> Option<Self> {
        match s {
            "s3_bucket" => Some(ResourceKind::Bucket),
            "rds_database" => Some(ResourceKind::Database),
            "secret" => Some(ResourceKind::Secret),
            "irsa_role" => Some(ResourceKind::Role),
            "kind_cluster" => Some(ResourceKind::Cluster),
            _ => None,
        }
    }

    /// Kinds whose names must be unique and that roles or summaries look up by name.
    pub fn is_data(&self) -> bool {
        !matches!(self, ResourceKind::Role)
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entry of the request's `resources` list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Value")]
pub enum ResourceDeclaration {
    Bucket(BucketSpec),
    Database(DatabaseSpec),
    Secret(SecretSpec),
    Role(RoleSpec),
    Cluster(ClusterSpec),
    /// A `type` the renderer does not know. Skipped with a warning.
    Unknown { kind: String, name: Option<String> },
}

impl ResourceDeclaration {
    pub fn kind(&self) -> Option<ResourceKind> {
        match self {
            ResourceDeclaration::Bucket(_) => Some(ResourceKind::Bucket),
            ResourceDeclaration::Database(_) => Some(ResourceKind::Database),
            ResourceDeclaration::Secret(_) => Some(ResourceKind::Secret),
            ResourceDeclaration::Role(_) => Some(ResourceKind::Role),
            ResourceDeclaration::Cluster(_) => Some(ResourceKind::Cluster),
            ResourceDeclaration::Unknown { .. } => None,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            ResourceDeclaration::Bucket(s) => Some(&s.name),
            ResourceDeclaration::Database(s) => Some(&s.name),
            ResourceDeclaration::Secret(s) => Some(&s.name),
            ResourceDeclaration::Role(s) => Some(&s.name),
            ResourceDeclaration::Cluster(s) => Some(&s.name),
            ResourceDeclaration::Unknown { name, .. } => name.as_deref(),
        }
    }

    /// The raw `type` string as written in the request.
    pub fn type_name(&self) -> &str {
        match self {
            ResourceDeclaration::Unknown { kind, .. } => kind,
            other => other.kind().map(|k| k.as_str()).unwrap_or_default(),
        }
    }
}

impl TryFrom<Value> for ResourceDeclaration {
    type Error = RequestError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let type_name = value
            .get("type")
            .map(type_text)
            .ok_or_else(|| RequestError::InvalidResource {
                kind: "resource".to_string(),
                message: "missing field `type`".to_string(),
            })?;

        let Some(kind) = ResourceKind::from_type(&type_name) else {
            let name = value.get("name").and_then(Value::as_str).map(String::from);
            return Ok(ResourceDeclaration::Unknown {
                kind: type_name,
                name,
            });
        };

        let invalid = |e: serde_yaml::Error| RequestError::InvalidResource {
            kind: type_name.clone(),
            message: e.to_string(),
        };

        let declaration = match kind {
            ResourceKind::Bucket => {
                ResourceDeclaration::Bucket(serde_yaml::from_value(value).map_err(invalid)?)
            }
            ResourceKind::Database => {
                ResourceDeclaration::Database(serde_yaml::from_value(value).map_err(invalid)?)
            }
            ResourceKind::Secret => {
                ResourceDeclaration::Secret(serde_yaml::from_value(value).map_err(invalid)?)
            }
            ResourceKind::Role => {
                ResourceDeclaration::Role(serde_yaml::from_value(value).map_err(invalid)?)
            }
            ResourceKind::Cluster => {
                ResourceDeclaration::Cluster(serde_yaml::from_value(value).map_err(invalid)?)
            }
        };

        Ok(declaration)
    }
}

/// Text form of a `type` value. Non-string scalars never match a known kind.
fn type_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_else(|_| format!("{:?}", other)),
    }
}

/// `s3_bucket` declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketSpec {
    pub name: String,
    #[serde(default = "default_purpose")]
    pub purpose: String,
    #[serde(default)]
    pub public_access: bool,
}

/// `rds_database` declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseSpec {
    pub name: String,
    #[serde(default = "default_engine")]
    pub engine: String,
    /// Kept as free text; unsupported sizes fail at render time.
    #[serde(default = "default_size")]
    pub size: String,
}

/// `secret` declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecretSpec {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// `irsa_role` declaration: a workload identity and the resources it may reach.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleSpec {
    pub name: String,
    #[serde(default)]
    pub s3_buckets: Vec<String>,
    #[serde(default)]
    pub rds_databases: Vec<String>,
    #[serde(default)]
    pub secrets: Vec<String>,
}

impl RoleSpec {
    /// All referenced names paired with the kind they must resolve against.
    pub fn references(&self) -> impl Iterator<Item = (ResourceKind, &str)> {
        let buckets = self.s3_buckets.iter().map(|n| (ResourceKind::Bucket, n.as_str()));
        let databases = self.rds_databases.iter().map(|n| (ResourceKind::Database, n.as_str()));
        let secrets = self.secrets.iter().map(|n| (ResourceKind::Secret, n.as_str()));
        buckets.chain(databases).chain(secrets)
    }
}

/// `kind_cluster` declaration: a single-node kind cluster on EC2.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterSpec {
    pub name: String,
    #[serde(default = "default_instance_type")]
    pub instance_type: String,
    pub key_pair: String,
}

pub const DEFAULT_CLUSTER_INSTANCE_TYPE: &str = "t3.medium";

fn default_purpose() -> String {
    "uploads".to_string()
}

fn default_engine() -> String {
    "postgres".to_string()
}

fn default_size() -> String {
    "small".to_string()
}

fn default_instance_type() -> String {
    DEFAULT_CLUSTER_INSTANCE_TYPE.to_string()
}
