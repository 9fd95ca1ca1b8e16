//! Reference registry for cross-resource lookups.
//!
//! Translators register a handle for every data resource they render. Role
//! translators appearing later in the same request resolve names against it.

use std::collections::HashMap;

use tracing::debug;

use golden_request::ResourceKind;

use crate::error::{IacError, IacResult};

/// References to a rendered S3 bucket module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketHandle {
    pub module_name: String,
    pub bucket_arn: String,
}

/// References to a rendered RDS instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseHandle {
    pub resource_name: String,
    pub db_arn: String,
    /// ARN of the master-user secret RDS generates for the instance.
    pub secret_arn: String,
}

/// References to a rendered Secrets Manager secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretHandle {
    pub resource_name: String,
    pub secret_arn: String,
}

/// References to a rendered kind cluster module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterHandle {
    pub module_name: String,
    pub cluster_name: String,
    pub oidc_issuer: String,
    pub cluster_arn: String,
}

/// Name-keyed handles, scoped per resource kind.
#[derive(Debug, Default)]
pub struct ReferenceRegistry {
    buckets: HashMap<String, BucketHandle>,
    databases: HashMap<String, DatabaseHandle>,
    secrets: HashMap<String, SecretHandle>,
    clusters: HashMap<String, ClusterHandle>,
}

impl ReferenceRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_bucket(&mut self, name: &str, handle: BucketHandle) -> IacResult<()> {
        insert_once(&mut self.buckets, ResourceKind::Bucket, name, handle)
    }

    pub fn register_database(&mut self, name: &str, handle: DatabaseHandle) -> IacResult<()> {
        insert_once(&mut self.databases, ResourceKind::Database, name, handle)
    }

    pub fn register_secret(&mut self, name: &str, handle: SecretHandle) -> IacResult<()> {
        insert_once(&mut self.secrets, ResourceKind::Secret, name, handle)
    }

    pub fn register_cluster(&mut self, name: &str, handle: ClusterHandle) -> IacResult<()> {
        insert_once(&mut self.clusters, ResourceKind::Cluster, name, handle)
    }

    pub fn bucket(&self, name: &str) -> Option<&BucketHandle> {
        self.buckets.get(name)
    }

    pub fn database(&self, name: &str) -> Option<&DatabaseHandle> {
        self.databases.get(name)
    }

    pub fn secret(&self, name: &str) -> Option<&SecretHandle> {
        self.secrets.get(name)
    }

    pub fn cluster(&self, name: &str) -> Option<&ClusterHandle> {
        self.clusters.get(name)
    }

    /// Number of handles registered for a kind.
    pub fn count(&self, kind: ResourceKind) -> usize {
        match kind {
            ResourceKind::Bucket => self.buckets.len(),
            ResourceKind::Database => self.databases.len(),
            ResourceKind::Secret => self.secrets.len(),
            ResourceKind::Cluster => self.clusters.len(),
            ResourceKind::Role => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
            && self.databases.is_empty()
            && self.secrets.is_empty()
            && self.clusters.is_empty()
    }
}

fn insert_once<H>(
    map: &mut HashMap<String, H>,
    kind: ResourceKind,
    name: &str,
    handle: H,
) -> IacResult<()> {
    if map.contains_key(name) {
        return Err(IacError::DuplicateResource {
            kind: kind.to_string(),
            name: name.to_string(),
        });
    }

    debug!("Registering {} handle: {}", kind, name);
    map.insert(name.to_string(), handle);
    Ok(())
}
