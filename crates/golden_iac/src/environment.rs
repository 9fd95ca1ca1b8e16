//! Environment context and the per-environment sizing tables.

use golden_request::{Environment, InfraRequest};

use crate::document::Tags;
use crate::error::{IacError, IacResult};

/// Cloud-side arguments supplied by the caller rather than the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloudTarget {
    pub account_id: String,
    pub region: String,
    /// OIDC identity provider ARN of the cluster.
    pub oidc_provider_arn: String,
    /// OIDC issuer host, without the `https://` scheme.
    pub oidc_provider_url: String,
}

/// Everything a translator needs to know about where it is rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentContext {
    pub app: String,
    pub env: Environment,
    pub namespace: String,
    pub account_id: String,
    pub region: String,
    pub oidc_provider_arn: String,
    pub oidc_provider_url: String,
}

impl EnvironmentContext {
    pub fn new(
        app: impl Into<String>,
        env: Environment,
        namespace: impl Into<String>,
        target: CloudTarget,
    ) -> Self {
        Self {
            app: app.into(),
            env,
            namespace: namespace.into(),
            account_id: target.account_id,
            region: target.region,
            oidc_provider_arn: target.oidc_provider_arn,
            oidc_provider_url: strip_scheme(&target.oidc_provider_url).to_string(),
        }
    }

    /// Build the context for a parsed request.
    pub fn from_request(request: &InfraRequest, target: CloudTarget) -> Self {
        Self::new(request.app.clone(), request.env, request.namespace.clone(), target)
    }

    /// `/apps/{env}/{app}/{kind}/{name}/{attribute}`
    pub fn parameter_path(&self, kind: &str, name: &str, attribute: &str) -> String {
        format!("/apps/{}/{}/{}/{}/{}", self.env, self.app, kind, name, attribute)
    }

    /// Standard `App`/`Env`/`ManagedBy` tags.
    pub fn tags(&self, managed_by: &str) -> Tags {
        Tags::new(&self.app, self.env, managed_by)
    }
}

fn strip_scheme(url: &str) -> &str {
    url.strip_prefix("https://").unwrap_or(url)
}

/// Object versioning is kept only in prod.
pub fn versioning_enabled(env: Environment) -> bool {
    env.is_prod()
}

/// Days before noncurrent objects expire.
pub fn lifecycle_days(env: Environment) -> u32 {
    match env {
        Environment::Prod => 365,
        Environment::Dev | Environment::Stage => 90,
    }
}

pub fn server_access_logs(env: Environment) -> bool {
    env.is_prod()
}

/// Allocated database storage in GiB.
pub fn allocated_storage(env: Environment) -> u32 {
    match env {
        Environment::Dev | Environment::Stage => 20,
        Environment::Prod => 100,
    }
}

pub fn backup_retention_days(env: Environment) -> u32 {
    match env {
        Environment::Dev => 1,
        Environment::Stage => 3,
        Environment::Prod => 7,
    }
}

/// Multi-AZ is off everywhere to keep cost down.
pub fn multi_az(_env: Environment) -> bool {
    false
}

/// Database sizes with a defined instance class.
pub const DATABASE_SIZES: [&str; 3] = ["small", "medium", "large"];

/// Map a database size and environment onto an RDS instance class.
pub fn instance_class(size: &str, env: Environment) -> IacResult<&'static str> {
    use Environment::*;

    let class = match (size, env) {
        ("small", Dev) | ("small", Stage) => "db.t3.micro",
        ("small", Prod) => "db.t3.small",
        ("medium", Dev) => "db.t3.micro",
        ("medium", Stage) => "db.t3.small",
        ("medium", Prod) => "db.t3.medium",
        ("large", Dev) => "db.t3.small",
        ("large", Stage) => "db.t3.medium",
        ("large", Prod) => "db.t3.large",
        _ => {
            return Err(IacError::UnsupportedSize {
                size: size.to_string(),
                env: env.to_string(),
            })
        }
    };

    Ok(class)
}

pub fn engine_version(engine: &str) -> &'static str {
    if engine == "postgres" {
        "15.4"
    } else {
        "8.0.35"
    }
}

/// EC2 instance type used for a kind cluster left at the default size.
pub fn cluster_instance_type(env: Environment) -> &'static str {
    match env {
        Environment::Dev => "t3.medium",
        Environment::Stage => "t3.large",
        Environment::Prod => "t3.xlarge",
    }
}
