//! # golden_iac
//!
//! Renders infrastructure requests into Terraform JSON for the golden
//! platform.
//!
//! Each declared resource is translated in order into module and resource
//! blocks. Data resources (buckets, databases, secrets, clusters) register
//! handles in a [`ReferenceRegistry`]; an `irsa_role` declared after them
//! resolves its bucket, database and secret names into ARN grants. Every
//! produced artifact is also published as an SSM parameter under
//! `/apps/{env}/{app}/{kind}/{name}/{attribute}`.
//!
//! ## Features
//!
//! - S3 buckets through the `s3-secure` module, sized per environment
//! - RDS instances with platform-managed master credentials
//! - Secrets Manager secrets
//! - IRSA roles with resolved grants
//! - Single-node kind clusters on the default VPC
//!
//! ## Example
//!
//! ```rust,no_run
//! use golden_iac::{CloudTarget, RenderConfig, Renderer};
//! use golden_request::RequestReader;
//!
//! let request = RequestReader::read_file("request.yaml").unwrap();
//! let renderer = Renderer::new(
//!     CloudTarget {
//!         account_id: "123456789012".to_string(),
//!         region: "us-east-1".to_string(),
//!         oidc_provider_arn: "arn:aws:iam::123456789012:oidc-provider/oidc.eks.amazonaws.com/id/ABC".to_string(),
//!         oidc_provider_url: "oidc.eks.amazonaws.com/id/ABC".to_string(),
//!     },
//!     RenderConfig::default(),
//! );
//!
//! let output = renderer.render(&request).unwrap();
//! std::fs::write("main.tf.json", output.document.to_json_pretty().unwrap()).unwrap();
//! println!("Resources: {}", output.report.summary());
//! ```

pub mod config;
pub mod document;
pub mod environment;
pub mod error;
pub mod registry;
pub mod renderer;
pub mod report;
pub mod sanitize;
pub mod translate;

pub use config::{CollisionPolicy, ModuleSources, RenderConfig};
pub use document::{ModuleBlock, ResourceBlock, RoleGrants, TerraformDocument};
pub use environment::{CloudTarget, EnvironmentContext};
pub use error::{IacError, IacResult};
pub use registry::{BucketHandle, ClusterHandle, DatabaseHandle, ReferenceRegistry, SecretHandle};
pub use renderer::{RenderOutput, Renderer};
pub use report::{RenderReport, UnresolvedReference};
pub use sanitize::sanitize_name;
pub use translate::{RenderState, Scope, Translate};
