//! Request → Terraform document pipeline.

use tracing::{debug, info, warn};

use golden_request::{InfraRequest, ResourceDeclaration, ResourceKind};

use crate::config::RenderConfig;
use crate::document::TerraformDocument;
use crate::environment::{CloudTarget, EnvironmentContext};
use crate::error::IacResult;
use crate::registry::ReferenceRegistry;
use crate::report::RenderReport;
use crate::translate::{RenderState, Scope, Translate};

/// Result of a successful render.
#[derive(Debug)]
pub struct RenderOutput {
    pub document: TerraformDocument,
    pub report: RenderReport,
    /// Handles of every rendered data resource, by kind and name.
    pub registry: ReferenceRegistry,
}

/// Renders infrastructure requests for one cloud target.
pub struct Renderer {
    target: CloudTarget,
    config: RenderConfig,
}

impl Renderer {
    pub fn new(target: CloudTarget, config: RenderConfig) -> Self {
        Self { target, config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render a request.
    ///
    /// Resources are translated strictly in declaration order. Any fatal
    /// error aborts the whole render; no partial document is returned.
    pub fn render(&self, request: &InfraRequest) -> IacResult<RenderOutput> {
        let context = EnvironmentContext::from_request(request, self.target.clone());
        info!(
            "Rendering {} resources for {} ({}) in account {} / {}",
            request.resources.len(),
            context.app,
            context.env,
            context.account_id,
            context.region
        );

        let scope = Scope::new(&context, &self.config);
        let mut state = RenderState::new();

        for resource in &request.resources {
            debug!("Translating {} {:?}", resource.type_name(), resource.name());
            match resource {
                ResourceDeclaration::Bucket(spec) => spec.translate(&scope, &mut state)?,
                ResourceDeclaration::Database(spec) => spec.translate(&scope, &mut state)?,
                ResourceDeclaration::Secret(spec) => spec.translate(&scope, &mut state)?,
                ResourceDeclaration::Role(spec) => spec.translate(&scope, &mut state)?,
                ResourceDeclaration::Cluster(spec) => spec.translate(&scope, &mut state)?,
                ResourceDeclaration::Unknown { kind, .. } => {
                    warn!("Unknown resource type: {}", kind);
                    state.report.skipped.push(kind.clone());
                }
            }
        }

        let RenderState {
            registry,
            document,
            mut report,
        } = state;

        report.buckets = registry.count(ResourceKind::Bucket);
        report.databases = registry.count(ResourceKind::Database);
        report.secrets = registry.count(ResourceKind::Secret);
        report.clusters = registry.count(ResourceKind::Cluster);

        info!("Rendered {} ({} SSM parameters)", report.summary(), document.parameter_count());

        Ok(RenderOutput {
            document,
            report,
            registry,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IacError;
    use golden_request::RequestReader;

    fn target() -> CloudTarget {
        CloudTarget {
            account_id: "123456789012".to_string(),
            region: "us-east-1".to_string(),
            oidc_provider_arn: "arn:aws:iam::123456789012:oidc-provider/oidc.example.com".to_string(),
            oidc_provider_url: "oidc.example.com".to_string(),
        }
    }

    fn render(resources: &str) -> IacResult<RenderOutput> {
        let content = format!("app: shop\nenv: dev\nnamespace: shop\nresources:\n{}", resources);
        let request = RequestReader::parse(&content).unwrap();
        Renderer::new(target(), RenderConfig::default()).render(&request)
    }

    #[test]
    fn test_unknown_type_is_skipped() {
        let output = render(
            "  - {type: sqs_queue, name: jobs}\n  - {type: s3_bucket, name: uploads}\n",
        )
        .unwrap();

        assert_eq!(output.report.skipped, vec!["sqs_queue"]);
        assert_eq!(output.report.buckets, 1);
        assert!(output.document.module("s3_uploads").is_some());
    }

    #[test]
    fn test_non_string_type_is_skipped() {
        let output =
            render("  - {type: 42, name: x}\n  - {type: s3_bucket, name: uploads}\n").unwrap();

        assert_eq!(output.report.skipped, vec!["42"]);
        assert_eq!(output.report.buckets, 1);
        assert!(output.document.module("s3_uploads").is_some());
    }

    #[test]
    fn test_fatal_error_aborts() {
        let err = render(
            "  - {type: s3_bucket, name: ok}\n  - {type: rds_database, name: db, size: tiny}\n",
        )
        .unwrap_err();
        assert!(matches!(err, IacError::UnsupportedSize { .. }));
    }

    #[test]
    fn test_duplicate_name_aborts() {
        let err = render("  - {type: secret, name: s}\n  - {type: secret, name: s}\n").unwrap_err();
        assert!(matches!(err, IacError::DuplicateResource { .. }));
    }

    #[test]
    fn test_role_before_resource_gets_no_grant() {
        let output = render(
            "  - {type: irsa_role, name: api, s3_buckets: [late]}\n  - {type: s3_bucket, name: late}\n",
        )
        .unwrap();

        assert_eq!(output.report.unresolved.len(), 1);
        assert!(output.registry.bucket("late").is_some());
    }
}
