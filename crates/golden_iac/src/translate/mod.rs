//! Per-kind translators from resource declarations to Terraform blocks.
//!
//! Each translator reads the environment through a [`Scope`] and writes into
//! a shared [`RenderState`]: blocks go to the document, handles go to the
//! registry and anything tolerated goes to the report. Translators run in
//! declaration order, so a role only sees handles registered above it.

pub mod bucket;
pub mod cluster;
pub mod database;
pub mod role;
pub mod secret;

use crate::config::RenderConfig;
use crate::document::TerraformDocument;
use crate::environment::EnvironmentContext;
use crate::error::IacResult;
use crate::registry::ReferenceRegistry;
use crate::report::RenderReport;

/// Read-only inputs shared by every translator in one render.
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    pub context: &'a EnvironmentContext,
    pub config: &'a RenderConfig,
}

impl<'a> Scope<'a> {
    pub fn new(context: &'a EnvironmentContext, config: &'a RenderConfig) -> Self {
        Self { context, config }
    }
}

/// Mutable accumulator owned by a single render pass.
#[derive(Debug, Default)]
pub struct RenderState {
    pub registry: ReferenceRegistry,
    pub document: TerraformDocument,
    pub report: RenderReport,
}

impl RenderState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a discoverable SSM parameter, recording key collisions.
    pub fn publish(
        &mut self,
        scope: &Scope<'_>,
        path: &str,
        value: impl Into<String>,
    ) -> IacResult<()> {
        let collided = self.document.insert_parameter(
            path,
            value,
            &scope.config.managed_by,
            scope.config.parameter_collisions,
        )?;
        if collided {
            self.report.collisions.push(path.to_string());
        }
        Ok(())
    }
}

/// A declaration that knows how to render itself.
pub trait Translate {
    fn translate(&self, scope: &Scope<'_>, state: &mut RenderState) -> IacResult<()>;
}

#[cfg(test)]
pub(crate) mod fixtures {
    use golden_request::Environment;

    use crate::config::RenderConfig;
    use crate::environment::{CloudTarget, EnvironmentContext};

    pub fn context(env: Environment) -> EnvironmentContext {
        EnvironmentContext::new(
            "shop",
            env,
            "shop-ns",
            CloudTarget {
                account_id: "123456789012".to_string(),
                region: "eu-west-1".to_string(),
                oidc_provider_arn: "arn:aws:iam::123456789012:oidc-provider/oidc.example.com".to_string(),
                oidc_provider_url: "oidc.example.com".to_string(),
            },
        )
    }

    pub fn config() -> RenderConfig {
        RenderConfig::default()
    }
}
