//! `irsa_role` → IAM role for service accounts.
//!
//! Grants are resolved by name against the registry. A name with no handle
//! is dropped from the grants; the drop is recorded in the report instead of
//! failing the render.

use tracing::{debug, warn};

use golden_request::{ResourceKind, RoleSpec};

use crate::document::{interpolate, ModuleBlock, RoleGrants, RoleModule};
use crate::error::IacResult;
use crate::report::UnresolvedReference;
use crate::translate::{RenderState, Scope, Translate};

/// Module key of the role. Constant: a later role replaces an earlier one.
pub const ROLE_MODULE: &str = "irsa";
pub const ROLE_OUTPUT: &str = "irsa_role_arn";

impl Translate for RoleSpec {
    fn translate(&self, scope: &Scope<'_>, state: &mut RenderState) -> IacResult<()> {
        let ctx = scope.context;
        let grants = resolve_grants(self, state);

        let replaced = state.document.insert_module(
            ROLE_MODULE,
            ModuleBlock::Role(RoleModule {
                source: scope.config.modules.irsa_role.clone(),
                app: ctx.app.clone(),
                env: ctx.env,
                namespace: ctx.namespace.clone(),
                oidc_provider_arn: ctx.oidc_provider_arn.clone(),
                oidc_provider_url: ctx.oidc_provider_url.clone(),
                grants,
            }),
        );
        if replaced.is_some() {
            warn!("Role '{}' replaces a previously rendered irsa module", self.name);
        }

        let role_arn = interpolate(&format!("module.{}", ROLE_MODULE), "role_arn");
        state.document.insert_output(ROLE_OUTPUT, role_arn.clone());

        let path = ctx.parameter_path("irsa", &self.name, "arn");
        state.publish(scope, &path, role_arn)?;

        state.report.roles += 1;
        Ok(())
    }
}

/// Database access is granted through the instance's generated master-user
/// secret, never through the database ARN itself.
fn resolve_grants(role: &RoleSpec, state: &mut RenderState) -> RoleGrants {
    let mut grants = RoleGrants::default();

    for (kind, name) in role.references() {
        let registry = &state.registry;
        let granted = match kind {
            ResourceKind::Bucket => registry
                .bucket(name)
                .map(|h| grants.s3.push(h.bucket_arn.clone())),
            ResourceKind::Database => registry
                .database(name)
                .map(|h| grants.rds_secrets.push(h.secret_arn.clone())),
            ResourceKind::Secret => registry
                .secret(name)
                .map(|h| grants.secrets.push(h.secret_arn.clone())),
            ResourceKind::Role | ResourceKind::Cluster => None,
        };

        if granted.is_none() {
            debug!("Role '{}': no {} named '{}' declared above it", role.name, kind, name);
            state.report.unresolved.push(UnresolvedReference {
                role: role.name.clone(),
                kind,
                name: name.to_string(),
            });
        }
    }

    grants
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{BucketHandle, DatabaseHandle, SecretHandle};
    use crate::translate::fixtures;
    use golden_request::Environment;
    use serde_json::json;

    fn seeded_state() -> RenderState {
        let mut state = RenderState::new();
        state
            .registry
            .register_bucket(
                "uploads",
                BucketHandle {
                    module_name: "s3_uploads".to_string(),
                    bucket_arn: "${module.s3_uploads.arn}".to_string(),
                },
            )
            .unwrap();
        state
            .registry
            .register_database(
                "orders",
                DatabaseHandle {
                    resource_name: "rds_orders".to_string(),
                    db_arn: "${aws_db_instance.rds_orders.arn}".to_string(),
                    secret_arn: "${aws_db_instance.rds_orders.master_user_secret[0].secret_arn}".to_string(),
                },
            )
            .unwrap();
        state
            .registry
            .register_secret(
                "stripe",
                SecretHandle {
                    resource_name: "secret_stripe".to_string(),
                    secret_arn: "${aws_secretsmanager_secret.secret_stripe.arn}".to_string(),
                },
            )
            .unwrap();
        state
    }

    fn owned(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn role(name: &str, buckets: &[&str], databases: &[&str], secrets: &[&str]) -> RoleSpec {
        RoleSpec {
            name: name.to_string(),
            s3_buckets: owned(buckets),
            rds_databases: owned(databases),
            secrets: owned(secrets),
        }
    }

    #[test]
    fn test_role_module_with_all_grants() {
        let ctx = fixtures::context(Environment::Dev);
        let config = fixtures::config();
        let mut state = seeded_state();

        role("api", &["uploads"], &["orders"], &["stripe"])
            .translate(&Scope::new(&ctx, &config), &mut state)
            .unwrap();

        let doc = state.document.to_value().unwrap();
        assert_eq!(
            doc["module"]["irsa"],
            json!({
                "source": "../modules/iam/irsa-role",
                "app": "shop",
                "env": "dev",
                "namespace": "shop-ns",
                "oidc_provider_arn": "arn:aws:iam::123456789012:oidc-provider/oidc.example.com",
                "oidc_provider_url": "oidc.example.com",
                "grants": {
                    "s3": ["${module.s3_uploads.arn}"],
                    "rds_secrets": ["${aws_db_instance.rds_orders.master_user_secret[0].secret_arn}"],
                    "secrets": ["${aws_secretsmanager_secret.secret_stripe.arn}"]
                }
            })
        );
        assert_eq!(doc["output"]["irsa_role_arn"], json!({"value": "${module.irsa.role_arn}"}));
        assert_eq!(
            state.document.parameter("/apps/dev/shop/irsa/api/arn").unwrap().value,
            "${module.irsa.role_arn}"
        );
        assert!(state.report.unresolved.is_empty());
        assert_eq!(state.report.roles, 1);
    }

    #[test]
    fn test_unresolved_names_are_skipped_and_counted() {
        let ctx = fixtures::context(Environment::Dev);
        let config = fixtures::config();
        let mut state = seeded_state();

        role("api", &["uploads", "typo"], &["missing-db"], &[])
            .translate(&Scope::new(&ctx, &config), &mut state)
            .unwrap();

        let Some(ModuleBlock::Role(module)) = state.document.module(ROLE_MODULE) else {
            panic!("expected role module");
        };
        assert_eq!(module.grants.s3, vec!["${module.s3_uploads.arn}"]);
        assert!(module.grants.rds_secrets.is_empty());

        let unresolved: Vec<_> = state
            .report
            .unresolved
            .iter()
            .map(|u| (u.kind, u.name.as_str()))
            .collect();
        assert_eq!(
            unresolved,
            vec![(ResourceKind::Bucket, "typo"), (ResourceKind::Database, "missing-db")]
        );
    }

    #[test]
    fn test_lookup_is_kind_scoped() {
        let ctx = fixtures::context(Environment::Dev);
        let config = fixtures::config();
        let mut state = seeded_state();

        // "stripe" exists only as a secret
        role("api", &["stripe"], &[], &[])
            .translate(&Scope::new(&ctx, &config), &mut state)
            .unwrap();

        let Some(ModuleBlock::Role(module)) = state.document.module(ROLE_MODULE) else {
            panic!("expected role module");
        };
        assert!(module.grants.s3.is_empty());
        assert_eq!(state.report.unresolved.len(), 1);
    }

    #[test]
    fn test_later_role_replaces_module() {
        let ctx = fixtures::context(Environment::Dev);
        let config = fixtures::config();
        let scope = Scope::new(&ctx, &config);
        let mut state = seeded_state();

        role("first", &["uploads"], &[], &[]).translate(&scope, &mut state).unwrap();
        role("second", &[], &[], &["stripe"]).translate(&scope, &mut state).unwrap();

        assert_eq!(state.document.module.len(), 1);
        let Some(ModuleBlock::Role(module)) = state.document.module(ROLE_MODULE) else {
            panic!("expected role module");
        };
        assert!(module.grants.s3.is_empty());
        assert_eq!(module.grants.secrets.len(), 1);

        // Both roles keep their own parameter
        assert!(state.document.parameter("/apps/dev/shop/irsa/first/arn").is_some());
        assert!(state.document.parameter("/apps/dev/shop/irsa/second/arn").is_some());
        assert_eq!(state.report.roles, 2);
    }
}
