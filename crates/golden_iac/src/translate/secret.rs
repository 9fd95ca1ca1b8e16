//! `secret` → `aws_secretsmanager_secret`.

use golden_request::SecretSpec;

use crate::document::{interpolate, ResourceBlock, SecretsManagerSecret, SECRETS_MANAGER_SECRET};
use crate::error::IacResult;
use crate::registry::SecretHandle;
use crate::sanitize::sanitize_name;
use crate::translate::{RenderState, Scope, Translate};

impl Translate for SecretSpec {
    fn translate(&self, scope: &Scope<'_>, state: &mut RenderState) -> IacResult<()> {
        let ctx = scope.context;
        let resource_name = format!("secret_{}", sanitize_name(&self.name));
        let address = format!("{}.{}", SECRETS_MANAGER_SECRET, resource_name);
        let secret_arn = interpolate(&address, "arn");

        state.registry.register_secret(
            &self.name,
            SecretHandle {
                resource_name: resource_name.clone(),
                secret_arn: secret_arn.clone(),
            },
        )?;

        let description = self
            .description
            .clone()
            .unwrap_or_else(|| format!("Secrets for {} {}", ctx.app, self.name));

        state.document.insert_resource(
            SECRETS_MANAGER_SECRET,
            resource_name,
            ResourceBlock::Secret(SecretsManagerSecret {
                name: format!("/apps/{}/{}/secrets/{}", ctx.env, ctx.app, self.name),
                description,
                tags: ctx.tags(&scope.config.managed_by),
            }),
        );

        let path = ctx.parameter_path("secrets", &self.name, "arn");
        state.publish(scope, &path, secret_arn)
    }
}
