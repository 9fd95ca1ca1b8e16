//! `s3_bucket` → `s3-secure` module.

use golden_request::BucketSpec;

use crate::document::{interpolate, BucketModule, ModuleBlock};
use crate::environment::{lifecycle_days, server_access_logs, versioning_enabled};
use crate::error::IacResult;
use crate::registry::BucketHandle;
use crate::sanitize::sanitize_name;
use crate::translate::{RenderState, Scope, Translate};

impl Translate for BucketSpec {
    fn translate(&self, scope: &Scope<'_>, state: &mut RenderState) -> IacResult<()> {
        let ctx = scope.context;
        let module_name = format!("s3_{}", sanitize_name(&self.name));
        let address = format!("module.{}", module_name);

        state.registry.register_bucket(
            &self.name,
            BucketHandle {
                module_name: module_name.clone(),
                bucket_arn: interpolate(&address, "arn"),
            },
        )?;

        state.document.insert_module(
            module_name,
            ModuleBlock::Bucket(BucketModule {
                source: scope.config.modules.s3_secure.clone(),
                app: ctx.app.clone(),
                env: ctx.env,
                name: self.name.clone(),
                versioning: versioning_enabled(ctx.env),
                lifecycle_days: lifecycle_days(ctx.env),
                block_public_access: !self.public_access,
                server_access_logs: server_access_logs(ctx.env),
            }),
        );

        let path = ctx.parameter_path("s3", &self.name, "name");
        state.publish(scope, &path, interpolate(&address, "name"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translate::fixtures;
    use golden_request::Environment;
    use serde_json::json;

    fn spec(name: &str, public_access: bool) -> BucketSpec {
        BucketSpec {
            name: name.to_string(),
            purpose: "uploads".to_string(),
            public_access,
        }
    }

    #[test]
    fn test_bucket_dev() {
        let ctx = fixtures::context(Environment::Dev);
        let config = fixtures::config();
        let mut state = RenderState::new();

        spec("uploads", false)
            .translate(&Scope::new(&ctx, &config), &mut state)
            .unwrap();

        let doc = state.document.to_value().unwrap();
        assert_eq!(
            doc["module"]["s3_uploads"],
            json!({
                "source": "../modules/s3-secure",
                "app": "shop",
                "env": "dev",
                "name": "uploads",
                "versioning": false,
                "lifecycle_days": 90,
                "block_public_access": true,
                "server_access_logs": false
            })
        );

        let param = state.document.parameter("/apps/dev/shop/s3/uploads/name").unwrap();
        assert_eq!(param.value, "${module.s3_uploads.name}");
        assert_eq!(
            state.registry.bucket("uploads").unwrap().bucket_arn,
            "${module.s3_uploads.arn}"
        );
    }

    #[test]
    fn test_bucket_prod_settings() {
        let ctx = fixtures::context(Environment::Prod);
        let config = fixtures::config();
        let mut state = RenderState::new();

        spec("assets", true)
            .translate(&Scope::new(&ctx, &config), &mut state)
            .unwrap();

        let Some(ModuleBlock::Bucket(module)) = state.document.module("s3_assets") else {
            panic!("expected bucket module");
        };
        assert!(module.versioning);
        assert!(module.server_access_logs);
        assert_eq!(module.lifecycle_days, 365);
        assert!(!module.block_public_access);
    }

    #[test]
    fn test_block_public_access_is_negation() {
        let config = fixtures::config();
        for env in Environment::all() {
            let ctx = fixtures::context(env);
            for public_access in [false, true] {
                let mut state = RenderState::new();
                spec("b", public_access)
                    .translate(&Scope::new(&ctx, &config), &mut state)
                    .unwrap();
                let Some(ModuleBlock::Bucket(module)) = state.document.module("s3_b") else {
                    panic!("expected bucket module");
                };
                assert_eq!(module.block_public_access, !public_access);
            }
        }
    }

    #[test]
    fn test_bucket_name_is_sanitized_in_keys_only() {
        let ctx = fixtures::context(Environment::Stage);
        let config = fixtures::config();
        let mut state = RenderState::new();

        spec("user-media", false)
            .translate(&Scope::new(&ctx, &config), &mut state)
            .unwrap();

        let Some(ModuleBlock::Bucket(module)) = state.document.module("s3_user_media") else {
            panic!("expected bucket module");
        };
        assert_eq!(module.name, "user-media");
        assert!(state.document.parameter("/apps/stage/shop/s3/user-media/name").is_some());
    }
}
