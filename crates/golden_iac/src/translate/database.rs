//! `rds_database` → `aws_db_instance`.

use golden_request::DatabaseSpec;

use crate::document::{interpolate, DbInstance, ResourceBlock, DB_INSTANCE};
use crate::environment::{
    allocated_storage, backup_retention_days, engine_version, instance_class, multi_az,
};
use crate::error::IacResult;
use crate::registry::DatabaseHandle;
use crate::sanitize::sanitize_name;
use crate::translate::{RenderState, Scope, Translate};

const STORAGE_TYPE: &str = "gp2";
const MASTER_USERNAME: &str = "admin";
const BACKUP_WINDOW: &str = "03:00-04:00";
const MAINTENANCE_WINDOW: &str = "sun:04:00-sun:05:00";

impl Translate for DatabaseSpec {
    fn translate(&self, scope: &Scope<'_>, state: &mut RenderState) -> IacResult<()> {
        let ctx = scope.context;
        let env = ctx.env;

        // Fail before touching any state.
        let class = instance_class(&self.size, env)?;

        let resource_name = format!("rds_{}", sanitize_name(&self.name));
        let address = format!("{}.{}", DB_INSTANCE, resource_name);

        state.registry.register_database(
            &self.name,
            DatabaseHandle {
                resource_name: resource_name.clone(),
                db_arn: interpolate(&address, "arn"),
                secret_arn: interpolate(&address, "master_user_secret[0].secret_arn"),
            },
        )?;

        state.document.insert_resource(
            DB_INSTANCE,
            resource_name,
            ResourceBlock::DbInstance(DbInstance {
                identifier: format!("{}-{}-{}", ctx.app, self.name, env),
                engine: self.engine.clone(),
                engine_version: engine_version(&self.engine).to_string(),
                instance_class: class.to_string(),
                allocated_storage: allocated_storage(env),
                storage_type: STORAGE_TYPE.to_string(),
                storage_encrypted: true,
                db_name: sanitize_name(&self.name),
                username: MASTER_USERNAME.to_string(),
                manage_master_user_password: true,
                multi_az: multi_az(env),
                backup_retention_period: backup_retention_days(env),
                backup_window: BACKUP_WINDOW.to_string(),
                maintenance_window: MAINTENANCE_WINDOW.to_string(),
                deletion_protection: false,
                skip_final_snapshot: !env.is_prod(),
                tags: ctx.tags(&scope.config.managed_by),
            }),
        );

        let path = ctx.parameter_path("rds", &self.name, "endpoint");
        state.publish(scope, &path, interpolate(&address, "endpoint"))
    }
}
