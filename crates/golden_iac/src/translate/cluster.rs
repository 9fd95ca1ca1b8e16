//! `kind_cluster` → `ec2-kind-cluster` module on the account's default VPC.

use golden_request::{ClusterSpec, DEFAULT_CLUSTER_INSTANCE_TYPE};

use crate::document::{
    interpolate, ClusterModule, DefaultSubnet, DefaultVpc, ModuleBlock, ResourceBlock, Tags,
    DEFAULT_SUBNET, DEFAULT_VPC,
};
use crate::environment::cluster_instance_type;
use crate::error::IacResult;
use crate::registry::ClusterHandle;
use crate::sanitize::sanitize_name;
use crate::translate::{RenderState, Scope, Translate};

impl Translate for ClusterSpec {
    fn translate(&self, scope: &Scope<'_>, state: &mut RenderState) -> IacResult<()> {
        let ctx = scope.context;
        let prefix = sanitize_name(&format!("{}_{}", ctx.app, ctx.env));
        let module_name = format!("{}_kind_cluster_{}", prefix, sanitize_name(&self.name));
        let address = format!("module.{}", module_name);

        state.registry.register_cluster(
            &self.name,
            ClusterHandle {
                module_name: module_name.clone(),
                cluster_name: format!("{}-{}", ctx.app, ctx.env),
                oidc_issuer: interpolate(&address, "oidc_issuer_url"),
                cluster_arn: interpolate(&address, "cluster_arn"),
            },
        )?;

        // The default VPC and subnet are shared by every cluster of the app.
        let vpc_key = format!("{}_default_vpc", prefix);
        let subnet_key = format!("{}_default_subnet", prefix);

        state.document.insert_resource(
            DEFAULT_VPC,
            vpc_key.clone(),
            ResourceBlock::DefaultVpc(DefaultVpc {
                enable_dns_hostnames: true,
                enable_dns_support: true,
                tags: Tags::named(
                    format!("{}-{}-default-vpc", ctx.app, ctx.env),
                    &ctx.app,
                    ctx.env,
                ),
            }),
        );
        state.document.insert_resource(
            DEFAULT_SUBNET,
            subnet_key.clone(),
            ResourceBlock::DefaultSubnet(DefaultSubnet {
                availability_zone: format!("{}a", ctx.region),
                tags: Tags::named(
                    format!("{}-{}-default-subnet", ctx.app, ctx.env),
                    &ctx.app,
                    ctx.env,
                ),
            }),
        );

        let instance_type = if self.instance_type == DEFAULT_CLUSTER_INSTANCE_TYPE {
            cluster_instance_type(ctx.env).to_string()
        } else {
            self.instance_type.clone()
        };

        state.document.insert_module(
            module_name,
            ModuleBlock::Cluster(ClusterModule {
                source: scope.config.modules.kind_cluster.clone(),
                app: ctx.app.clone(),
                env: ctx.env,
                instance_type,
                key_pair_name: self.key_pair.clone(),
                private_key_path: format!("~/.ssh/{}.pem", self.key_pair),
                vpc_id: interpolate(&format!("{}.{}", DEFAULT_VPC, vpc_key), "id"),
                subnet_id: interpolate(&format!("{}.{}", DEFAULT_SUBNET, subnet_key), "id"),
            }),
        );

        let endpoint = ctx.parameter_path("cluster", &self.name, "endpoint");
        state.publish(scope, &endpoint, interpolate(&address, "kubernetes_endpoint"))?;

        let ssh_command = ctx.parameter_path("cluster", &self.name, "ssh_command");
        state.publish(scope, &ssh_command, interpolate(&address, "ssh_command"))
    }
}
