//! Command-line definition.

use std::path::PathBuf;

use clap::Parser;

/// golden-render - Render an infrastructure request into Terraform JSON
#[derive(Parser, Debug)]
#[command(name = "golden-render")]
#[command(version, about = "Render an infrastructure request into Terraform JSON")]
#[command(long_about = r#"
Renders an infrastructure request (S3 buckets, RDS databases, secrets,
kind clusters and an IRSA role) into a Terraform JSON configuration, and
publishes every produced artifact as an SSM parameter under
/apps/{env}/{app}/{kind}/{name}/{attribute}.

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments
  3 - Invalid request
  4 - Configuration error
  5 - Render error
"#)]
pub struct Cli {
    /// Infrastructure request YAML file
    pub request: PathBuf,

    /// AWS account ID
    pub account_id: String,

    /// AWS region
    pub region: String,

    /// OIDC identity provider ARN of the cluster
    pub oidc_provider_arn: String,

    /// OIDC issuer host, without https://
    pub oidc_provider_url: String,

    /// Output file for the Terraform JSON configuration
    pub out_file: PathBuf,

    /// Renderer configuration file (YAML or TOML)
    #[arg(short, long, env = "GOLDEN_RENDER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Fail when two SSM parameter paths collide after sanitization
    #[arg(long)]
    pub strict: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}
