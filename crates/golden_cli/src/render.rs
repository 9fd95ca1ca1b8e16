//! The render command: request file in, Terraform JSON out.

use std::fs;

use anyhow::{bail, Context, Result};
use tracing::{debug, info};

use golden_iac::{CloudTarget, CollisionPolicy, RenderConfig, RenderReport, Renderer};
use golden_request::{RequestReader, RequestValidator};

use crate::cli::Cli;

pub fn execute(cli: Cli) -> Result<()> {
    let request = RequestReader::read_file(&cli.request)
        .with_context(|| format!("Failed to load request {}", cli.request.display()))?;

    let validation = RequestValidator::validate(&request);
    for warning in &validation.warnings {
        eprintln!("⚠️  {}", warning);
    }
    if !validation.valid {
        for error in &validation.errors {
            eprintln!("❌ {}", error);
        }
        bail!("Request validation failed with {} error(s)", validation.errors.len());
    }

    let mut config = match &cli.config {
        Some(path) => RenderConfig::from_file(path)
            .with_context(|| format!("Failed to load renderer config {}", path.display()))?,
        None => RenderConfig::default(),
    };
    if cli.strict {
        config = config.with_collision_policy(CollisionPolicy::Error);
    }
    debug!("Renderer config: {:?}", config);

    let target = CloudTarget {
        account_id: cli.account_id,
        region: cli.region,
        oidc_provider_arn: cli.oidc_provider_arn,
        oidc_provider_url: cli.oidc_provider_url,
    };

    let output = Renderer::new(target, config)
        .render(&request)
        .with_context(|| format!("Failed to render {} ({})", request.app, request.env))?;

    for warning in render_warnings(&output.report) {
        eprintln!("⚠️  {}", warning);
    }

    // Nothing is written unless the whole render succeeded
    let json = output.document.to_json_pretty()?;
    fs::write(&cli.out_file, json)
        .with_context(|| format!("Failed to write {}", cli.out_file.display()))?;
    info!("Wrote {}", cli.out_file.display());

    if !cli.quiet {
        println!("✅ Generated Terraform configuration: {}", cli.out_file.display());
        println!("📦 Resources: {}", output.report.summary());
    }

    Ok(())
}

/// Findings the request lint cannot see ahead of the render.
///
/// Unresolved role references are left out: the lint already warned about
/// each one before rendering.
fn render_warnings(report: &RenderReport) -> Vec<String> {
    let skipped = report
        .skipped
        .iter()
        .map(|kind| format!("Unknown resource type: {}", kind));
    let collisions = report
        .collisions
        .iter()
        .map(|path| format!("Parameter key collision: {}", path));
    skipped.chain(collisions).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::path::{Path, PathBuf};
    use tempfile::tempdir;

    fn cli(request: &Path, out_file: &Path, extra: &[&str]) -> Cli {
        let mut args = vec![
            "golden-render".to_string(),
            request.display().to_string(),
            "123456789012".to_string(),
            "us-east-1".to_string(),
            "arn:aws:iam::123456789012:oidc-provider/oidc.example.com".to_string(),
            "https://oidc.example.com".to_string(),
            out_file.display().to_string(),
        ];
        args.extend(extra.iter().map(|a| a.to_string()));
        Cli::try_parse_from(args).unwrap()
    }

    fn write_request(dir: &Path, resources: &str) -> PathBuf {
        let path = dir.join("request.yaml");
        let content = format!("app: shop\nenv: dev\nnamespace: shop\nresources:\n{}", resources);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_execute_writes_document() {
        let dir = tempdir().unwrap();
        let request = write_request(
            dir.path(),
            concat!(
                "  - {type: s3_bucket, name: uploads}\n",
                "  - {type: irsa_role, name: api, s3_buckets: [uploads]}\n",
            ),
        );
        let out_file = dir.path().join("main.tf.json");

        execute(cli(&request, &out_file, &[])).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&out_file).unwrap()).unwrap();
        assert_eq!(written["module"]["s3_uploads"]["name"], "uploads");
        assert_eq!(written["module"]["irsa"]["oidc_provider_url"], "oidc.example.com");
        assert_eq!(written["module"]["irsa"]["grants"]["s3"][0], "${module.s3_uploads.arn}");
    }

    #[test]
    fn test_failed_render_writes_nothing() {
        let dir = tempdir().unwrap();
        let request = write_request(
            dir.path(),
            "  - {type: rds_database, name: db, size: huge}\n",
        );
        let out_file = dir.path().join("main.tf.json");

        let err = execute(cli(&request, &out_file, &[])).unwrap_err();
        assert!(err.chain().any(|c| c.downcast_ref::<golden_iac::IacError>().is_some()));
        assert!(!out_file.exists());
    }

    #[test]
    fn test_strict_flag_rejects_collisions() {
        let dir = tempdir().unwrap();
        let request = write_request(
            dir.path(),
            "  - {type: secret, name: a-b}\n  - {type: secret, name: a.b}\n",
        );
        let out_file = dir.path().join("main.tf.json");

        execute(cli(&request, &out_file, &[])).unwrap();
        assert!(out_file.exists());

        fs::remove_file(&out_file).unwrap();
        assert!(execute(cli(&request, &out_file, &["--strict"])).is_err());
        assert!(!out_file.exists());
    }

    #[test]
    fn test_render_warnings_skip_unresolved_references() {
        let report = RenderReport {
            skipped: vec!["sqs_queue".to_string()],
            unresolved: vec![golden_iac::UnresolvedReference {
                role: "api".to_string(),
                kind: golden_request::ResourceKind::Bucket,
                name: "uplods".to_string(),
            }],
            collisions: vec!["/apps/dev/shop/s3/a.b/name".to_string()],
            ..RenderReport::default()
        };

        assert_eq!(
            render_warnings(&report),
            vec![
                "Unknown resource type: sqs_queue",
                "Parameter key collision: /apps/dev/shop/s3/a.b/name",
            ]
        );
    }

    #[test]
    fn test_missing_request() {
        let dir = tempdir().unwrap();
        let out_file = dir.path().join("main.tf.json");

        let err = execute(cli(&dir.path().join("absent.yaml"), &out_file, &[])).unwrap_err();
        assert!(err.to_string().contains("Failed to load request"));
        assert!(!out_file.exists());
    }
}
