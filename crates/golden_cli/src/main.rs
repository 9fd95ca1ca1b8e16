//! golden-render CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid arguments
//! - 3: Invalid request
//! - 4: Configuration error
//! - 5: Render error

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use golden_iac::IacError;
use golden_request::RequestError;

mod cli;
mod render;

use cli::Cli;

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_ARGS: u8 = 2;
    pub const INVALID_REQUEST: u8 = 3;
    pub const CONFIG_ERROR: u8 = 4;
    pub const RENDER_ERROR: u8 = 5;
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(usage_exit_code(&e));
        }
    };

    init_logging(cli.verbose, cli.quiet);

    match render::execute(cli) {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            eprintln!("❌ Error: {:#}", e);
            ExitCode::from(categorize_error(&e))
        }
    }
}

/// Help and version output are not failures; everything else clap rejects is.
fn usage_exit_code(e: &clap::Error) -> u8 {
    if e.use_stderr() {
        ExitCodes::INVALID_ARGS
    } else {
        ExitCodes::SUCCESS
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        "golden=debug"
    } else if quiet {
        "golden=warn"
    } else {
        "golden=info"
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},warn", level)));

    let log_result = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    if log_result.is_err() {
        // Logging already initialized, continue
    }
}

/// Categorize error to determine exit code
fn categorize_error(e: &anyhow::Error) -> u8 {
    for cause in e.chain() {
        if cause.downcast_ref::<RequestError>().is_some() {
            return ExitCodes::INVALID_REQUEST;
        }
        if let Some(iac) = cause.downcast_ref::<IacError>() {
            return match iac {
                IacError::Request(_) => ExitCodes::INVALID_REQUEST,
                IacError::InvalidConfiguration(_) | IacError::Yaml(_) | IacError::Toml(_) => {
                    ExitCodes::CONFIG_ERROR
                }
                _ => ExitCodes::RENDER_ERROR,
            };
        }
    }

    if e.to_string().to_lowercase().contains("validation") {
        ExitCodes::INVALID_REQUEST
    } else {
        ExitCodes::GENERAL_ERROR
    }
}
