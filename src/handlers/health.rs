//! `health` handler.

use crate::cli::{BackendArgs, Cli, OutputFormat};
use crate::error::{Result, TrustError};
use crate::source::{HealthStatus, HttpReportSource};
use colored::Colorize;
use std::process::ExitCode;

use super::{EXIT_DANGEROUS, EXIT_ERROR, current_dir, resolve_config};

/// Handle `apk-trust health`. Exits 1 when the backend answers but is not healthy.
pub fn handle_health(cli: &Cli, args: &BackendArgs) -> ExitCode {
    let config = match resolve_config(cli, Some(args), current_dir().as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), TrustError::from(e));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let status = match check_health(&config.source.base_url, config.source.timeout()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    match config.output.format.unwrap_or_default() {
        OutputFormat::Json => match serde_json::to_string_pretty(&status) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("{} {}", "Error:".red(), TrustError::from(e));
                return ExitCode::from(EXIT_ERROR);
            }
        },
        OutputFormat::Terminal => println!("{}", format_health(&config.source.base_url, &status)),
    }

    if status.is_healthy() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_DANGEROUS)
    }
}

fn check_health(base_url: &str, timeout: std::time::Duration) -> Result<HealthStatus> {
    let source = HttpReportSource::new(base_url, timeout)?;
    let runtime = tokio::runtime::Runtime::new().map_err(TrustError::Runtime)?;
    Ok(runtime.block_on(source.health())?)
}

fn format_health(base_url: &str, status: &HealthStatus) -> String {
    let label = if status.is_healthy() {
        status.status.green().bold()
    } else {
        status.status.red().bold()
    };
    format!(
        "Backend: {}\nStatus: {}\nModels loaded: {}\nFeature columns: {}",
        base_url, label, status.models_loaded, status.feature_columns
    )
}
