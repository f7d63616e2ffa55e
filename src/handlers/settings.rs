//! Effective configuration: config file first, then command-line overrides.

use crate::cli::{BackendArgs, Cli};
use crate::config::{Config, ConfigError};
use crate::report::LabelMap;
use std::path::Path;

/// Resolves the configuration for one invocation.
///
/// An explicit `--config` file must load; otherwise the usual lookup from `cwd` applies and
/// unusable files are skipped.
pub fn resolve_config(
    cli: &Cli,
    backend: Option<&BackendArgs>,
    cwd: Option<&Path>,
) -> Result<Config, ConfigError> {
    let mut config = match cli.config {
        Some(ref path) => Config::from_file(path)?,
        None => Config::load(cwd),
    };

    if let Some(format) = cli.format {
        config.output.format = Some(format);
    }
    if let Some(threshold) = cli.threshold {
        config.verdict.threshold = threshold;
    }
    if !cli.safe_labels.is_empty() {
        config.verdict.safe_labels = LabelMap::new(cli.safe_labels.iter().cloned());
    }

    if let Some(args) = backend {
        if let Some(ref url) = args.url {
            config.source.base_url = url.clone();
        }
        if let Some(timeout) = args.timeout {
            config.source.timeout_secs = timeout;
        }
    }

    config.validate()?;
    Ok(config)
}
