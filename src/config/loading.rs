//! Configuration loading functions.

use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use super::error::ConfigError;
use super::types::Config;

/// Project-level config file names, in lookup order.
pub const CONFIG_FILE_NAMES: [&str; 4] = [
    ".apk-trust.yaml",
    ".apk-trust.yml",
    ".apk-trust.json",
    ".apk-trust.toml",
];

impl Config {
    /// Load configuration from a file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.display().to_string(),
            source: e,
        })?;

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        let config: Config = match ext.as_str() {
            "yaml" | "yml" => serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseYaml {
                path: path.display().to_string(),
                source: e,
            })?,
            "json" => serde_json::from_str(&content).map_err(|e| ConfigError::ParseJson {
                path: path.display().to_string(),
                source: e,
            })?,
            "toml" => toml::from_str(&content).map_err(|e| ConfigError::ParseToml {
                path: path.display().to_string(),
                source: e,
            })?,
            _ => {
                return Err(ConfigError::UnsupportedFormat(
                    path.display().to_string(),
                    ext,
                ));
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the project directory or global config.
    ///
    /// Search order:
    /// 1. `.apk-trust.yaml` / `.yml` / `.json` / `.toml` in project root
    /// 2. `~/.config/apk-trust/config.yaml`
    /// 3. Default configuration
    ///
    /// Files that fail to load are skipped with a warning.
    pub fn load(project_root: Option<&Path>) -> Self {
        if let Some(root) = project_root {
            for filename in &CONFIG_FILE_NAMES {
                let path = root.join(filename);
                if path.exists()
                    && let Some(config) = Self::try_load(&path)
                {
                    return config;
                }
            }
        }

        if let Some(config_dir) = dirs::config_dir() {
            let global_config = config_dir.join("apk-trust").join("config.yaml");
            if global_config.exists()
                && let Some(config) = Self::try_load(&global_config)
            {
                return config;
            }
        }

        debug!("No config file found, using defaults");
        Self::default()
    }

    fn try_load(path: &Path) -> Option<Self> {
        match Self::from_file(path) {
            Ok(config) => {
                debug!(path = %path.display(), "Loaded config");
                Some(config)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Ignoring unusable config file");
                None
            }
        }
    }
}
