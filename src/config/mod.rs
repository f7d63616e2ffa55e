//! Configuration layer for apk-trust.
//!
//! ## Layers
//! - `types`: Configuration type definitions
//! - `loading`: File discovery and parsing (YAML, JSON, TOML)
//! - `error`: Loading and validation errors
//!
//! CLI flags are applied on top of the loaded file by the command handlers.

mod error;
mod loading;
mod types;

pub use error::ConfigError;
pub use loading::CONFIG_FILE_NAMES;
pub use types::{Config, OutputConfig, SourceConfig, VerdictConfig};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use crate::report::{LabelMap, VoteThreshold};
    use std::fs;
    use std::path::Path;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.source.base_url, "http://localhost:5000");
        assert_eq!(config.source.timeout(), Duration::from_secs(30));
        assert_eq!(config.verdict.threshold, VoteThreshold::Majority);
        assert_eq!(config.verdict.safe_labels, LabelMap::default());
        assert_eq!(config.output.format, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_yaml_config() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join(".apk-trust.yaml");
        fs::write(
            &config_path,
            r#"
source:
  base_url: http://scanner.internal:8080
  timeout_secs: 5
verdict:
  threshold: legacy
  safe_labels:
    - Terlihat Aman
    - Aman
output:
  format: json
"#,
        )
        .unwrap();

        let config = Config::from_file(&config_path).unwrap();
        assert_eq!(config.source.base_url, "http://scanner.internal:8080");
        assert_eq!(config.source.timeout_secs, 5);
        assert_eq!(config.verdict.threshold, VoteThreshold::LEGACY);
        assert_eq!(
            config.verdict.safe_labels,
            LabelMap::new(["Terlihat Aman", "Aman"])
        );
        assert_eq!(config.output.format, Some(OutputFormat::Json));
    }

    #[test]
    fn test_load_json_config() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join(".apk-trust.json");
        fs::write(
            &config_path,
            r#"{"verdict": {"threshold": 3}, "source": {"timeout_secs": 12}}"#,
        )
        .unwrap();

        let config = Config::from_file(&config_path).unwrap();
        assert_eq!(config.verdict.threshold, VoteThreshold::Fixed(3));
        assert_eq!(config.source.timeout_secs, 12);
    }

    #[test]
    fn test_load_toml_config() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join(".apk-trust.toml");
        fs::write(
            &config_path,
            r#"
[source]
base_url = "http://10.0.0.2:5000"

[verdict]
threshold = "majority"
"#,
        )
        .unwrap();

        let config = Config::from_file(&config_path).unwrap();
        assert_eq!(config.source.base_url, "http://10.0.0.2:5000");
        assert_eq!(config.verdict.threshold, VoteThreshold::Majority);
    }

    #[test]
    fn test_load_with_project_config() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(".apk-trust.yaml"),
            "verdict:\n  threshold: 2\n",
        )
        .unwrap();

        let config = Config::load(Some(dir.path()));
        assert_eq!(config.verdict.threshold, VoteThreshold::Fixed(2));
    }

    #[test]
    fn test_load_skips_invalid_project_config() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".apk-trust.yaml"), "verdict: [unclosed\n").unwrap();
        fs::write(
            dir.path().join(".apk-trust.json"),
            r#"{"source": {"timeout_secs": 9}}"#,
        )
        .unwrap();

        let config = Config::load(Some(dir.path()));
        assert_eq!(config.source.timeout_secs, 9);
    }

    #[test]
    fn test_load_fallback_to_default() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(Some(dir.path()));
        assert_eq!(config.source.timeout_secs, 30);
    }

    #[test]
    fn test_unsupported_format_error() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join(".apk-trust.xml");
        fs::write(&config_path, "<config></config>").unwrap();

        let result = Config::from_file(&config_path);
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_, _))));
    }

    #[test]
    fn test_partial_config_with_defaults() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join(".apk-trust.yaml");
        fs::write(&config_path, "source:\n  timeout_secs: 3\n").unwrap();

        let config = Config::from_file(&config_path).unwrap();
        assert_eq!(config.source.timeout_secs, 3);
        assert_eq!(config.source.base_url, "http://localhost:5000");
        assert_eq!(config.verdict.threshold, VoteThreshold::Majority);
    }

    #[test]
    fn test_zero_threshold_rejected() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join(".apk-trust.yaml");
        fs::write(&config_path, "verdict:\n  threshold: 0\n").unwrap();

        let result = Config::from_file(&config_path);
        assert!(matches!(result, Err(ConfigError::ParseYaml { .. })));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join(".apk-trust.json");
        fs::write(&config_path, r#"{"source": {"timeout_secs": 0}}"#).unwrap();

        let result = Config::from_file(&config_path);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                field: "source.timeout_secs",
                ..
            })
        ));
    }

    #[test]
    fn test_empty_safe_labels_rejected() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join(".apk-trust.json");
        fs::write(&config_path, r#"{"verdict": {"safe_labels": []}}"#).unwrap();

        assert!(Config::from_file(&config_path).is_err());
    }

    #[test]
    fn test_config_error_read_file() {
        let result = Config::from_file(Path::new("/nonexistent/config.yaml"));
        assert!(matches!(result, Err(ConfigError::ReadFile { .. })));
    }

    #[test]
    fn test_assembly_policy_from_config() {
        let mut config = Config::default();
        config.verdict.threshold = VoteThreshold::LEGACY;
        config.verdict.safe_labels = LabelMap::new(["Aman"]);

        let policy = config.assembly_policy();
        assert_eq!(policy.threshold, VoteThreshold::LEGACY);
        assert_eq!(policy.labels.safe_labels(), ["Aman"]);
    }
}
