//! Failures while reading `.apk-trust.{yaml,yml,json,toml}` or an explicit `--config` file.

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse YAML config {path}: {source}")]
    ParseYaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to parse JSON config {path}: {source}")]
    ParseJson {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse TOML config {path}: {source}")]
    ParseToml {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// Path and extension of a `--config` file the loader has no parser for.
    #[error("Unsupported config format for {0}: .{1}")]
    UnsupportedFormat(String, String),

    /// Raised by `Config::validate` after all overrides are applied. `field` is the dotted
    /// settings key, e.g. `source.timeout_secs`.
    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: &'static str, message: String },
}
