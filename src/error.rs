use crate::config::ConfigError;
use crate::source::SourceError;
use crate::view::Failure;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrustError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("{}", .0.message)]
    Load(Failure),

    #[error("Failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TrustError>;
