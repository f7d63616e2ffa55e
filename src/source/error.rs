use crate::report::PayloadError;
use thiserror::Error;

/// Errors raised while obtaining a report body.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Connection or protocol failure
    #[error("Failed to reach {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Backend answered with a non-success status
    #[error("HTTP {status} from {url}: {message}")]
    Status {
        url: String,
        status: u16,
        message: String,
    },

    /// No response within the configured bound
    #[error("Request to {url} timed out after {timeout_secs}s")]
    Timeout { url: String, timeout_secs: u64 },

    /// Local report file could not be read
    #[error("Failed to read report {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Analysis IDs are interpolated into the URL path
    #[error("Invalid analysis id: {0}")]
    InvalidAnalysisId(String),

    /// Body is not valid JSON
    #[error("Report from {origin} is not valid JSON: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    /// Body is JSON but not a report
    #[error("Malformed report: {0}")]
    Payload(#[from] PayloadError),

    /// Superseded or abandoned before completion
    #[error("Report fetch was cancelled")]
    Cancelled,
}

/// Coarse classification used by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Parse,
    Cancelled,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Transport => "transport",
            ErrorKind::Parse => "parse",
            ErrorKind::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl SourceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SourceError::Transport { .. }
            | SourceError::Status { .. }
            | SourceError::Timeout { .. }
            | SourceError::Io { .. }
            | SourceError::InvalidAnalysisId(_) => ErrorKind::Transport,
            SourceError::Parse { .. } | SourceError::Payload(_) => ErrorKind::Parse,
            SourceError::Cancelled => ErrorKind::Cancelled,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, SourceError::Cancelled)
    }
}
