//! Report sources: where backend report bodies come from.
//!
//! The decision core never performs I/O. A [`ReportSource`] delivers one parsed JSON body
//! (or an error) per fetch; everything after that is pure.
//!
//! - `http`: the analysis backend's REST API
//! - `file`: a report saved to disk, or stdin
//! - `cancel`: consumer-scoped cancellation for in-flight fetches

pub mod cancel;
pub mod error;
pub mod file;
pub mod http;

pub use cancel::{CancelHandle, CancelToken, cancel_pair, fetch_cancellable};
pub use error::{ErrorKind, SourceError};
pub use file::FileReportSource;
pub use http::{
    DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, HealthStatus, HttpReportSource, ReportTarget,
};

use serde_json::Value;
use std::future::Future;

pub trait ReportSource {
    /// Human-readable location, used in logs and output.
    fn origin(&self) -> String;

    /// Retrieves one report body. Not retried.
    fn fetch(&self) -> impl Future<Output = Result<Value, SourceError>> + Send;
}

/// Parses a raw body, attributing failures to `origin`.
pub(crate) fn parse_body(origin: &str, bytes: &[u8]) -> Result<Value, SourceError> {
    serde_json::from_slice(bytes).map_err(|source| SourceError::Parse {
        origin: origin.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_body() {
        let value = parse_body("test", br#"{"ml_results": []}"#).unwrap();
        assert!(value["ml_results"].is_array());
    }

    #[test]
    fn test_parse_body_error_names_origin() {
        let err = parse_body("report.json", b"<html>").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert!(err.to_string().starts_with("Report from report.json is not valid JSON"));
    }
}
