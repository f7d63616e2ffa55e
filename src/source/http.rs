//! Analysis backend client.
//!
//! Endpoints used:
//! - `GET /api/report/latest` – most recent analysis
//! - `GET /api/report/{analysis_id}` – a specific analysis
//! - `GET /api/health` – backend liveness and loaded model count

use super::{ReportSource, SourceError, parse_body};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

/// Default backend address
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Which report to request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ReportTarget {
    #[default]
    Latest,
    Analysis(String),
}

impl ReportTarget {
    /// Builds a target for an analysis id. Ids are placed in the URL path, so only
    /// ASCII letters, digits, `-` and `_` are accepted.
    pub fn analysis(id: &str) -> Result<Self, SourceError> {
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if valid {
            Ok(ReportTarget::Analysis(id.to_string()))
        } else {
            Err(SourceError::InvalidAnalysisId(id.to_string()))
        }
    }

    fn path(&self) -> String {
        match self {
            ReportTarget::Latest => "/api/report/latest".to_string(),
            ReportTarget::Analysis(id) => format!("/api/report/{}", id),
        }
    }
}

/// Body of `GET /api/health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub models_loaded: usize,
    #[serde(default)]
    pub feature_columns: usize,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

#[derive(Debug, Clone)]
pub struct HttpReportSource {
    client: reqwest::Client,
    base_url: String,
    target: ReportTarget,
    timeout: Duration,
}

impl HttpReportSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, SourceError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| SourceError::Transport {
                url: base_url.clone(),
                source,
            })?;

        Ok(Self {
            client,
            base_url,
            target: ReportTarget::Latest,
            timeout,
        })
    }

    pub fn with_target(mut self, target: ReportTarget) -> Self {
        self.target = target;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn report_url(&self) -> String {
        format!("{}{}", self.base_url, self.target.path())
    }

    pub fn health_url(&self) -> String {
        format!("{}/api/health", self.base_url)
    }

    /// Queries backend health.
    pub async fn health(&self) -> Result<HealthStatus, SourceError> {
        let url = self.health_url();
        let body = self.get_json(&url).await?;
        serde_json::from_value(body).map_err(|source| SourceError::Parse { origin: url, source })
    }

    async fn get_json(&self, url: &str) -> Result<Value, SourceError> {
        debug!(url, timeout_secs = self.timeout.as_secs(), "Requesting report");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.request_error(url, e))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.request_error(url, e))?;

        if !status.is_success() {
            return Err(SourceError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                message: error_message(&bytes)
                    .or_else(|| status.canonical_reason().map(str::to_string))
                    .unwrap_or_else(|| "request failed".to_string()),
            });
        }

        info!(url, bytes = bytes.len(), "Received report body");
        parse_body(url, &bytes)
    }

    fn request_error(&self, url: &str, err: reqwest::Error) -> SourceError {
        if err.is_timeout() {
            SourceError::Timeout {
                url: url.to_string(),
                timeout_secs: self.timeout.as_secs(),
            }
        } else {
            SourceError::Transport {
                url: url.to_string(),
                source: err,
            }
        }
    }
}

impl ReportSource for HttpReportSource {
    fn origin(&self) -> String {
        self.report_url()
    }

    async fn fetch(&self) -> Result<Value, SourceError> {
        self.get_json(&self.report_url()).await
    }
}

/// The backend reports failures as `{"error": "..."}`.
fn error_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    value.get("error")?.as_str().map(str::to_string)
}
