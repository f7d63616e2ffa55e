pub mod json;
pub mod terminal;

use crate::report::TrustReport;
use chrono::Utc;
use serde::Serialize;

pub use json::JsonReporter;
pub use terminal::TerminalReporter;

/// One assessment run: where the report came from and what it concluded.
///
/// `report` is `None` when the backend had no data for the package.
#[derive(Debug, Clone, Serialize)]
pub struct Assessment {
    pub version: String,
    pub assessed_at: String,
    pub origin: String,
    pub report: Option<TrustReport>,
}

impl Assessment {
    pub fn new(origin: impl Into<String>, report: Option<TrustReport>) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            assessed_at: Utc::now().to_rfc3339(),
            origin: origin.into(),
            report,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.report.is_none()
    }
}

pub trait Reporter {
    fn report(&self, assessment: &Assessment) -> String;
}
