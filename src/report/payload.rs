//! Mapping from the backend's JSON body to a [`ScanReport`].
//!
//! The analysis backend has shipped three row layouts for classifier results
//! (`Hasil_Prediksi`, `Hasil Prediksi`, `prediction`, ...), so every verdict field is read
//! through an ordered candidate list. Malformed rows and fields degrade; they never fail the
//! whole payload. A row that cannot be read still counts as a (malicious) vote.
//!
//! The legacy `Hasil Prediksi` layout labels packages `Aman` / `Waspada` / `Berbahaya`
//! rather than `Terlihat Aman`. Deployments still on that backend need
//! `safe_labels: [Aman]` (or `--safe-label Aman`).

use super::field::{FieldPath, as_f64, resolve, resolve_f64, resolve_text};
use super::types::{ClassifierVerdict, PredictedLabel, ScanReport};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

pub const VERDICTS_KEY: &str = "ml_results";
pub const STATIC_ANALYSIS_KEY: &str = "mobsf_report";

const VERDICTS_PATH: FieldPath = FieldPath::new(&[VERDICTS_KEY]);
const STATIC_ANALYSIS_PATH: FieldPath = FieldPath::new(&[STATIC_ANALYSIS_KEY]);

/// Label the classifiers emit for a package they consider safe.
pub const DEFAULT_SAFE_LABEL: &str = "Terlihat Aman";

const LABEL_CANDIDATES: [FieldPath; 3] = [
    FieldPath::new(&["Hasil_Prediksi"]),
    FieldPath::new(&["Hasil Prediksi"]),
    FieldPath::new(&["prediction"]),
];

const CONFIDENCE_CANDIDATES: [FieldPath; 3] = [
    FieldPath::new(&["Kepercayaan_Berbahaya"]),
    FieldPath::new(&["Kepercayaan (Berbahaya)"]),
    FieldPath::new(&["confidence"]),
];

const MODEL_CANDIDATES: [FieldPath; 3] = [
    FieldPath::new(&["Model"]),
    FieldPath::new(&["model"]),
    FieldPath::new(&["model_name"]),
];

const ACCURACY_CANDIDATES: [FieldPath; 2] = [
    FieldPath::new(&["Akurasi (saat Training)"]),
    FieldPath::new(&["accuracy"]),
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    #[error("report body must be a JSON object, found {found}")]
    NotAnObject { found: &'static str },
}

/// Set of raw labels that map to [`PredictedLabel::Safe`]. Matching is exact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelMap {
    safe_labels: Vec<String>,
}

impl Default for LabelMap {
    fn default() -> Self {
        Self {
            safe_labels: vec![DEFAULT_SAFE_LABEL.to_string()],
        }
    }
}

impl LabelMap {
    pub fn new<I, S>(safe_labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            safe_labels: safe_labels.into_iter().map(Into::into).collect(),
        }
    }

    pub fn safe_labels(&self) -> &[String] {
        &self.safe_labels
    }

    /// Anything that is not a configured safe label, including a missing label, is malicious.
    pub fn classify(&self, raw_label: Option<&str>) -> PredictedLabel {
        match raw_label {
            Some(label) if self.safe_labels.iter().any(|s| s == label) => PredictedLabel::Safe,
            _ => PredictedLabel::Malicious,
        }
    }
}

impl ScanReport {
    /// Reads a backend report body.
    ///
    /// Returns `Ok(None)` when the body carries no report content at all: a JSON `null`, or
    /// an object with neither classifier results nor a static-analysis report.
    pub fn from_value(value: &Value, labels: &LabelMap) -> Result<Option<Self>, PayloadError> {
        let body = match value {
            Value::Null => return Ok(None),
            Value::Object(_) => value,
            other => {
                return Err(PayloadError::NotAnObject {
                    found: json_kind(other),
                });
            }
        };

        let rows = VERDICTS_PATH.lookup(body);
        let static_analysis = STATIC_ANALYSIS_PATH.lookup(body);

        if rows.is_none() && static_analysis.is_none() {
            debug!("Report body has no classifier results and no static analysis");
            return Ok(None);
        }

        let verdicts = match rows {
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(index, row)| read_verdict(index, row, labels))
                .collect(),
            Some(other) => {
                warn!(found = json_kind(other), "Ignoring non-array classifier results");
                Vec::new()
            }
            None => Vec::new(),
        };

        Ok(Some(ScanReport::new(verdicts, static_analysis.cloned())))
    }
}

/// Every row counts as a vote. A row that is not an object is an unreadable vote and is
/// counted as malicious.
fn read_verdict(index: usize, row: &Value, labels: &LabelMap) -> ClassifierVerdict {
    if !row.is_object() {
        warn!(index, found = json_kind(row), "Counting malformed classifier row as malicious");
        return ClassifierVerdict::new(format!("model-{}", index + 1), PredictedLabel::Malicious);
    }

    let raw_label = resolve_text(row, &LABEL_CANDIDATES);
    let model_name =
        resolve_text(row, &MODEL_CANDIDATES).unwrap_or_else(|| format!("model-{}", index + 1));

    let mut verdict = ClassifierVerdict::new(model_name, labels.classify(raw_label.as_deref()));
    verdict.raw_label = raw_label;
    verdict.confidence = read_confidence(index, row);
    verdict.accuracy = resolve_f64(row, &ACCURACY_CANDIDATES);
    verdict
}

fn read_confidence(index: usize, row: &Value) -> Option<f64> {
    let value = resolve(row, &CONFIDENCE_CANDIDATES).value()?;
    match as_f64(value) {
        Some(c) if (0.0..=1.0).contains(&c) => Some(c),
        _ => {
            debug!(index, ?value, "Discarding confidence outside [0, 1]");
            None
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
