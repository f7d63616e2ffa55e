use super::permissions::PermissionEntry;
use super::verdict::VoteTally;
use serde::{Serialize, Serializer};
use serde_json::Value;

/// Categorical output of a single classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictedLabel {
    Safe,
    Malicious,
}

impl PredictedLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            PredictedLabel::Safe => "safe",
            PredictedLabel::Malicious => "malicious",
        }
    }
}

impl std::fmt::Display for PredictedLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One model's opinion on one scanned package.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifierVerdict {
    pub model_name: String,
    pub predicted_label: PredictedLabel,
    /// Label text exactly as the backend reported it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_label: Option<String>,
    /// Reported certainty in [0, 1].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    /// Training accuracy of the model, display only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
}

impl ClassifierVerdict {
    pub fn new(model_name: impl Into<String>, predicted_label: PredictedLabel) -> Self {
        Self {
            model_name: model_name.into(),
            predicted_label,
            raw_label: None,
            confidence: None,
            accuracy: None,
        }
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }

    pub fn with_accuracy(mut self, accuracy: f64) -> Self {
        self.accuracy = Some(accuracy);
        self
    }

    pub fn with_raw_label(mut self, raw_label: impl Into<String>) -> Self {
        self.raw_label = Some(raw_label.into());
        self
    }

    pub fn is_safe(&self) -> bool {
        self.predicted_label == PredictedLabel::Safe
    }
}

/// Raw scan input: classifier verdicts plus the static-analysis payload, if any.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScanReport {
    pub verdicts: Vec<ClassifierVerdict>,
    pub static_analysis: Option<Value>,
}

impl ScanReport {
    pub fn new(verdicts: Vec<ClassifierVerdict>, static_analysis: Option<Value>) -> Self {
        Self {
            verdicts,
            static_analysis,
        }
    }
}

/// Overall security score from static analysis.
///
/// `Unknown` is distinct from a score of zero and serializes as `"N/A"`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SecurityScore {
    Known(f64),
    #[default]
    Unknown,
}

impl SecurityScore {
    pub fn value(&self) -> Option<f64> {
        match self {
            SecurityScore::Known(v) => Some(*v),
            SecurityScore::Unknown => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, SecurityScore::Unknown)
    }
}

impl std::fmt::Display for SecurityScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SecurityScore::Known(v) => write!(f, "{}", v),
            SecurityScore::Unknown => write!(f, "N/A"),
        }
    }
}

impl Serialize for SecurityScore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SecurityScore::Known(v) => serializer.serialize_f64(*v),
            SecurityScore::Unknown => serializer.serialize_str("N/A"),
        }
    }
}

/// Binary trust verdict for the scanned package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrustStatus {
    Safe,
    Dangerous,
}

impl TrustStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrustStatus::Safe => "SAFE",
            TrustStatus::Dangerous => "DANGEROUS",
        }
    }
}

impl std::fmt::Display for TrustStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Consolidated result for one scan. Built only by the assembler and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrustReport {
    status: TrustStatus,
    average_confidence: f64,
    security_score: SecurityScore,
    votes: VoteTally,
    model_breakdown: Vec<ClassifierVerdict>,
    permissions: Vec<PermissionEntry>,
}

impl TrustReport {
    pub(crate) fn new(
        status: TrustStatus,
        average_confidence: f64,
        security_score: SecurityScore,
        votes: VoteTally,
        model_breakdown: Vec<ClassifierVerdict>,
        permissions: Vec<PermissionEntry>,
    ) -> Self {
        Self {
            status,
            average_confidence,
            security_score,
            votes,
            model_breakdown,
            permissions,
        }
    }

    pub fn status(&self) -> TrustStatus {
        self.status
    }

    pub fn average_confidence(&self) -> f64 {
        self.average_confidence
    }

    pub fn security_score(&self) -> SecurityScore {
        self.security_score
    }

    pub fn votes(&self) -> VoteTally {
        self.votes
    }

    pub fn model_breakdown(&self) -> &[ClassifierVerdict] {
        &self.model_breakdown
    }

    pub fn permissions(&self) -> &[PermissionEntry] {
        &self.permissions
    }
}
