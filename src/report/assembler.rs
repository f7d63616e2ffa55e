use super::confidence::summarize_confidence;
use super::payload::{LabelMap, PayloadError};
use super::permissions::extract_permissions;
use super::score::normalize_score;
use super::types::{ScanReport, TrustReport};
use super::verdict::{VoteTally, VoteThreshold, aggregate_verdicts};
use serde_json::Value;
use tracing::debug;

/// Decision policy applied while assembling trust reports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssemblyPolicy {
    pub threshold: VoteThreshold,
    pub labels: LabelMap,
}

impl AssemblyPolicy {
    pub fn with_threshold(mut self, threshold: VoteThreshold) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_labels(mut self, labels: LabelMap) -> Self {
        self.labels = labels;
        self
    }
}

/// Composes score, confidence and vote aggregation into one [`TrustReport`].
///
/// Assembly performs no I/O and is deterministic: the same [`ScanReport`] always yields
/// an equal report.
#[derive(Debug, Clone, Default)]
pub struct TrustReportAssembler {
    policy: AssemblyPolicy,
}

impl TrustReportAssembler {
    pub fn new(policy: AssemblyPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &AssemblyPolicy {
        &self.policy
    }

    pub fn assemble(&self, scan: &ScanReport) -> TrustReport {
        let static_analysis = scan.static_analysis.as_ref();

        let status = aggregate_verdicts(&scan.verdicts, self.policy.threshold);
        let votes = VoteTally::count(&scan.verdicts, self.policy.threshold);
        let average_confidence = summarize_confidence(&scan.verdicts);
        let security_score = normalize_score(static_analysis);
        let permissions = extract_permissions(static_analysis);

        debug!(
            %status,
            safe_votes = votes.safe,
            total_votes = votes.total,
            required_votes = votes.required,
            average_confidence,
            %security_score,
            "Assembled trust report"
        );

        TrustReport::new(
            status,
            average_confidence,
            security_score,
            votes,
            scan.verdicts.clone(),
            permissions,
        )
    }

    /// Reads a backend body with this assembler's label mapping and assembles it.
    ///
    /// `Ok(None)` means the body carried no report content.
    pub fn assemble_value(&self, body: &Value) -> Result<Option<TrustReport>, PayloadError> {
        Ok(ScanReport::from_value(body, &self.policy.labels)?.map(|scan| self.assemble(&scan)))
    }
}
