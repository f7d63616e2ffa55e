use super::field::{FieldPath, Resolved, as_f64, resolve};
use super::types::SecurityScore;
use serde_json::Value;
use tracing::debug;

/// Places a static-analysis report may carry its overall score, highest priority first.
pub const SCORE_CANDIDATES: [FieldPath; 3] = [
    FieldPath::new(&["security_score"]),
    FieldPath::new(&["score"]),
    FieldPath::new(&["analysis_info", "security_score"]),
];

/// Resolves the overall security score of a static-analysis payload.
///
/// The first present candidate decides the outcome. A present value that is not numeric
/// resolves to `Unknown` rather than falling through to lower-priority candidates.
pub fn normalize_score(static_analysis: Option<&Value>) -> SecurityScore {
    let Some(payload) = static_analysis else {
        return SecurityScore::Unknown;
    };

    match resolve(payload, &SCORE_CANDIDATES) {
        Resolved::Found { path, value } => match as_f64(value) {
            Some(score) => SecurityScore::Known(score),
            None => {
                debug!(%path, ?value, "Security score present but not numeric");
                SecurityScore::Unknown
            }
        },
        Resolved::Unknown => SecurityScore::Unknown,
    }
}
