//! Decision core: turns classifier verdicts and a static-analysis payload into a
//! [`TrustReport`].
//!
//! Everything in this module is synchronous and side-effect free.
//!
//! - `field`: ordered fallback lookup over loosely shaped JSON
//! - `score`: security score resolution
//! - `confidence`: mean classifier confidence
//! - `verdict`: safe-vote threshold policy
//! - `permissions`: declared permission listing
//! - `payload`: backend body → [`ScanReport`]
//! - `assembler`: composition into a [`TrustReport`]

pub mod assembler;
pub mod confidence;
pub mod field;
pub mod payload;
pub mod permissions;
pub mod score;
pub mod types;
pub mod verdict;

pub use assembler::{AssemblyPolicy, TrustReportAssembler};
pub use confidence::summarize_confidence;
pub use field::{FieldPath, Resolved, resolve};
pub use payload::{DEFAULT_SAFE_LABEL, LabelMap, PayloadError};
pub use permissions::{PermissionEntry, PermissionStatus, extract_permissions};
pub use score::{SCORE_CANDIDATES, normalize_score};
pub use types::{
    ClassifierVerdict, PredictedLabel, ScanReport, SecurityScore, TrustReport, TrustStatus,
};
pub use verdict::{ParseThresholdError, VoteTally, VoteThreshold, aggregate_verdicts};
