//! Vote aggregation over classifier verdicts.
//!
//! A package is `Safe` when at least `t` classifiers labelled it safe. The threshold is a
//! policy choice, so it is always passed in explicitly:
//!
//! - [`VoteThreshold::Majority`] (default): `t = ceil(N / 2)` for `N` verdicts.
//! - [`VoteThreshold::Fixed`]: a constant `t` regardless of `N`. [`VoteThreshold::LEGACY`]
//!   (`t = 2`) is the rule earlier releases applied when every deployment ran three or four
//!   models.

use super::types::{ClassifierVerdict, TrustStatus};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "ThresholdRepr", into = "String")]
pub enum VoteThreshold {
    #[default]
    Majority,
    Fixed(usize),
}

impl VoteThreshold {
    /// Fixed two-vote rule of earlier releases.
    pub const LEGACY: VoteThreshold = VoteThreshold::Fixed(2);

    /// Number of safe votes required out of `total`. Never below one.
    pub fn required_votes(&self, total: usize) -> usize {
        match self {
            VoteThreshold::Majority => total.div_ceil(2).max(1),
            VoteThreshold::Fixed(n) => (*n).max(1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseThresholdError {
    #[error("vote threshold must be at least 1")]
    Zero,

    #[error("invalid vote threshold '{0}' (expected 'majority', 'legacy' or a positive integer)")]
    Invalid(String),
}

impl FromStr for VoteThreshold {
    type Err = ParseThresholdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "majority" => Ok(VoteThreshold::Majority),
            "legacy" => Ok(VoteThreshold::LEGACY),
            other => match other.parse::<usize>() {
                Ok(0) => Err(ParseThresholdError::Zero),
                Ok(n) => Ok(VoteThreshold::Fixed(n)),
                Err(_) => Err(ParseThresholdError::Invalid(s.to_string())),
            },
        }
    }
}

impl std::fmt::Display for VoteThreshold {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VoteThreshold::Majority => write!(f, "majority"),
            VoteThreshold::Fixed(n) => write!(f, "{}", n),
        }
    }
}

impl From<VoteThreshold> for String {
    fn from(threshold: VoteThreshold) -> Self {
        threshold.to_string()
    }
}

/// Config files may spell the threshold as a name or a bare integer.
#[derive(Deserialize)]
#[serde(untagged)]
enum ThresholdRepr {
    Count(usize),
    Name(String),
}

impl TryFrom<ThresholdRepr> for VoteThreshold {
    type Error = ParseThresholdError;

    fn try_from(repr: ThresholdRepr) -> Result<Self, Self::Error> {
        match repr {
            ThresholdRepr::Count(0) => Err(ParseThresholdError::Zero),
            ThresholdRepr::Count(n) => Ok(VoteThreshold::Fixed(n)),
            ThresholdRepr::Name(name) => name.parse(),
        }
    }
}

/// Safe-vote count against the threshold in force.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VoteTally {
    pub safe: usize,
    pub total: usize,
    pub required: usize,
}

impl VoteTally {
    pub fn count(verdicts: &[ClassifierVerdict], threshold: VoteThreshold) -> Self {
        let total = verdicts.len();
        Self {
            safe: verdicts.iter().filter(|v| v.is_safe()).count(),
            total,
            required: threshold.required_votes(total),
        }
    }

    pub fn is_met(&self) -> bool {
        self.safe >= self.required
    }
}

/// Reduces classifier verdicts to a binary trust status.
pub fn aggregate_verdicts(verdicts: &[ClassifierVerdict], threshold: VoteThreshold) -> TrustStatus {
    // No classifier spoke for the package.
    if verdicts.is_empty() {
        return TrustStatus::Dangerous;
    }

    if VoteTally::count(verdicts, threshold).is_met() {
        TrustStatus::Safe
    } else {
        TrustStatus::Dangerous
    }
}
