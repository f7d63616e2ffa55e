//! Fallback field resolution over loosely structured payloads.
//!
//! Static-analysis reports and classifier rows arrive in several shapes depending on the
//! backend version. Callers describe every place a value may live as an ordered list of
//! [`FieldPath`]s and take the first one that is present.

use serde_json::Value;

/// Sequence of object keys leading to a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPath(&'static [&'static str]);

impl FieldPath {
    pub const fn new(segments: &'static [&'static str]) -> Self {
        Self(segments)
    }

    pub fn segments(&self) -> &'static [&'static str] {
        self.0
    }

    /// Value at this path. `null` counts as absent, as does a missing or
    /// non-object segment at any depth.
    pub fn lookup<'a>(&self, payload: &'a Value) -> Option<&'a Value> {
        self.0
            .iter()
            .try_fold(payload, |node, key| node.get(*key))
            .filter(|value| !value.is_null())
    }
}

impl std::fmt::Display for FieldPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

/// Outcome of resolving a candidate list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolved<'a> {
    Found { path: FieldPath, value: &'a Value },
    Unknown,
}

impl<'a> Resolved<'a> {
    pub fn value(&self) -> Option<&'a Value> {
        match self {
            Resolved::Found { value, .. } => Some(value),
            Resolved::Unknown => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Resolved::Unknown)
    }
}

/// Returns the value at the first candidate path that is present.
pub fn resolve<'a>(payload: &'a Value, candidates: &[FieldPath]) -> Resolved<'a> {
    candidates
        .iter()
        .find_map(|path| {
            path.lookup(payload)
                .map(|value| Resolved::Found { path: *path, value })
        })
        .unwrap_or(Resolved::Unknown)
}

/// Interprets a JSON value as a finite number. Numeric strings are accepted.
pub fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite())
}

/// Like [`resolve`], then numeric validation of the winning value.
///
/// A present but malformed value yields `None`; later candidates are not consulted.
pub fn resolve_f64(payload: &Value, candidates: &[FieldPath]) -> Option<f64> {
    resolve(payload, candidates).value().and_then(as_f64)
}

/// Like [`resolve`], rendering scalars as text. Arrays and objects yield `None`.
pub fn resolve_text(payload: &Value, candidates: &[FieldPath]) -> Option<String> {
    match resolve(payload, candidates).value()? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
