use serde::Serialize;
use serde_json::Value;

/// Risk classification the static analyser assigns to a declared permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionStatus {
    Normal,
    Warning,
    Dangerous,
}

impl PermissionStatus {
    /// Unrecognised statuses are shown as normal.
    pub fn from_report(status: &str) -> Self {
        match status.trim().to_lowercase().as_str() {
            "dangerous" => PermissionStatus::Dangerous,
            "warning" => PermissionStatus::Warning,
            _ => PermissionStatus::Normal,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionStatus::Normal => "normal",
            PermissionStatus::Warning => "warning",
            PermissionStatus::Dangerous => "dangerous",
        }
    }
}

impl std::fmt::Display for PermissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermissionEntry {
    pub name: String,
    pub status: PermissionStatus,
    pub info: String,
    pub description: String,
}

/// Declared permissions listed in the static-analysis payload under `permissions`.
///
/// Entries are ordered by permission name. Anything other than an object map yields an
/// empty list.
pub fn extract_permissions(static_analysis: Option<&Value>) -> Vec<PermissionEntry> {
    let Some(Value::Object(map)) = static_analysis.and_then(|p| p.get("permissions")) else {
        return Vec::new();
    };

    let mut entries: Vec<PermissionEntry> = map
        .iter()
        .map(|(name, details)| match details {
            Value::Object(fields) => PermissionEntry {
                name: name.clone(),
                status: fields
                    .get("status")
                    .and_then(Value::as_str)
                    .map(PermissionStatus::from_report)
                    .unwrap_or(PermissionStatus::Normal),
                info: text_field(fields.get("info")),
                description: text_field(fields.get("description")),
            },
            other => PermissionEntry {
                name: name.clone(),
                status: PermissionStatus::Normal,
                info: text_field(Some(other)),
                description: String::new(),
            },
        })
        .collect();

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    entries
}

fn text_field(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
