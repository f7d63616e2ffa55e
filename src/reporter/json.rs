use crate::reporter::{Assessment, Reporter};

pub struct JsonReporter;

impl JsonReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for JsonReporter {
    fn report(&self, assessment: &Assessment) -> String {
        serde_json::to_string_pretty(assessment).unwrap_or_else(|e| {
            format!(r#"{{"error": "Failed to serialize assessment: {}"}}"#, e)
        })
    }
}
