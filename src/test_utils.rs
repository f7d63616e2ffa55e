#[cfg(test)]
pub mod fixtures {
    use crate::report::{
        AssemblyPolicy, ClassifierVerdict, PredictedLabel, ScanReport, TrustReport,
        TrustReportAssembler,
    };
    use serde_json::{Value, json};

    /// Three-model backend payload: two safe votes, mean confidence 0.63, score 72.
    pub fn three_model_body() -> Value {
        json!({
            "ml_results": [
                {"Model": "RandomForest", "Hasil_Prediksi": "Terlihat Aman", "Kepercayaan_Berbahaya": 0.6},
                {"Model": "SVM", "Hasil_Prediksi": "Terlihat Aman", "Kepercayaan_Berbahaya": 0.8},
                {"Model": "XGBoost", "Hasil_Prediksi": "Berbahaya", "Kepercayaan_Berbahaya": 0.5}
            ],
            "mobsf_report": {
                "security_score": 72,
                "permissions": {
                    "android.permission.INTERNET": {
                        "status": "normal",
                        "info": "full Internet access",
                        "description": "Allows the app to create network sockets."
                    },
                    "android.permission.READ_SMS": {
                        "status": "dangerous",
                        "info": "read SMS or MMS",
                        "description": "Allows the app to read SMS messages."
                    }
                }
            }
        })
    }

    pub fn safe_verdict(model: &str, confidence: f64) -> ClassifierVerdict {
        ClassifierVerdict::new(model, PredictedLabel::Safe)
            .with_raw_label("Terlihat Aman")
            .with_confidence(confidence)
    }

    pub fn malicious_verdict(model: &str, confidence: f64) -> ClassifierVerdict {
        ClassifierVerdict::new(model, PredictedLabel::Malicious)
            .with_raw_label("Berbahaya")
            .with_confidence(confidence)
    }

    pub fn assemble(scan: &ScanReport) -> TrustReport {
        TrustReportAssembler::new(AssemblyPolicy::default()).assemble(scan)
    }

    pub fn safe_report() -> TrustReport {
        TrustReportAssembler::new(AssemblyPolicy::default())
            .assemble_value(&three_model_body())
            .unwrap()
            .unwrap()
    }

    pub fn dangerous_report() -> TrustReport {
        assemble(&ScanReport::new(
            vec![
                malicious_verdict("RandomForest", 0.9),
                malicious_verdict("SVM", 0.7),
            ],
            None,
        ))
    }
}
