use crate::report::{
    ClassifierVerdict, PermissionEntry, PermissionStatus, PredictedLabel, SecurityScore,
    TrustReport, TrustStatus,
};
use crate::reporter::{Assessment, Reporter};
use colored::Colorize;

pub struct TerminalReporter {
    verbose: bool,
    /// Include normal-status permissions in the listing
    all_permissions: bool,
}

impl TerminalReporter {
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            all_permissions: verbose,
        }
    }

    pub fn with_all_permissions(mut self, show: bool) -> Self {
        self.all_permissions = show;
        self
    }

    fn status_color(&self, status: TrustStatus) -> colored::ColoredString {
        match status {
            TrustStatus::Safe => status.as_str().green().bold(),
            TrustStatus::Dangerous => status.as_str().red().bold(),
        }
    }

    fn label_color(&self, label: PredictedLabel) -> colored::ColoredString {
        match label {
            PredictedLabel::Safe => label.as_str().green(),
            PredictedLabel::Malicious => label.as_str().red(),
        }
    }

    fn permission_color(&self, status: PermissionStatus) -> colored::ColoredString {
        let label = format!("[{}]", status.as_str());
        match status {
            PermissionStatus::Dangerous => label.red().bold(),
            PermissionStatus::Warning => label.yellow(),
            PermissionStatus::Normal => label.dimmed(),
        }
    }

    fn score_color(&self, score: SecurityScore) -> colored::ColoredString {
        match score.value() {
            Some(v) if v >= 70.0 => score.to_string().green(),
            Some(v) if v >= 40.0 => score.to_string().yellow(),
            Some(_) => score.to_string().red(),
            None => score.to_string().dimmed(),
        }
    }

    fn format_model(&self, verdict: &ClassifierVerdict) -> String {
        let confidence = verdict
            .confidence
            .map(|c| format!("{:.2}", c))
            .unwrap_or_else(|| "-".to_string());

        let mut line = format!(
            "  {:<24} {:<10} confidence {:>5}",
            verdict.model_name,
            self.label_color(verdict.predicted_label),
            confidence
        );

        if self.verbose {
            if let Some(accuracy) = verdict.accuracy {
                line.push_str(&format!("  accuracy {:.2}", accuracy));
            }
            if let Some(ref raw) = verdict.raw_label {
                line.push_str(&format!("  {}", format!("({})", raw).dimmed()));
            }
        }

        line.push('\n');
        line
    }

    fn format_permission(&self, permission: &PermissionEntry) -> String {
        let mut line = format!(
            "  {} {}\n",
            self.permission_color(permission.status),
            permission.name
        );
        if self.verbose && !permission.description.is_empty() {
            line.push_str(&format!("      {}\n", permission.description.dimmed()));
        }
        line
    }

    fn format_report(&self, report: &TrustReport) -> String {
        let mut output = String::new();
        let votes = report.votes();

        output.push_str(&format!(
            "{}\n\n",
            format!("━━━ STATUS: {} ━━━", self.status_color(report.status())).bold()
        ));
        output.push_str(&format!(
            "Average confidence: {:.2}\n",
            report.average_confidence()
        ));
        output.push_str(&format!(
            "Security score:     {}\n",
            self.score_color(report.security_score())
        ));
        output.push_str(&format!(
            "Safe votes:         {}/{} (required {})\n\n",
            votes.safe, votes.total, votes.required
        ));

        if report.model_breakdown().is_empty() {
            output.push_str(&"No classifier verdicts in report.\n".yellow().to_string());
        } else {
            output.push_str("Model Breakdown:\n");
            for verdict in report.model_breakdown() {
                output.push_str(&self.format_model(verdict));
            }
        }

        let permissions: Vec<_> = report
            .permissions()
            .iter()
            .filter(|p| self.all_permissions || p.status != PermissionStatus::Normal)
            .collect();

        if !permissions.is_empty() {
            output.push_str("\nPermissions:\n");
            for permission in permissions {
                output.push_str(&self.format_permission(permission));
            }
        }

        output
    }
}

impl Reporter for TerminalReporter {
    fn report(&self, assessment: &Assessment) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{}\n\n",
            format!("apk-trust v{} - APK Trust Assessment", assessment.version).bold()
        ));
        output.push_str(&format!("Source: {}\n\n", assessment.origin));

        let Some(ref report) = assessment.report else {
            output.push_str(&"No report data found.\n".yellow().to_string());
            return output;
        };

        output.push_str(&self.format_report(report));
        output.push_str(&format!("{}\n", "━".repeat(50)));

        let exit_code = match report.status() {
            TrustStatus::Safe => 0,
            TrustStatus::Dangerous => 1,
        };
        output.push_str(&format!(
            "Result: {} (exit code {})\n",
            self.status_color(report.status()),
            exit_code
        ));

        output
    }
}
