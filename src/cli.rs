use crate::report::VoteThreshold;
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "apk-trust",
    version,
    about = "Consolidated trust verdicts for scanned Android packages",
    long_about = "apk-trust reconciles ML classifier verdicts and static-analysis output for a scanned APK into one trust report: a safe/dangerous status, the mean classifier confidence and the security score."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output format (overrides config)
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Safe votes required: "majority", "legacy" (fixed 2) or a number (overrides config)
    #[arg(short, long, global = true)]
    pub threshold: Option<VoteThreshold>,

    /// Classifier label counted as a safe vote; repeatable (overrides config)
    #[arg(long = "safe-label", global = true)]
    pub safe_labels: Vec<String>,

    /// Configuration file (YAML, JSON or TOML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch a report from the analysis backend and assess it
    Report(ReportArgs),

    /// Assess a report saved as JSON ("-" reads stdin)
    Assess {
        /// Report file
        path: PathBuf,
    },

    /// Check that the analysis backend is up
    Health(BackendArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct BackendArgs {
    /// Backend base URL (overrides config)
    #[arg(short, long)]
    pub url: Option<String>,

    /// Request timeout in seconds (overrides config)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ReportArgs {
    #[command(flatten)]
    pub backend: BackendArgs,

    /// Analysis id to fetch instead of the latest report
    #[arg(long)]
    pub id: Option<String>,
}
