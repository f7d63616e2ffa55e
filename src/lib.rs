pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod report;
pub mod reporter;
pub mod source;
pub mod view;

#[cfg(test)]
pub mod test_utils;

pub use cli::{Cli, Command, OutputFormat};
pub use config::Config;
pub use error::{Result, TrustError};
pub use report::{
    AssemblyPolicy, ClassifierVerdict, PredictedLabel, ScanReport, SecurityScore, TrustReport,
    TrustReportAssembler, TrustStatus, VoteThreshold,
};
pub use reporter::{Assessment, JsonReporter, Reporter, TerminalReporter};
pub use source::{FileReportSource, HttpReportSource, ReportSource, SourceError};
pub use view::{ReportView, ViewState};
