//! `report` and `assess` handlers.

use crate::cli::{Cli, OutputFormat, ReportArgs};
use crate::config::Config;
use crate::error::{Result, TrustError};
use crate::report::{TrustReportAssembler, TrustStatus};
use crate::reporter::{Assessment, JsonReporter, Reporter, TerminalReporter};
use crate::source::{
    FileReportSource, HttpReportSource, ReportSource, ReportTarget, SourceError,
};
use crate::view::{ReportView, ViewState};
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;
use tracing::{debug, warn};

use super::{EXIT_DANGEROUS, EXIT_ERROR, current_dir, resolve_config};

/// Handle `apk-trust report`: fetch from the analysis backend.
pub fn handle_report(cli: &Cli, args: &ReportArgs) -> ExitCode {
    let config = match resolve_config(cli, Some(&args.backend), current_dir().as_deref()) {
        Ok(c) => c,
        Err(e) => return report_error(&TrustError::from(e)),
    };

    let source = match http_source(&config, args.id.as_deref()) {
        Ok(s) => s,
        Err(e) => return report_error(&TrustError::from(e)),
    };

    run_assessment(&source, &config, cli.verbose)
}

/// Handle `apk-trust assess <path>`: read a saved report.
pub fn handle_assess(cli: &Cli, path: &Path) -> ExitCode {
    let config = match resolve_config(cli, None, current_dir().as_deref()) {
        Ok(c) => c,
        Err(e) => return report_error(&TrustError::from(e)),
    };

    run_assessment(&FileReportSource::new(path), &config, cli.verbose)
}

fn http_source(
    config: &Config,
    id: Option<&str>,
) -> std::result::Result<HttpReportSource, SourceError> {
    let source = HttpReportSource::new(&config.source.base_url, config.source.timeout())?;
    Ok(match id {
        Some(id) => source.with_target(ReportTarget::analysis(id)?),
        None => source,
    })
}

fn run_assessment<S: ReportSource>(source: &S, config: &Config, verbose: bool) -> ExitCode {
    match load_assessment(source, config) {
        Ok(assessment) => {
            let format = config.output.format.unwrap_or_default();
            println!("{}", render(&assessment, format, verbose));
            exit_code(&assessment)
        }
        Err(e) => report_error(&e),
    }
}

/// Loads one report through a [`ReportView`], abandoning it on Ctrl-C.
pub fn load_assessment<S: ReportSource>(source: &S, config: &Config) -> Result<Assessment> {
    let runtime = tokio::runtime::Runtime::new().map_err(TrustError::Runtime)?;
    let assembler = TrustReportAssembler::new(config.assembly_policy());
    let mut view = ReportView::new();

    debug!(origin = %source.origin(), threshold = %config.verdict.threshold, "Loading report");

    let interrupted = runtime.block_on(async {
        tokio::select! {
            _ = view.load(source, &assembler) => false,
            Ok(()) = tokio::signal::ctrl_c() => true,
        }
    });

    if interrupted {
        warn!("Interrupted, abandoning report fetch");
        view.cancel();
    }

    match view.state() {
        ViewState::Loaded(report) => Ok(Assessment::new(source.origin(), Some(report.clone()))),
        ViewState::Empty => Ok(Assessment::new(source.origin(), None)),
        ViewState::Failed(failure) => Err(TrustError::Load(failure.clone())),
        ViewState::Idle | ViewState::Loading => Err(SourceError::Cancelled.into()),
    }
}

pub fn render(assessment: &Assessment, format: OutputFormat, verbose: bool) -> String {
    match format {
        OutputFormat::Terminal => TerminalReporter::new(verbose).report(assessment),
        OutputFormat::Json => JsonReporter::new().report(assessment),
    }
}

/// 0 for a safe or empty report, 1 for a dangerous one.
pub fn exit_code(assessment: &Assessment) -> ExitCode {
    match assessment.report.as_ref().map(|r| r.status()) {
        Some(TrustStatus::Dangerous) => ExitCode::from(EXIT_DANGEROUS),
        Some(TrustStatus::Safe) | None => ExitCode::SUCCESS,
    }
}

fn report_error(err: &TrustError) -> ExitCode {
    eprintln!("{} {}", "Error:".red(), err);
    ExitCode::from(EXIT_ERROR)
}
