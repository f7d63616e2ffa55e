//! CLI command handlers.
//!
//! This module contains the handler functions for CLI commands,
//! separated from main.rs to enable unit testing.

mod assess;
mod health;
mod settings;

use crate::cli::{Cli, Command};
use std::path::PathBuf;
use std::process::ExitCode;

pub use assess::{exit_code, handle_assess, handle_report, load_assessment, render};
pub use health::handle_health;
pub use settings::resolve_config;

/// Exit code for a dangerous verdict or an unhealthy backend.
pub const EXIT_DANGEROUS: u8 = 1;
/// Exit code for configuration, fetch or parse errors.
pub const EXIT_ERROR: u8 = 2;

/// Runs the parsed command line.
pub fn dispatch(cli: &Cli) -> ExitCode {
    match cli.command {
        Command::Report(ref args) => handle_report(cli, args),
        Command::Assess { ref path } => handle_assess(cli, path),
        Command::Health(ref args) => handle_health(cli, args),
    }
}

fn current_dir() -> Option<PathBuf> {
    std::env::current_dir().ok()
}
