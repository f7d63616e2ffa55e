use apk_trust::{Cli, handlers::dispatch, logging::init_tracing};
use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    dispatch(&cli)
}
