use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};

use winroute::cli::CliArgs;
use winroute::error::AppError;

fn main() -> ExitCode {
    let cli = CliArgs::parse();

    tracing_subscriber::fmt()
        .with_env_filter(cli.log_level())
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "Starting winroute");

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "Fatal error");
            ExitCode::FAILURE
        }
    }
}

#[cfg(windows)]
fn run(cli: &CliArgs) -> Result<(), AppError> {
    use winroute::routing::sys::SystemIpHelper;

    winroute::app::run(SystemIpHelper::new(), cli.gateway_address())
}

#[cfg(not(windows))]
fn run(_cli: &CliArgs) -> Result<(), AppError> {
    Err(AppError::UnsupportedPlatform)
}
