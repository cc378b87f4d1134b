use std::process::ExitCode;

use clap::Parser;
use gatepass_observability::LogFormat;

mod cli;
mod commands;
mod prompt;
mod render;

#[tokio::main]
async fn main() -> ExitCode {
    // .env values become visible to clap's env fallbacks
    let _ = dotenvy::dotenv();
    let cli = cli::Cli::parse();

    gatepass_observability::init(&cli.log_level, LogFormat::from_json_flag(cli.json_logs));
    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "gatepass starting");

    match commands::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
