mod cli;
mod environment;
mod error;
mod http;
mod testing;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{CliArgs, OutputFormat};
use testing::report::{render_json, render_text};
use testing::runner::Harness;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_tracing(args.verbose);

    let config = match args.harness_config(&args.config_sources()) {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "configuration error");
            eprintln!("ERROR: {err}");
            return ExitCode::FAILURE;
        }
    };

    let harness = match Harness::new(config) {
        Ok(harness) => harness,
        Err(err) => {
            tracing::error!(error = %err, "failed to initialise harness");
            return ExitCode::FAILURE;
        }
    };

    let report = harness.run_all().await;

    match args.format {
        OutputFormat::Text => print!("{}", render_text(&report)),
        OutputFormat::Json => match render_json(&report) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                tracing::error!(error = %err, "failed to serialize report");
                return ExitCode::FAILURE;
            }
        },
    }

    if report.all_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
