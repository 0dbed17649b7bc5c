//! audiograb CLI entry point.

use anyhow::Result;
use audiograb::cli::{commands, Cli, Commands};
use audiograb::config::{ConfigStore, Settings};
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("audiograb={}", log_level)),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let store = match &cli.config {
        Some(path) => ConfigStore::new(Settings::expand_path(path)),
        None => ConfigStore::at_default_location(),
    };

    match cli.command {
        Commands::Download {
            input,
            list,
            dest,
            yt_dlp,
            tool_output,
        } => {
            let options = commands::DownloadOptions {
                input,
                list,
                dest,
                yt_dlp,
                tool_output,
            };
            if commands::run_download(options, store).await? == commands::DownloadOutcome::Rejected {
                return Ok(ExitCode::FAILURE);
            }
        }

        Commands::Doctor { yt_dlp } => {
            commands::run_doctor(&yt_dlp, &store)?;
        }

        Commands::Config { action } => {
            commands::run_config(&action, &store)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
