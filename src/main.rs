//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `publish_fanout` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - Ctrl-C handling
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;
use tokio_util::sync::CancellationToken;

use publish_fanout::app::{cancel_on_ctrl_c, shutdown_gracefully};
use publish_fanout::initialization::init_logger_with;
use publish_fanout::report::write_json;
use publish_fanout::{run_publish_with_cancel, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Credentials can live in .env as PUBLISH_USER_EMAIL / PUBLISH_USER_PASSWORD
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let config = Config::parse();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    let print_report = config.output.is_none();

    let cancel = CancellationToken::new();
    let listener = cancel_on_ctrl_c(cancel.clone());

    let outcome = run_publish_with_cancel(config, cancel.clone()).await;
    shutdown_gracefully(cancel, listener).await;

    match outcome {
        Ok(report) => {
            if print_report {
                write_json(&report, None).context("Failed to write report")?;
            }
            eprintln!(
                "✅ Published {}/{} post{} across {} destination{} ({}%) in {:.1}s{}",
                report.summary.total_successful,
                report.summary.total_attempted,
                if report.summary.total_attempted == 1 { "" } else { "s" },
                report.summary.total_sites,
                if report.summary.total_sites == 1 { "" } else { "s" },
                report.summary.overall_success_rate,
                report.elapsed_seconds,
                if report.cancelled { " (cancelled)" } else { "" }
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("publish_fanout error: {:#}", e);
            process::exit(1);
        }
    }
}
