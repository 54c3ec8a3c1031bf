//! publish_fanout library: multi-destination publishing with bounded retries
//!
//! This library takes one publish request (a video URL, title and description)
//! and fans it out sequentially across a destination catalog. Each post gets up
//! to three attempts, a failing destination never aborts the run, and the
//! results are rolled up into a per-destination and an overall report.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use publish_fanout::{summarize, Catalog, NoPacing, Orchestrator, PublishConfig,
//!                      SimulatedTransport, SuccessPolicy};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let transport = Arc::new(SimulatedTransport::seeded(42, SuccessPolicy::default()));
//! let orchestrator = Orchestrator::new(Catalog::builtin(), transport)
//!     .with_pacing(Arc::new(NoPacing));
//!
//! let request = PublishConfig {
//!     video_url: "https://vimeo.com/76979871".into(),
//!     title: "Launch video".into(),
//!     posts_per_site: 2,
//!     ..Default::default()
//! };
//! let results = orchestrator.publish(&request).await;
//! let report = summarize(&results);
//! println!("{} of {} posts succeeded", report.total_successful, report.total_attempted);
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime.

pub mod adapters;
pub mod app;
pub mod catalog;
pub mod config;
pub mod error_handling;
pub mod initialization;
pub mod models;
pub mod orchestrator;
pub mod pacing;
pub mod report;
pub mod retry;
pub mod transport;

// Re-export public API
pub use catalog::{Catalog, Category, Destination, DestinationFilter, DestinationKind, SuccessPolicy};
pub use config::{Config, LogFormat, LogLevel, TransportKind};
pub use error_handling::{CatalogError, ConfigError, FailureStats, FailureType, PublishError};
pub use models::{AttemptOutcome, AttemptStatus, DestinationResult, PublishConfig};
pub use orchestrator::Orchestrator;
pub use pacing::{FixedPacing, NoPacing, PacingPolicy};
pub use report::{summarize, AggregateReport};
pub use retry::RetryController;
pub use run::{load_request, run_publish, run_publish_with_cancel, PublishReport};
pub use transport::{HttpTransport, PublishTransport, SimulatedTransport};

// Internal run module (contains the CLI-facing publishing flow)
mod run {
    use anyhow::{Context, Result};
    use chrono::Utc;
    use log::{info, warn};
    use serde::Serialize;
    use std::path::Path;
    use std::sync::Arc;
    use tokio::io::AsyncReadExt;
    use tokio_util::sync::CancellationToken;

    use crate::app::{print_failure_statistics, print_summary};
    use crate::catalog::{Catalog, SuccessPolicy};
    use crate::config::{Config, TransportKind, ENV_USER_EMAIL, ENV_USER_PASSWORD};
    use crate::initialization::init_client;
    use crate::models::{DestinationResult, PublishConfig};
    use crate::orchestrator::Orchestrator;
    use crate::pacing::{FixedPacing, NoPacing, PacingPolicy};
    use crate::report::{export_csv, summarize, write_json, AggregateReport};
    use crate::transport::{HttpTransport, PublishTransport, SimulatedTransport};

    /// Results of a publishing run.
    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PublishReport {
        /// Run identifier (format: `run_<timestamp_millis>`)
        pub run_id: String,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
        /// Whether the run was cancelled before every destination was processed
        pub cancelled: bool,
        /// One entry per processed destination, in catalog order
        pub results: Vec<DestinationResult>,
        /// Overall rollup
        pub summary: AggregateReport,
    }

    /// Reads a publish request from a JSON file, or from stdin for `-`.
    ///
    /// Missing credentials are filled from `PUBLISH_USER_EMAIL` /
    /// `PUBLISH_USER_PASSWORD`.
    pub async fn load_request(path: &Path) -> Result<PublishConfig> {
        let text = if path.as_os_str() == "-" {
            info!("Reading publish request from stdin");
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .context("Failed to read publish request from stdin")?;
            buf
        } else {
            tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read publish request {}", path.display()))?
        };

        let mut request: PublishConfig =
            serde_json::from_str(&text).context("Failed to parse publish request JSON")?;
        if request.user_email.trim().is_empty() {
            if let Ok(email) = std::env::var(ENV_USER_EMAIL) {
                request.user_email = email;
            }
        }
        if request.user_password.is_empty() {
            if let Ok(password) = std::env::var(ENV_USER_PASSWORD) {
                request.user_password = password;
            }
        }
        Ok(request)
    }

    /// Runs a publishing job with the provided configuration.
    ///
    /// Loads the request and catalog, builds the transport, fans out, and
    /// writes the JSON report and CSV export if paths are configured.
    ///
    /// The request is validated first, so `postsPerSite = 0` is rejected here.
    /// Callers wanting the all-zero report for zero posts can drive
    /// [`Orchestrator`](crate::Orchestrator) directly.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be read or is invalid, the
    /// catalog file cannot be read, the HTTP client cannot be built, or an
    /// output file cannot be written. Destination failures never fail the run.
    pub async fn run_publish(config: Config) -> Result<PublishReport> {
        run_publish_with_cancel(config, CancellationToken::new()).await
    }

    /// Like [`run_publish`], stopping early once `cancel` fires.
    pub async fn run_publish_with_cancel(
        config: Config,
        cancel: CancellationToken,
    ) -> Result<PublishReport> {
        let request = load_request(&config.request).await?;
        request.validate().context("Invalid publish request")?;

        let catalog = match &config.catalog {
            Some(path) => Catalog::from_file(path)
                .await
                .with_context(|| format!("Failed to load catalog {}", path.display()))?,
            None => Catalog::builtin(),
        };
        if catalog.is_empty() {
            warn!("Destination catalog is empty, nothing to publish");
        }

        let transport: Arc<dyn PublishTransport> = match config.transport {
            TransportKind::Simulated => {
                let policy = SuccessPolicy::default();
                Arc::new(match config.seed {
                    Some(seed) => SimulatedTransport::seeded(seed, policy),
                    None => SimulatedTransport::from_os_rng(policy),
                })
            }
            TransportKind::Http => {
                let client = init_client(&config).context("Failed to initialize HTTP client")?;
                Arc::new(HttpTransport::new(client))
            }
        };
        let pacing: Arc<dyn PacingPolicy> = if config.no_pacing {
            Arc::new(NoPacing)
        } else {
            Arc::new(FixedPacing::default())
        };

        let orchestrator = Orchestrator::new(catalog, transport)
            .with_pacing(pacing)
            .with_kind(config.kind);

        let start_time_epoch = Utc::now().timestamp_millis();
        let run_id = format!("run_{}", start_time_epoch);
        info!("Starting run: {} ({:?} transport)", run_id, config.transport);

        let start_time = std::time::Instant::now();
        let results = orchestrator.publish_with_cancel(&request, &cancel).await;
        let elapsed_seconds = start_time.elapsed().as_secs_f64();

        let summary = summarize(&results);
        print_failure_statistics(&orchestrator.stats());
        print_summary(&summary, elapsed_seconds);

        let report = PublishReport {
            run_id,
            elapsed_seconds,
            cancelled: cancel.is_cancelled(),
            results,
            summary,
        };

        if let Some(path) = &config.output {
            write_json(&report, Some(path))?;
            info!("Report saved in {}", path.display());
        }
        if let Some(path) = &config.csv {
            export_csv(&report.results, path)?;
        }

        Ok(report)
    }
}
