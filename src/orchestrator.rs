//! Sequential fan-out of one publish request across the catalog.
//!
//! Destinations are processed strictly in catalog order, posts strictly in
//! index order, and all retries of a post finish before the next post starts.
//! There is no interleaving, so the result order is always the catalog order.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use futures::FutureExt;
use log::{info, warn};
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;

use crate::app::log_progress;
use crate::catalog::{Catalog, Destination, DestinationFilter, DestinationKind};
use crate::config::LOGGING_INTERVAL;
use crate::error_handling::{FailureStats, FailureType, PublishError};
use crate::models::{AttemptOutcome, DestinationResult, PublishConfig};
use crate::pacing::{pause_unless_cancelled, FixedPacing, PacingPolicy};
use crate::retry::RetryController;
use crate::transport::PublishTransport;

/// Why a destination stopped before all its posts resolved.
enum Abort {
    Fatal(PublishError),
    Cancelled,
}

/// Fans a [`PublishConfig`] out over a [`Catalog`] through one transport.
pub struct Orchestrator {
    catalog: Catalog,
    transport: Arc<dyn PublishTransport>,
    pacing: Arc<dyn PacingPolicy>,
    kind: Option<DestinationKind>,
    progress: Option<UnboundedSender<AttemptOutcome>>,
    stats: Arc<FailureStats>,
}

impl Orchestrator {
    /// Orchestrator with production pacing and no kind filter.
    pub fn new(catalog: Catalog, transport: Arc<dyn PublishTransport>) -> Self {
        Self {
            catalog,
            transport,
            pacing: Arc::new(FixedPacing::default()),
            kind: None,
            progress: None,
            stats: Arc::new(FailureStats::new()),
        }
    }

    pub fn with_pacing(mut self, pacing: Arc<dyn PacingPolicy>) -> Self {
        self.pacing = pacing;
        self
    }

    /// Restricts the run to destinations of one kind.
    pub fn with_kind(mut self, kind: Option<DestinationKind>) -> Self {
        self.kind = kind;
        self
    }

    /// Streams every attempt outcome to `sender`.
    pub fn with_progress(mut self, sender: UnboundedSender<AttemptOutcome>) -> Self {
        self.progress = Some(sender);
        self
    }

    /// Failure counters accumulated across runs of this orchestrator.
    pub fn stats(&self) -> Arc<FailureStats> {
        Arc::clone(&self.stats)
    }

    /// Publishes to every matching destination and returns one result each.
    pub async fn publish(&self, config: &PublishConfig) -> Vec<DestinationResult> {
        self.publish_with_cancel(config, &CancellationToken::new())
            .await
    }

    /// Like [`Orchestrator::publish`], stopping early once `cancel` fires.
    ///
    /// Cancellation is checked between destinations and between posts. An
    /// interrupted destination counts its unattempted posts as failed;
    /// destinations not yet started are left out of the results.
    pub async fn publish_with_cancel(
        &self,
        config: &PublishConfig,
        cancel: &CancellationToken,
    ) -> Vec<DestinationResult> {
        let filter = DestinationFilter {
            kind: self.kind,
            names: config.target_destinations.clone(),
        };
        let destinations = self.catalog.list_destinations(&filter);
        let total = destinations.len();
        info!(
            "Publishing {} post{} to each of {} destination{}",
            config.posts_per_site,
            if config.posts_per_site == 1 { "" } else { "s" },
            total,
            if total == 1 { "" } else { "s" }
        );

        let mut controller = RetryController::new(
            Arc::clone(&self.transport),
            Arc::clone(&self.pacing),
            Arc::clone(&self.stats),
        )
        .with_cancellation(cancel.clone());
        if let Some(sender) = &self.progress {
            controller = controller.with_progress(sender.clone());
        }

        let start_time = Instant::now();
        let mut results = Vec::with_capacity(total);
        for (index, destination) in destinations.iter().enumerate() {
            if cancel.is_cancelled() {
                warn!(
                    "Run cancelled, skipping {} remaining destination{}",
                    total - index,
                    if total - index == 1 { "" } else { "s" }
                );
                break;
            }

            results.push(
                self.publish_destination(&controller, destination, config, cancel)
                    .await,
            );

            if (index + 1) % LOGGING_INTERVAL == 0 {
                log_progress(start_time, index + 1, total);
            }
            if index + 1 < total {
                pause_unless_cancelled(self.pacing.destination_delay(index), cancel).await;
            }
        }
        log_progress(start_time, results.len(), total);
        results
    }

    /// Processes every post for one destination. Never fails: fatal errors,
    /// panics and cancellation are folded into the returned result.
    async fn publish_destination(
        &self,
        controller: &RetryController,
        destination: &Destination,
        config: &PublishConfig,
        cancel: &CancellationToken,
    ) -> DestinationResult {
        let mut result = DestinationResult::new(&destination.name, config.posts_per_site);

        let processed = AssertUnwindSafe(self.process_posts(
            controller,
            destination,
            config,
            cancel,
            &mut result,
        ))
        .catch_unwind()
        .await;

        match processed {
            Ok(Ok(())) => {}
            Ok(Err(Abort::Fatal(e))) => {
                let remaining = result.fail_remaining();
                warn!(
                    "{} aborted: {} ({} post{} marked failed)",
                    destination.name,
                    e,
                    remaining,
                    if remaining == 1 { "" } else { "s" }
                );
                result.errors.push(format!("{}: {}", destination.name, e));
                self.stats.increment(FailureType::Fatal);
            }
            Ok(Err(Abort::Cancelled)) => {
                let remaining = result.fail_remaining();
                if remaining > 0 {
                    result.errors.push(format!("{}: cancelled", destination.name));
                    self.stats.add(FailureType::Cancelled, remaining as usize);
                }
            }
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                let remaining = result.fail_remaining();
                warn!(
                    "{} aborted by unexpected error: {} ({} post{} marked failed)",
                    destination.name,
                    message,
                    remaining,
                    if remaining == 1 { "" } else { "s" }
                );
                result
                    .errors
                    .push(format!("{}: unexpected error: {}", destination.name, message));
                self.stats.increment(FailureType::Panic);
            }
        }

        result.finalize();
        info!(
            "{}: {}/{} posts published ({}%)",
            result.site_name, result.successful, result.attempted, result.success_rate
        );
        result
    }

    async fn process_posts(
        &self,
        controller: &RetryController,
        destination: &Destination,
        config: &PublishConfig,
        cancel: &CancellationToken,
        result: &mut DestinationResult,
    ) -> Result<(), Abort> {
        let posts = config.posts_per_site;
        for post_index in 1..=posts {
            if cancel.is_cancelled() {
                return Err(Abort::Cancelled);
            }

            let outcome = controller
                .attempt_post(destination, config, post_index)
                .await
                .map_err(|e| match e {
                    PublishError::Cancelled => Abort::Cancelled,
                    e => Abort::Fatal(e),
                })?;
            if outcome.is_success() {
                result.successful += 1;
            } else {
                result.failed += 1;
                result.errors.push(outcome.message);
            }

            if post_index < posts {
                pause_unless_cancelled(self.pacing.post_delay(destination), cancel).await;
            }
        }
        Ok(())
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic".to_string()
    }
}
