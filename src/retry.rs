//! Bounded retry around a single publish call.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio_retry::RetryIf;
use tokio_util::sync::CancellationToken;

use crate::catalog::Destination;
use crate::config::RETRY_MAX_ATTEMPTS;
use crate::error_handling::{FailureStats, PublishError};
use crate::models::{AttemptOutcome, AttemptStatus, PublishConfig};
use crate::pacing::{pause_unless_cancelled, PacingPolicy};
use crate::transport::PublishTransport;

/// Drives one logical post against one destination, at most `max_attempts` times.
///
/// Every attempt is logged and, if a progress channel is attached, reported as
/// an [`AttemptOutcome`] (`Retrying` for intermediate failures).
pub struct RetryController {
    transport: Arc<dyn PublishTransport>,
    pacing: Arc<dyn PacingPolicy>,
    max_attempts: u32,
    progress: Option<UnboundedSender<AttemptOutcome>>,
    stats: Arc<FailureStats>,
    cancel: CancellationToken,
}

impl RetryController {
    pub fn new(
        transport: Arc<dyn PublishTransport>,
        pacing: Arc<dyn PacingPolicy>,
        stats: Arc<FailureStats>,
    ) -> Self {
        Self {
            transport,
            pacing,
            max_attempts: RETRY_MAX_ATTEMPTS as u32,
            progress: None,
            stats,
            cancel: CancellationToken::new(),
        }
    }

    /// Stops waiting for a retry once `cancel` fires.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Streams every attempt outcome to `sender`.
    pub fn with_progress(mut self, sender: UnboundedSender<AttemptOutcome>) -> Self {
        self.progress = Some(sender);
        self
    }

    /// Attempts post number `post_index` (1-based).
    ///
    /// - success on attempt k: returns `Success` with `attempt == k`, no further calls
    /// - retriable failure on every attempt: returns `Failed` after exactly
    ///   `max_attempts` calls, message `"<destination>: failed after 3 attempts"`
    /// - configuration error: returns `Failed` immediately, no retries
    ///
    /// The retry backoff is slept inside the attempt so cancellation can cut
    /// it short; the strategy passed to `RetryIf` only bounds the attempt count.
    ///
    /// # Errors
    ///
    /// `PublishError::Fatal` is returned as-is so the caller can abort the
    /// destination. `PublishError::Cancelled` is returned if the run is
    /// cancelled while waiting to retry.
    pub async fn attempt_post(
        &self,
        destination: &Destination,
        config: &PublishConfig,
        post_index: u32,
    ) -> Result<AttemptOutcome, PublishError> {
        let max_attempts = self.max_attempts.max(1);
        let strategy = (1..max_attempts).map(|_| Duration::ZERO);
        let attempts = AtomicU32::new(0);
        let counter = &attempts;
        let cancel = &self.cancel;

        let result = RetryIf::start(
            strategy,
            move || async move {
                let attempt = counter.fetch_add(1, Ordering::SeqCst) + 1;
                if attempt > 1 {
                    let delay = self.pacing.retry_delay(destination, attempt - 1);
                    pause_unless_cancelled(delay, cancel).await;
                    if cancel.is_cancelled() {
                        return Err(PublishError::Cancelled);
                    }
                }
                let result = self
                    .transport
                    .publish_once(destination, config, post_index)
                    .await;
                if let Err(e) = &result {
                    if e.is_retriable() && attempt < max_attempts {
                        log::info!(
                            "{} post {}: attempt {}/{} failed ({}), retrying",
                            destination.name,
                            post_index,
                            attempt,
                            max_attempts,
                            e
                        );
                        self.emit(AttemptOutcome {
                            destination: destination.name.clone(),
                            post_index,
                            attempt,
                            status: AttemptStatus::Retrying,
                            message: format!("{}: {}", destination.name, e),
                        });
                    }
                }
                result
            },
            |e: &PublishError| e.is_retriable(),
        )
        .await;

        let attempt = attempts.load(Ordering::SeqCst);
        let outcome = match result {
            Ok(()) => {
                log::info!(
                    "{} post {}: published on attempt {}/{}",
                    destination.name,
                    post_index,
                    attempt,
                    max_attempts
                );
                AttemptOutcome {
                    destination: destination.name.clone(),
                    post_index,
                    attempt,
                    status: AttemptStatus::Success,
                    message: format!("{}: post {} published", destination.name, post_index),
                }
            }
            Err(e @ (PublishError::Fatal(_) | PublishError::Cancelled)) => return Err(e),
            Err(e) => {
                self.stats.increment(e.failure_type());
                let message = if e.is_retriable() {
                    format!("{}: failed after {} attempts", destination.name, attempt)
                } else {
                    format!("{}: {}", destination.name, e)
                };
                log::warn!("{} post {}: {} (last error: {})", destination.name, post_index, message, e);
                AttemptOutcome {
                    destination: destination.name.clone(),
                    post_index,
                    attempt,
                    status: AttemptStatus::Failed,
                    message,
                }
            }
        };
        self.emit(outcome.clone());
        Ok(outcome)
    }

    fn emit(&self, outcome: AttemptOutcome) {
        if let Some(sender) = &self.progress {
            // A dropped receiver just means nobody is watching
            let _ = sender.send(outcome);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Category, DestinationKind};
    use crate::error_handling::FailureType;
    use crate::pacing::NoPacing;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Returns scripted results in order, then repeats the fallback.
    struct Scripted {
        script: Mutex<VecDeque<Result<(), PublishError>>>,
        fallback_ok: bool,
        calls: AtomicU32,
    }

    impl Scripted {
        fn new(script: Vec<Result<(), PublishError>>, fallback_ok: bool) -> Arc<Self> {
            Arc::new(Self {
                script: Mutex::new(script.into()),
                fallback_ok,
                calls: AtomicU32::new(0),
            })
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PublishTransport for Scripted {
        async fn publish_once(
            &self,
            _destination: &Destination,
            _config: &PublishConfig,
            _post_index: u32,
        ) -> Result<(), PublishError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let next = self.script.lock().unwrap().pop_front();
            match next {
                Some(result) => result,
                None if self.fallback_ok => Ok(()),
                None => Err(PublishError::Rejected("scripted failure".into())),
            }
        }
    }

    fn destination() -> Destination {
        Destination::new("Medium", "https://medium.com", Category::Blog, DestinationKind::Site)
    }

    fn controller(transport: Arc<Scripted>) -> (RetryController, Arc<FailureStats>) {
        let stats = Arc::new(FailureStats::new());
        let controller = RetryController::new(transport, Arc::new(NoPacing), Arc::clone(&stats));
        (controller, stats)
    }

    fn rejected() -> Result<(), PublishError> {
        Err(PublishError::Rejected("busy".into()))
    }

    #[tokio::test]
    async fn test_always_failing_is_called_exactly_three_times() {
        let transport = Scripted::new(vec![], false);
        let (controller, stats) = controller(Arc::clone(&transport));

        let outcome = controller
            .attempt_post(&destination(), &PublishConfig::default(), 1)
            .await
            .expect("not fatal");

        assert_eq!(transport.calls(), 3);
        assert_eq!(outcome.status, AttemptStatus::Failed);
        assert_eq!(outcome.attempt, 3);
        assert_eq!(outcome.message, "Medium: failed after 3 attempts");
        assert_eq!(stats.get_count(FailureType::Rejected), 1);
    }

    #[tokio::test]
    async fn test_success_on_first_attempt() {
        let transport = Scripted::new(vec![], true);
        let (controller, stats) = controller(Arc::clone(&transport));

        let outcome = controller
            .attempt_post(&destination(), &PublishConfig::default(), 1)
            .await
            .unwrap();

        assert_eq!(transport.calls(), 1);
        assert!(outcome.is_success());
        assert_eq!(outcome.attempt, 1);
        assert_eq!(stats.total(), 0);
    }

    #[tokio::test]
    async fn test_early_exit_on_kth_attempt() {
        for k in 1..=3u32 {
            let script = (1..k).map(|_| rejected()).collect();
            let transport = Scripted::new(script, true);
            let (controller, _) = controller(Arc::clone(&transport));

            let outcome = controller
                .attempt_post(&destination(), &PublishConfig::default(), 1)
                .await
                .unwrap();

            assert_eq!(transport.calls(), k, "success on attempt {k}");
            assert_eq!(outcome.attempt, k);
            assert!(outcome.is_success());
        }
    }

    #[tokio::test]
    async fn test_configuration_error_is_not_retried() {
        let transport = Scripted::new(
            vec![Err(PublishError::Configuration("missing credentials".into()))],
            true,
        );
        let (controller, stats) = controller(Arc::clone(&transport));

        let outcome = controller
            .attempt_post(&destination(), &PublishConfig::default(), 1)
            .await
            .unwrap();

        assert_eq!(transport.calls(), 1);
        assert_eq!(outcome.status, AttemptStatus::Failed);
        assert_eq!(
            outcome.message,
            "Medium: configuration error: missing credentials"
        );
        assert_eq!(stats.get_count(FailureType::Configuration), 1);
    }

    #[tokio::test]
    async fn test_fatal_error_propagates() {
        let transport = Scripted::new(vec![rejected(), Err(PublishError::Fatal("boom".into()))], true);
        let (controller, _) = controller(Arc::clone(&transport));

        let result = controller
            .attempt_post(&destination(), &PublishConfig::default(), 1)
            .await;

        assert!(matches!(result, Err(PublishError::Fatal(_))));
        assert_eq!(transport.calls(), 2);
    }

    /// Rejects every call and cancels `token` on the first one.
    struct CancelsOnFirstCall {
        token: CancellationToken,
        calls: AtomicU32,
    }

    #[async_trait]
    impl PublishTransport for CancelsOnFirstCall {
        async fn publish_once(
            &self,
            _destination: &Destination,
            _config: &PublishConfig,
            _post_index: u32,
        ) -> Result<(), PublishError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.token.cancel();
            Err(PublishError::Rejected("busy".into()))
        }
    }

    #[tokio::test]
    async fn test_cancel_cuts_retry_wait_short() {
        let token = CancellationToken::new();
        let transport = Arc::new(CancelsOnFirstCall {
            token: token.clone(),
            calls: AtomicU32::new(0),
        });
        let pacing = crate::pacing::FixedPacing {
            retry_site: Duration::from_secs(60),
            retry_forum: Duration::from_secs(60),
            post: Duration::ZERO,
            destination: Duration::ZERO,
        };
        let controller = RetryController::new(
            transport.clone(),
            Arc::new(pacing),
            Arc::new(FailureStats::new()),
        )
        .with_cancellation(token);

        let result = tokio::time::timeout(
            Duration::from_secs(5),
            controller.attempt_post(&destination(), &PublishConfig::default(), 1),
        )
        .await
        .expect("retry wait should stop on cancellation");

        assert!(matches!(result, Err(PublishError::Cancelled)));
        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_progress_reports_every_attempt() {
        let transport = Scripted::new(vec![rejected(), rejected()], true);
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let (controller, _) = controller(transport);
        let controller = controller.with_progress(tx);

        controller
            .attempt_post(&destination(), &PublishConfig::default(), 2)
            .await
            .unwrap();
        drop(controller);

        let mut statuses = Vec::new();
        while let Some(outcome) = rx.recv().await {
            assert_eq!(outcome.post_index, 2);
            statuses.push((outcome.attempt, outcome.status));
        }
        assert_eq!(
            statuses,
            vec![
                (1, AttemptStatus::Retrying),
                (2, AttemptStatus::Retrying),
                (3, AttemptStatus::Success),
            ]
        );
    }
}
