//! Pacing between attempts, posts and destinations.
//!
//! The orchestrator never sleeps on hard-coded constants; it asks a
//! [`PacingPolicy`] how long to wait. Production uses [`FixedPacing`],
//! tests use [`NoPacing`].

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::catalog::{Destination, DestinationKind};
use crate::config::{DESTINATION_DELAY, POST_DELAY, RETRY_DELAY_FORUM, RETRY_DELAY_SITE};

/// Delay policy for the sequential fan-out.
pub trait PacingPolicy: Send + Sync {
    /// Wait after failed attempt number `attempt` (1-based) before retrying.
    fn retry_delay(&self, destination: &Destination, attempt: u32) -> Duration;

    /// Wait between two posts to the same destination.
    fn post_delay(&self, destination: &Destination) -> Duration;

    /// Wait after finishing destination number `index` (0-based).
    fn destination_delay(&self, index: usize) -> Duration;
}

/// Fixed delays, retry backoff depending on destination kind.
#[derive(Debug, Clone)]
pub struct FixedPacing {
    pub retry_site: Duration,
    pub retry_forum: Duration,
    pub post: Duration,
    pub destination: Duration,
}

impl Default for FixedPacing {
    fn default() -> Self {
        Self {
            retry_site: RETRY_DELAY_SITE,
            retry_forum: RETRY_DELAY_FORUM,
            post: POST_DELAY,
            destination: DESTINATION_DELAY,
        }
    }
}

impl PacingPolicy for FixedPacing {
    fn retry_delay(&self, destination: &Destination, _attempt: u32) -> Duration {
        match destination.kind {
            DestinationKind::Site => self.retry_site,
            DestinationKind::Forum => self.retry_forum,
        }
    }

    fn post_delay(&self, _destination: &Destination) -> Duration {
        self.post
    }

    fn destination_delay(&self, _index: usize) -> Duration {
        self.destination
    }
}

/// Zero delays everywhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPacing;

impl PacingPolicy for NoPacing {
    fn retry_delay(&self, _destination: &Destination, _attempt: u32) -> Duration {
        Duration::ZERO
    }

    fn post_delay(&self, _destination: &Destination) -> Duration {
        Duration::ZERO
    }

    fn destination_delay(&self, _index: usize) -> Duration {
        Duration::ZERO
    }
}

/// Sleeps for `delay`, skipping the timer entirely for zero.
pub(crate) async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

/// Like [`pause`], returning early once `cancel` fires.
pub(crate) async fn pause_unless_cancelled(delay: Duration, cancel: &CancellationToken) {
    tokio::select! {
        _ = pause(delay) => {}
        _ = cancel.cancelled() => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;

    #[test]
    fn test_fixed_pacing_by_kind() {
        let pacing = FixedPacing::default();
        let site = Destination::new("S", "https://s.example", Category::Social, DestinationKind::Site);
        let forum = Destination::new("F", "https://f.example", Category::Unknown, DestinationKind::Forum);
        assert_eq!(pacing.retry_delay(&site, 1), RETRY_DELAY_SITE);
        assert_eq!(pacing.retry_delay(&forum, 2), RETRY_DELAY_FORUM);
        assert_eq!(pacing.post_delay(&site), POST_DELAY);
        assert_eq!(pacing.destination_delay(0), DESTINATION_DELAY);
    }

    #[tokio::test]
    async fn test_pause_returns_early_on_cancel() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let start = std::time::Instant::now();
        pause_unless_cancelled(Duration::from_secs(60), &cancel).await;
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_no_pacing() {
        let site = Destination::new("S", "https://s.example", Category::Social, DestinationKind::Site);
        assert!(NoPacing.retry_delay(&site, 1).is_zero());
        assert!(NoPacing.post_delay(&site).is_zero());
        assert!(NoPacing.destination_delay(3).is_zero());
    }
}
