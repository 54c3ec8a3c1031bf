//! Probability-draw transport.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::catalog::{Destination, SuccessPolicy};
use crate::error_handling::PublishError;
use crate::models::PublishConfig;
use crate::pacing::pause;

use super::PublishTransport;

/// Succeeds when a uniform draw in `[0, 1)` falls below the destination's
/// success probability.
///
/// Seeded instances produce the same outcome sequence for the same sequence
/// of calls, which is what makes retry behaviour reproducible.
pub struct SimulatedTransport {
    policy: SuccessPolicy,
    rng: Mutex<StdRng>,
    latency: Duration,
}

impl SimulatedTransport {
    /// Deterministic transport.
    pub fn seeded(seed: u64, policy: SuccessPolicy) -> Self {
        Self {
            policy,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            latency: Duration::ZERO,
        }
    }

    /// Transport seeded from the operating system.
    pub fn from_os_rng(policy: SuccessPolicy) -> Self {
        Self {
            policy,
            rng: Mutex::new(StdRng::from_os_rng()),
            latency: Duration::ZERO,
        }
    }

    /// Adds a fixed simulated network latency to every call.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    fn draw(&self) -> f64 {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.random::<f64>()
    }
}

#[async_trait]
impl PublishTransport for SimulatedTransport {
    async fn publish_once(
        &self,
        destination: &Destination,
        _config: &PublishConfig,
        post_index: u32,
    ) -> Result<(), PublishError> {
        pause(self.latency).await;

        let probability = self
            .policy
            .success_probability(destination.category, destination.kind);
        let draw = self.draw();
        log::trace!(
            "Simulated draw for {} post {}: {:.3} vs p={:.2}",
            destination.name,
            post_index,
            draw,
            probability
        );
        if draw < probability {
            Ok(())
        } else {
            Err(PublishError::Rejected(format!(
                "{} did not accept post {}",
                destination.name, post_index
            )))
        }
    }
}
