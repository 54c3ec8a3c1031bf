//! Publish transports.
//!
//! A transport performs exactly one publish call against one destination. The
//! retry controller decides whether to call it again. Two implementations:
//!
//! - [`SimulatedTransport`]: draws against the category success probability
//!   with a seedable RNG, for dry runs and deterministic tests
//! - [`HttpTransport`]: submits the post over HTTP through the site adapter
//!   for the destination's category

mod http;
mod session;
mod simulated;

use std::sync::Arc;

use async_trait::async_trait;

use crate::catalog::Destination;
use crate::error_handling::PublishError;
use crate::models::PublishConfig;

pub use http::HttpTransport;
pub use session::PageSession;
pub use simulated::SimulatedTransport;

/// One publish call against one destination.
#[async_trait]
pub trait PublishTransport: Send + Sync {
    /// Publishes post number `post_index` (1-based) of `config` to `destination`.
    ///
    /// # Errors
    ///
    /// The `PublishError` variant tells the caller how to react: retriable
    /// failures, configuration errors (no retry) or fatal errors (abort the
    /// destination).
    async fn publish_once(
        &self,
        destination: &Destination,
        config: &PublishConfig,
        post_index: u32,
    ) -> Result<(), PublishError>;
}

#[async_trait]
impl<T: PublishTransport + ?Sized> PublishTransport for Arc<T> {
    async fn publish_once(
        &self,
        destination: &Destination,
        config: &PublishConfig,
        post_index: u32,
    ) -> Result<(), PublishError> {
        (**self).publish_once(destination, config, post_index).await
    }
}
