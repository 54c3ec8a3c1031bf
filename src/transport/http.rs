//! Live HTTP transport.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::adapters::adapter_for;
use crate::catalog::Destination;
use crate::error_handling::PublishError;
use crate::models::PublishConfig;

use super::{PageSession, PublishTransport};

/// Publishes through the category's site adapter over a shared `reqwest::Client`.
///
/// A fresh [`PageSession`] is opened for every call and released before the
/// call returns, whatever the outcome.
pub struct HttpTransport {
    client: reqwest::Client,
    open_sessions: Arc<AtomicUsize>,
}

impl HttpTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            open_sessions: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of sessions currently open.
    pub fn open_sessions(&self) -> usize {
        self.open_sessions.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PublishTransport for HttpTransport {
    async fn publish_once(
        &self,
        destination: &Destination,
        config: &PublishConfig,
        post_index: u32,
    ) -> Result<(), PublishError> {
        let adapter = adapter_for(destination.category);

        if adapter.requires_credentials() && !config.has_credentials() {
            return Err(PublishError::Configuration(format!(
                "{} adapter needs userEmail and userPassword",
                adapter.name()
            )));
        }

        let credentials = config
            .has_credentials()
            .then(|| (config.user_email.clone(), config.user_password.clone()));

        let mut page = PageSession::open(
            self.client.clone(),
            destination,
            credentials,
            Arc::clone(&self.open_sessions),
        )?;
        log::debug!(
            "Publishing post {} to {} via {} adapter",
            post_index,
            destination.name,
            adapter.name()
        );
        adapter.publish(&mut page, config, post_index).await
    }
}
