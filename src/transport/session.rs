//! Per-destination HTTP session ("page").

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use reqwest::StatusCode;
use url::Url;

use crate::catalog::Destination;
use crate::error_handling::PublishError;

/// A session bound to one destination for the duration of one publish call.
///
/// Adapters submit forms through it. The session is released when dropped,
/// which covers early returns, `?` and unwinding alike; `open_sessions`
/// tracks how many are live.
pub struct PageSession {
    client: reqwest::Client,
    base: Url,
    destination: String,
    credentials: Option<(String, String)>,
    open_sessions: Arc<AtomicUsize>,
}

impl PageSession {
    /// Opens a session against `destination.base_url`.
    ///
    /// # Errors
    ///
    /// Returns `PublishError::Configuration` if the base URL does not parse.
    pub fn open(
        client: reqwest::Client,
        destination: &Destination,
        credentials: Option<(String, String)>,
        open_sessions: Arc<AtomicUsize>,
    ) -> Result<Self, PublishError> {
        let mut base = Url::parse(&destination.base_url).map_err(|e| {
            PublishError::Configuration(format!(
                "invalid base URL '{}': {e}",
                destination.base_url
            ))
        })?;
        // Endpoint paths are relative; keep any path prefix of the base URL
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        open_sessions.fetch_add(1, Ordering::SeqCst);
        log::debug!("Opened session for {}", destination.name);
        Ok(Self {
            client,
            base,
            destination: destination.name.clone(),
            credentials,
            open_sessions,
        })
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// POSTs a form to `path` relative to the destination's base URL.
    ///
    /// Non-2xx statuses are returned, not turned into errors; only network
    /// failures surface as `PublishError::Transport`.
    pub async fn submit(
        &mut self,
        path: &str,
        form: &[(&str, String)],
    ) -> Result<StatusCode, PublishError> {
        let url = self.base.join(path).map_err(|e| {
            PublishError::Configuration(format!("invalid endpoint path '{path}': {e}"))
        })?;
        let mut request = self.client.post(url).form(form);
        if let Some((user, password)) = &self.credentials {
            request = request.basic_auth(user, Some(password));
        }
        let response = request.send().await?;
        let status = response.status();
        log::trace!("{} {} -> {}", self.destination, path, status);
        Ok(status)
    }
}

impl Drop for PageSession {
    fn drop(&mut self) {
        self.open_sessions.fetch_sub(1, Ordering::SeqCst);
        log::debug!("Closed session for {}", self.destination);
    }
}
