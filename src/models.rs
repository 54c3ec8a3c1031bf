//! Request and result types exchanged with callers.
//!
//! The JSON field names match the shapes consumed and produced by the web layer
//! (`videoUrl`, `postsPerSite`, `siteName`, ...).

use serde::{Deserialize, Serialize};

use crate::app::validate_and_normalize_url;
use crate::config::MAX_POSTS_PER_SITE;
use crate::error_handling::ConfigError;

/// A single publish request.
///
/// Credentials are threaded through to the transport and never logged.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishConfig {
    pub video_url: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub posts_per_site: u32,
    #[serde(default)]
    pub user_email: String,
    #[serde(default)]
    pub user_password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_destinations: Option<Vec<String>>,
}

impl PublishConfig {
    /// Checks the request before a run starts.
    ///
    /// The orchestrator itself tolerates `postsPerSite == 0`; callers accepting
    /// requests from users reject it here.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if validate_and_normalize_url(&self.video_url).is_none() {
            return Err(ConfigError::InvalidVideoUrl(self.video_url.clone()));
        }
        if self.title.trim().is_empty() {
            return Err(ConfigError::EmptyTitle);
        }
        if self.posts_per_site == 0 || self.posts_per_site > MAX_POSTS_PER_SITE {
            return Err(ConfigError::PostsPerSiteOutOfRange {
                actual: self.posts_per_site,
                max: MAX_POSTS_PER_SITE,
            });
        }
        Ok(())
    }

    /// Whether both account credentials are present.
    pub fn has_credentials(&self) -> bool {
        !self.user_email.trim().is_empty() && !self.user_password.is_empty()
    }
}

impl std::fmt::Debug for PublishConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublishConfig")
            .field("video_url", &self.video_url)
            .field("title", &self.title)
            .field("description", &self.description)
            .field("posts_per_site", &self.posts_per_site)
            .field("user_email", &self.user_email)
            .field("user_password", &"<redacted>")
            .field("target_destinations", &self.target_destinations)
            .finish()
    }
}

/// Status of one retry-loop iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttemptStatus {
    Success,
    Failed,
    Retrying,
}

/// Result of one retry-loop iteration for one (destination, post) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptOutcome {
    pub destination: String,
    pub post_index: u32,
    pub attempt: u32,
    pub status: AttemptStatus,
    pub message: String,
}

impl AttemptOutcome {
    pub fn is_success(&self) -> bool {
        self.status == AttemptStatus::Success
    }
}

/// Per-destination rollup.
///
/// Once processing finishes, `attempted == successful + failed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationResult {
    pub site_name: String,
    pub attempted: u32,
    pub successful: u32,
    pub failed: u32,
    pub success_rate: u32,
    pub errors: Vec<String>,
}

impl DestinationResult {
    pub fn new(site_name: impl Into<String>, attempted: u32) -> Self {
        Self {
            site_name: site_name.into(),
            attempted,
            successful: 0,
            failed: 0,
            success_rate: 0,
            errors: Vec::new(),
        }
    }

    /// Posts not yet counted as successful or failed.
    pub fn unresolved(&self) -> u32 {
        self.attempted
            .saturating_sub(self.successful)
            .saturating_sub(self.failed)
    }

    /// Counts every unresolved post as failed.
    pub fn fail_remaining(&mut self) -> u32 {
        let remaining = self.unresolved();
        self.failed += remaining;
        remaining
    }

    /// Computes `success_rate` from the counters.
    pub fn finalize(&mut self) {
        self.success_rate = crate::report::success_rate(self.successful, self.attempted);
    }
}
