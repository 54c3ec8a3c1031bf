//! Per-category site adapters.
//!
//! Each adapter knows how one family of destinations accepts a post: which
//! endpoints to try, in order, and which form fields to send. Endpoints that
//! answer 404/405 are treated as "not this one" and the next candidate is tried.
//! Categories without a dedicated adapter use [`GenericAdapter`].

mod blog;
mod generic;
mod social;
mod video;

use async_trait::async_trait;

use crate::catalog::Category;
use crate::config::{
    HTTP_STATUS_FORBIDDEN, HTTP_STATUS_METHOD_NOT_ALLOWED, HTTP_STATUS_NOT_FOUND,
    HTTP_STATUS_UNAUTHORIZED,
};
use crate::error_handling::PublishError;
use crate::models::PublishConfig;
use crate::transport::PageSession;

pub use blog::BlogAdapter;
pub use generic::GenericAdapter;
pub use social::SocialAdapter;
pub use video::VideoAdapter;

/// Publishing strategy for one family of destinations.
#[async_trait]
pub trait SiteAdapter: Send + Sync {
    /// Short adapter name for logs.
    fn name(&self) -> &'static str;

    /// Whether posting requires account credentials.
    fn requires_credentials(&self) -> bool {
        true
    }

    /// Publishes post number `post_index` through `page`.
    async fn publish(
        &self,
        page: &mut PageSession,
        config: &PublishConfig,
        post_index: u32,
    ) -> Result<(), PublishError>;
}

/// The adapter for a destination category.
pub fn adapter_for(category: Category) -> &'static dyn SiteAdapter {
    match category {
        Category::Social => &SocialAdapter,
        Category::Video => &VideoAdapter,
        Category::Blog => &BlogAdapter,
        Category::News | Category::ArabicForum | Category::Unknown => &GenericAdapter,
    }
}

/// Title for post `post_index`; later posts get a numeric suffix so
/// destinations do not reject them as duplicates.
pub(crate) fn post_title(config: &PublishConfig, post_index: u32) -> String {
    if post_index <= 1 {
        config.title.clone()
    } else {
        format!("{} ({})", config.title, post_index)
    }
}

/// Post body: description (if any) followed by the video link.
pub(crate) fn post_body(config: &PublishConfig) -> String {
    match config.description.as_deref().map(str::trim) {
        Some(description) if !description.is_empty() => {
            format!("{description}\n\n{}", config.video_url)
        }
        _ => config.video_url.clone(),
    }
}

/// Submits `form` to each endpoint in turn until one accepts it.
///
/// - 2xx: published
/// - 404/405: endpoint not present, try the next one
/// - 401/403: credentials refused, configuration error (retrying cannot help)
/// - anything else: rejected (retriable)
///
/// If no endpoint exists the destination cannot be published to as configured.
pub(crate) async fn submit_first_match(
    page: &mut PageSession,
    endpoints: &[&str],
    form: &[(&str, String)],
) -> Result<(), PublishError> {
    for endpoint in endpoints {
        let status = page.submit(endpoint, form).await?;
        if status.is_success() {
            log::debug!("{} accepted post at /{}", page.destination(), endpoint);
            return Ok(());
        }
        match status.as_u16() {
            HTTP_STATUS_NOT_FOUND | HTTP_STATUS_METHOD_NOT_ALLOWED => continue,
            HTTP_STATUS_UNAUTHORIZED | HTTP_STATUS_FORBIDDEN => {
                return Err(PublishError::Configuration(format!(
                    "credentials refused by /{endpoint} ({status})"
                )));
            }
            _ => {
                return Err(PublishError::Rejected(format!(
                    "/{endpoint} answered {status}"
                )));
            }
        }
    }
    Err(PublishError::Configuration(format!(
        "no publish endpoint found (tried {})",
        endpoints.join(", ")
    )))
}
