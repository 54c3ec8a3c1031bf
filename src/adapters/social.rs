//! Social networks: a single status update carrying title and link.

use async_trait::async_trait;

use crate::error_handling::PublishError;
use crate::models::PublishConfig;
use crate::transport::PageSession;

use super::{post_title, submit_first_match, SiteAdapter};

const ENDPOINTS: &[&str] = &["api/share", "share", "intent/post", "status/update"];

pub struct SocialAdapter;

#[async_trait]
impl SiteAdapter for SocialAdapter {
    fn name(&self) -> &'static str {
        "social"
    }

    async fn publish(
        &self,
        page: &mut PageSession,
        config: &PublishConfig,
        post_index: u32,
    ) -> Result<(), PublishError> {
        let status = format!("{} {}", post_title(config, post_index), config.video_url);
        let form = [("status", status), ("url", config.video_url.clone())];
        submit_first_match(page, ENDPOINTS, &form).await
    }
}
