//! Video platforms: import by URL.

use async_trait::async_trait;

use crate::error_handling::PublishError;
use crate::models::PublishConfig;
use crate::transport::PageSession;

use super::{post_title, submit_first_match, SiteAdapter};

const ENDPOINTS: &[&str] = &["api/videos/import", "upload", "api/upload"];

pub struct VideoAdapter;

#[async_trait]
impl SiteAdapter for VideoAdapter {
    fn name(&self) -> &'static str {
        "video"
    }

    async fn publish(
        &self,
        page: &mut PageSession,
        config: &PublishConfig,
        post_index: u32,
    ) -> Result<(), PublishError> {
        let form = [
            ("source_url", config.video_url.clone()),
            ("title", post_title(config, post_index)),
            (
                "description",
                config.description.clone().unwrap_or_default(),
            ),
        ];
        submit_first_match(page, ENDPOINTS, &form).await
    }
}
