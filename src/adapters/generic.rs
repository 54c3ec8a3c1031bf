//! Fallback for forums, news aggregators and anything uncategorized:
//! an anonymous link submission.

use async_trait::async_trait;

use crate::error_handling::PublishError;
use crate::models::PublishConfig;
use crate::transport::PageSession;

use super::{post_body, post_title, submit_first_match, SiteAdapter};

const ENDPOINTS: &[&str] = &["submit", "api/submit", "post", "new-topic"];

pub struct GenericAdapter;

#[async_trait]
impl SiteAdapter for GenericAdapter {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn requires_credentials(&self) -> bool {
        false
    }

    async fn publish(
        &self,
        page: &mut PageSession,
        config: &PublishConfig,
        post_index: u32,
    ) -> Result<(), PublishError> {
        let form = [
            ("title", post_title(config, post_index)),
            ("url", config.video_url.clone()),
            ("text", post_body(config)),
        ];
        submit_first_match(page, ENDPOINTS, &form).await
    }
}
