//! Blogs: a published article with the video link in the body.

use async_trait::async_trait;

use crate::error_handling::PublishError;
use crate::models::PublishConfig;
use crate::transport::PageSession;

use super::{post_body, post_title, submit_first_match, SiteAdapter};

const ENDPOINTS: &[&str] = &["wp-json/wp/v2/posts", "api/posts", "api/articles", "new"];

pub struct BlogAdapter;

#[async_trait]
impl SiteAdapter for BlogAdapter {
    fn name(&self) -> &'static str {
        "blog"
    }

    async fn publish(
        &self,
        page: &mut PageSession,
        config: &PublishConfig,
        post_index: u32,
    ) -> Result<(), PublishError> {
        let form = [
            ("title", post_title(config, post_index)),
            ("content", post_body(config)),
            ("status", "publish".to_string()),
        ];
        submit_first_match(page, ENDPOINTS, &form).await
    }
}
