use async_trait::async_trait;
use crate::models::ResponsePage;
use crate::Result;

#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Fetch one page of the newest articles. `page` is 1-based.
    async fn fetch_page(&self, page: u32, page_size: u32) -> Result<ResponsePage>;
}

#[async_trait]
pub trait ImageSource: Send + Sync {
    /// Fetch the raw bytes behind an image URL.
    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>>;
}
