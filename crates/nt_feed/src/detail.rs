use nt_core::{date, Article, ImageSource, ImageState, NO_CONTENT_PLACEHOLDER};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// A single opened article and its image download.
///
/// The image is fetched at most once, starting as soon as the session opens.
/// Failures leave the image empty. Dropping the session aborts the download.
pub struct ArticleDetail {
    article: Article,
    image: watch::Receiver<ImageState>,
    task: Option<JoinHandle<()>>,
}

impl ArticleDetail {
    /// Open a session for `article`. Must be called from within a tokio
    /// runtime when the article has an image.
    pub fn open(article: Article, images: Arc<dyn ImageSource>) -> Self {
        let Some(url) = article.preferred_image_url().map(str::to_string) else {
            debug!(id = %article.id, "Article has no image");
            let (_, image) = watch::channel(ImageState::default());
            return Self {
                article,
                image,
                task: None,
            };
        };

        let (tx, image) = watch::channel(ImageState {
            data: None,
            is_loading: true,
        });
        let id = article.id.clone();
        let task = tokio::spawn(async move {
            let result = images.fetch_image(&url).await;
            tx.send_modify(|state| {
                state.is_loading = false;
                match result {
                    Ok(bytes) => {
                        debug!(id = %id, bytes = bytes.len(), "Loaded article image");
                        state.data = Some(bytes);
                    }
                    Err(e) => warn!(id = %id, url = %url, error = %e, "Failed to load article image"),
                }
            });
        });

        Self {
            article,
            image,
            task: Some(task),
        }
    }

    pub fn article(&self) -> &Article {
        &self.article
    }

    pub fn title(&self) -> &str {
        self.article.title()
    }

    pub fn formatted_date(&self) -> String {
        date::format_publication_date(&self.article.web_publication_date)
    }

    /// Raw HTML body, falling back to the plain-text body.
    pub fn body_html(&self) -> Option<&str> {
        self.article.preferred_body()
    }

    /// Body rendered by `render`, or the placeholder when the article has none.
    pub fn body_text<F>(&self, render: F) -> String
    where
        F: FnOnce(&str) -> String,
    {
        match self.body_html() {
            Some(body) => render(body),
            None => NO_CONTENT_PLACEHOLDER.to_string(),
        }
    }

    pub fn image(&self) -> ImageState {
        self.image.borrow().clone()
    }

    pub fn is_loading_image(&self) -> bool {
        self.image.borrow().is_loading
    }

    pub fn subscribe(&self) -> watch::Receiver<ImageState> {
        self.image.clone()
    }

    /// Wait for the download to finish and return the image, if any.
    pub async fn wait_for_image(&mut self) -> Option<Vec<u8>> {
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!(id = %self.article.id, error = %e, "Image task did not complete");
            }
        }
        self.image.borrow().data.clone()
    }
}

impl Drop for ArticleDetail {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
