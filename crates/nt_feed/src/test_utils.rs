// Scripted sources for exercising the sessions without a network.

use async_trait::async_trait;
use nt_core::{Article, ArticleFields, ArticleSource, Error, ImageSource, ResponsePage, Result};
use std::collections::VecDeque;
use std::sync::Mutex;
use tokio::sync::{mpsc, oneshot};

pub fn article(id: &str) -> Article {
    Article {
        id: id.to_string(),
        kind: "article".to_string(),
        section_id: "world".to_string(),
        section_name: "World news".to_string(),
        web_publication_date: "2024-01-05T12:00:00Z".to_string(),
        web_title: format!("Title {}", id),
        web_url: format!("https://www.theguardian.com/{}", id),
        api_url: format!("https://content.guardianapis.com/{}", id),
        fields: None,
        is_hosted: false,
        pillar_id: "pillar/news".to_string(),
        pillar_name: "News".to_string(),
    }
}

pub fn article_with_image(id: &str, thumbnail: &str) -> Article {
    Article {
        fields: Some(ArticleFields {
            thumbnail: Some(thumbnail.to_string()),
            ..Default::default()
        }),
        ..article(id)
    }
}

pub fn page(current_page: u32, pages: u32, ids: &[&str]) -> ResponsePage {
    ResponsePage {
        status: "ok".to_string(),
        total: u64::from(pages) * 20,
        start_index: u64::from(current_page - 1) * 20 + 1,
        page_size: 20,
        current_page,
        pages,
        order_by: "newest".to_string(),
        results: ids.iter().map(|id| article(id)).collect(),
    }
}

pub fn ids(articles: &[Article]) -> Vec<&str> {
    articles.iter().map(|a| a.id.as_str()).collect()
}

/// Answers requests from a fixed script and records what was asked for.
#[derive(Default)]
pub struct ScriptedSource {
    responses: Mutex<VecDeque<Result<ResponsePage>>>,
    requests: Mutex<Vec<(u32, u32)>>,
}

impl ScriptedSource {
    pub fn new(responses: Vec<Result<ResponsePage>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn push(&self, response: Result<ResponsePage>) {
        self.responses.lock().unwrap().push_back(response);
    }

    /// `(page, page_size)` pairs in request order.
    pub fn requests(&self) -> Vec<(u32, u32)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ArticleSource for ScriptedSource {
    async fn fetch_page(&self, page: u32, page_size: u32) -> Result<ResponsePage> {
        self.requests.lock().unwrap().push((page, page_size));
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::Server("No scripted response".to_string())))
    }
}

/// Holds every request open until the test answers it.
pub struct GatedSource {
    started: mpsc::UnboundedSender<(u32, oneshot::Sender<Result<ResponsePage>>)>,
}

impl GatedSource {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<(u32, oneshot::Sender<Result<ResponsePage>>)>) {
        let (started, rx) = mpsc::unbounded_channel();
        (Self { started }, rx)
    }
}

#[async_trait]
impl ArticleSource for GatedSource {
    async fn fetch_page(&self, page: u32, _page_size: u32) -> Result<ResponsePage> {
        let (tx, rx) = oneshot::channel();
        self.started
            .send((page, tx))
            .map_err(|_| Error::Server("Test harness dropped".to_string()))?;
        rx.await
            .unwrap_or_else(|_| Err(Error::Server("Request abandoned".to_string())))
    }
}

/// Image source with a canned answer that counts its calls.
pub struct FakeImageSource {
    answer: Mutex<Option<Result<Vec<u8>>>>,
    calls: Mutex<Vec<String>>,
}

impl FakeImageSource {
    pub fn returning(answer: Result<Vec<u8>>) -> Self {
        Self {
            answer: Mutex::new(Some(answer)),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageSource for FakeImageSource {
    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>> {
        self.calls.lock().unwrap().push(url.to_string());
        self.answer
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Err(Error::Server("Image already served".to_string())))
    }
}
