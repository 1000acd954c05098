//! Paginated article list session.
//!
//! State is published through a `watch` channel. Every transition runs inside
//! `send_modify`/`send_if_modified`, so a subscriber sees whole snapshots only.
//! Requests are tagged with a generation. Starting and finishing a first-page
//! load each begin a new one, and any completion from an older generation is
//! dropped.

use nt_core::{
    date, Article, ArticleSource, ListSnapshot, LoadingState, ResponsePage, Result,
    DEFAULT_PAGE_SIZE,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

pub struct ArticleList {
    source: Arc<dyn ArticleSource>,
    page_size: u32,
    state: watch::Sender<ListSnapshot>,
    // Only read or written while the watch lock is held.
    generation: AtomicU64,
}

impl ArticleList {
    pub fn new(source: Arc<dyn ArticleSource>) -> Self {
        Self::with_page_size(source, DEFAULT_PAGE_SIZE)
    }

    pub fn with_page_size(source: Arc<dyn ArticleSource>, page_size: u32) -> Self {
        let (state, _) = watch::channel(ListSnapshot::default());
        Self {
            source,
            page_size,
            state,
            generation: AtomicU64::new(0),
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn snapshot(&self) -> ListSnapshot {
        self.state.borrow().clone()
    }

    /// Receiver that is marked changed after every transition.
    pub fn subscribe(&self) -> watch::Receiver<ListSnapshot> {
        self.state.subscribe()
    }

    pub fn loading_state(&self) -> LoadingState {
        self.state.borrow().loading_state.clone()
    }

    pub fn current_page(&self) -> u32 {
        self.state.borrow().current_page
    }

    pub fn has_more_pages(&self) -> bool {
        self.state.borrow().has_more_pages
    }

    pub fn article_count(&self) -> usize {
        self.state.borrow().articles.len()
    }

    pub fn article(&self, index: usize) -> Option<Article> {
        self.state.borrow().articles.get(index).cloned()
    }

    pub fn can_load_more(&self) -> bool {
        self.state.borrow().can_load_more()
    }

    pub fn is_loading_more(&self) -> bool {
        self.state.borrow().is_loading_more()
    }

    /// Date label for a list row.
    pub fn formatted_date(&self, article: &Article) -> String {
        date::format_publication_date(&article.web_publication_date)
    }

    /// Load page 1, replacing the current articles on success. On failure the
    /// articles already held are kept and the state carries the message.
    pub async fn fetch_first_page(&self) {
        let generation = self.begin_first_page();
        let result = self.source.fetch_page(1, self.page_size).await;
        self.finish_first_page(generation, result);
    }

    pub async fn refresh(&self) {
        info!("Refreshing article list");
        self.fetch_first_page().await;
    }

    /// Request the next page. Returns `false` without touching state when
    /// there are no more pages or a load-more is already in flight.
    pub async fn load_more(&self) -> bool {
        let Some((generation, page)) = self.begin_load_more() else {
            debug!("Ignoring load more request");
            return false;
        };
        let result = self.source.fetch_page(page, self.page_size).await;
        self.finish_load_more(generation, page, result);
        true
    }

    /// Run [`fetch_first_page`](Self::fetch_first_page) on the runtime.
    pub fn spawn_fetch_first_page(self: &Arc<Self>) -> JoinHandle<()> {
        let list = Arc::clone(self);
        tokio::spawn(async move { list.fetch_first_page().await })
    }

    /// Run [`load_more`](Self::load_more) on the runtime.
    pub fn spawn_load_more(self: &Arc<Self>) -> JoinHandle<bool> {
        let list = Arc::clone(self);
        tokio::spawn(async move { list.load_more().await })
    }

    fn begin_first_page(&self) -> u64 {
        let mut generation = 0;
        self.state.send_modify(|state| {
            generation = self.generation.fetch_add(1, Ordering::Relaxed) + 1;
            state.current_page = 1;
            state.has_more_pages = true;
            state.loading_state = LoadingState::Loading;
        });
        debug!(generation, page_size = self.page_size, "Loading first page");
        generation
    }

    fn finish_first_page(&self, generation: u64, result: Result<ResponsePage>) {
        self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::Relaxed) != generation {
                debug!(generation, "Discarding stale first page");
                return false;
            }
            // A load-more issued while page 1 was in flight belongs to the old list.
            self.generation.fetch_add(1, Ordering::Relaxed);
            state.current_page = 1;
            match result {
                Ok(page) => {
                    info!(
                        articles = page.results.len(),
                        pages = page.pages,
                        "Loaded first page"
                    );
                    state.has_more_pages = page.has_more();
                    state.articles = page.results;
                    state.loading_state = LoadingState::Loaded;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load first page");
                    state.loading_state = LoadingState::Error(e.to_string());
                }
            }
            true
        });
    }

    fn begin_load_more(&self) -> Option<(u64, u32)> {
        let mut request = None;
        self.state.send_if_modified(|state| {
            if !state.can_load_more() {
                return false;
            }
            state.current_page += 1;
            state.loading_state = LoadingState::LoadingMore;
            request = Some((self.generation.load(Ordering::Relaxed), state.current_page));
            true
        });
        if let Some((generation, page)) = request {
            debug!(generation, page, page_size = self.page_size, "Loading more articles");
        }
        request
    }

    fn finish_load_more(&self, generation: u64, page: u32, result: Result<ResponsePage>) {
        self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::Relaxed) != generation {
                debug!(generation, page, "Discarding stale page");
                return false;
            }
            match result {
                Ok(response) => {
                    info!(page, articles = response.results.len(), "Loaded more articles");
                    state.has_more_pages = response.has_more();
                    state.articles.extend(response.results);
                    state.loading_state = LoadingState::Loaded;
                }
                Err(e) => {
                    warn!(page, error = %e, "Failed to load more articles");
                    state.current_page = state.current_page.saturating_sub(1).max(1);
                    state.loading_state = LoadingState::Error(e.to_string());
                }
            }
            true
        });
    }
}
