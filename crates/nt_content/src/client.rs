use async_trait::async_trait;
use nt_core::{
    ArticleSource, Article, ContentConfig, Error, ResponsePage, Result, SearchEnvelope,
    DEFAULT_PAGE_SIZE,
};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::fmt;
use tracing::{debug, warn};
use url::Url;

/// Fields requested for every article so that list rows and the detail view
/// can be rendered without a second round trip.
pub const SHOW_FIELDS: &str = "headline,trailText,bodyText,thumbnail,main,body";
pub const ORDER_BY: &str = "newest";

const SEARCH_ENDPOINT: &str = "search";

/// Client for the content API `/search` endpoint.
#[derive(Clone)]
pub struct ContentClient {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl ContentClient {
    /// Build a client from validated configuration. A missing API key or base
    /// URL is a startup error and is reported as [`Error::InvalidRequest`].
    pub fn new(config: &ContentConfig) -> Result<Self> {
        config.validate()?;
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| Error::InvalidRequest(format!("Invalid base URL {}: {}", config.base_url, e)))?;
        let client = Client::builder()
            .user_agent(concat!("nt/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Server(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key.clone(),
        })
    }

    /// URL for one page of the newest articles.
    pub fn search_url(&self, page: u32, page_size: u32) -> Result<Url> {
        if page == 0 {
            return Err(Error::InvalidRequest("page must be at least 1".to_string()));
        }
        if page_size == 0 {
            return Err(Error::InvalidRequest("page size must be greater than zero".to_string()));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::InvalidRequest(format!("Base URL cannot be a base: {}", self.base_url)))?
            .pop_if_empty()
            .push(SEARCH_ENDPOINT);
        url.query_pairs_mut()
            .append_pair("api-key", &self.api_key)
            .append_pair("show-fields", SHOW_FIELDS)
            .append_pair("page-size", &page_size.to_string())
            .append_pair("page", &page.to_string())
            .append_pair("order-by", ORDER_BY);
        Ok(url)
    }

    /// Articles of the first page at the default page size.
    pub async fn fetch_articles(&self) -> Result<Vec<Article>> {
        Ok(self.fetch_page(1, DEFAULT_PAGE_SIZE).await?.results)
    }
}

impl fmt::Debug for ContentClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentClient")
            .field("client", &"<reqwest::Client>")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Error bodies carry `{"response": {"status": "error", "message": "..."}}`.
#[derive(Deserialize)]
struct ErrorEnvelope {
    response: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

fn server_error_detail(status: StatusCode, body: &[u8]) -> String {
    serde_json::from_slice::<ErrorEnvelope>(body)
        .map(|e| e.response.message)
        .unwrap_or_else(|_| format!("Server responded with HTTP {}", status))
}

pub(crate) fn transport_error(err: reqwest::Error) -> Error {
    if err.is_decode() {
        Error::Decoding(err.to_string())
    } else {
        Error::Server(err.to_string())
    }
}

#[async_trait]
impl ArticleSource for ContentClient {
    async fn fetch_page(&self, page: u32, page_size: u32) -> Result<ResponsePage> {
        let url = self.search_url(page, page_size)?;
        debug!(page, page_size, "Requesting search page");

        let response = self.client.get(url).send().await.map_err(transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(transport_error)?;

        if !status.is_success() {
            let detail = server_error_detail(status, &body);
            warn!(page, status = status.as_u16(), error = %detail, "Search request failed");
            return Err(Error::Server(detail));
        }

        let envelope: SearchEnvelope = serde_json::from_slice(&body).map_err(|e| {
            warn!(page, error = %e, "Search response did not match the expected shape");
            Error::Decoding(e.to_string())
        })?;

        debug!(
            page = envelope.response.current_page,
            pages = envelope.response.pages,
            results = envelope.response.results.len(),
            "Received search page"
        );
        Ok(envelope.response)
    }
}
