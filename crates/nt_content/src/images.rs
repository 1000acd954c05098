use async_trait::async_trait;
use nt_core::{Error, ImageSource, Result};
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::client::transport_error;

/// Downloads article images over plain HTTP(S).
#[derive(Debug, Clone, Default)]
pub struct HttpImageSource {
    client: Client,
}

impl HttpImageSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ImageSource for HttpImageSource {
    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>> {
        let url = Url::parse(url)
            .map_err(|e| Error::InvalidRequest(format!("Invalid image URL {}: {}", url, e)))?;
        debug!(url = %url, "Fetching image");

        let response = self.client.get(url).send().await.map_err(transport_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Server(format!("Image request failed with HTTP {}", status)));
        }
        let bytes = response.bytes().await.map_err(transport_error)?;
        Ok(bytes.to_vec())
    }
}
