use serde::{Deserialize, Serialize};

/// Text shown in place of an article body when the API returned none.
pub const NO_CONTENT_PLACEHOLDER: &str = "No content available";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub section_id: String,
    pub section_name: String,
    /// ISO-8601 timestamp exactly as the API sent it.
    pub web_publication_date: String,
    pub web_title: String,
    pub web_url: String,
    pub api_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<ArticleFields>,
    #[serde(default)]
    pub is_hosted: bool,
    #[serde(default)]
    pub pillar_id: String,
    #[serde(default)]
    pub pillar_name: String,
}

impl Article {
    /// Headline when the API supplied one, the web title otherwise.
    pub fn title(&self) -> &str {
        self.fields
            .as_ref()
            .and_then(|f| f.headline.as_deref())
            .unwrap_or(&self.web_title)
    }

    pub fn trail_text(&self) -> Option<&str> {
        self.fields.as_ref().and_then(|f| f.trail_text.as_deref())
    }

    pub fn preferred_image_url(&self) -> Option<&str> {
        self.fields.as_ref().and_then(ArticleFields::preferred_image_url)
    }

    pub fn preferred_body(&self) -> Option<&str> {
        self.fields.as_ref().and_then(ArticleFields::preferred_body)
    }

    pub fn body_or_placeholder(&self) -> &str {
        self.preferred_body().unwrap_or(NO_CONTENT_PLACEHOLDER)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleFields {
    pub headline: Option<String>,
    pub trail_text: Option<String>,
    pub body_text: Option<String>,
    pub thumbnail: Option<String>,
    pub main: Option<String>,
    /// Alternate (HTML) body.
    pub body: Option<String>,
}

impl ArticleFields {
    /// Thumbnail first, then the main image.
    pub fn preferred_image_url(&self) -> Option<&str> {
        self.thumbnail.as_deref().or(self.main.as_deref())
    }

    /// Alternate body first, then the plain body text.
    pub fn preferred_body(&self) -> Option<&str> {
        self.body.as_deref().or(self.body_text.as_deref())
    }
}

/// One page of search results as reported by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsePage {
    pub status: String,
    pub total: u64,
    pub start_index: u64,
    pub page_size: u32,
    pub current_page: u32,
    /// Total number of pages.
    pub pages: u32,
    pub order_by: String,
    pub results: Vec<Article>,
}

impl ResponsePage {
    pub fn has_more(&self) -> bool {
        self.current_page < self.pages
    }
}

/// Wire envelope: `{ "response": { ... } }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchEnvelope {
    pub response: ResponsePage,
}
