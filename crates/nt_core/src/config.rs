use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

use crate::{Error, Result, DEFAULT_PAGE_SIZE};

pub const DEFAULT_BASE_URL: &str = "https://content.guardianapis.com";

pub const ENV_BASE_URL: &str = "GUARDIAN_API_BASE_URL";
pub const ENV_API_KEY: &str = "GUARDIAN_API_KEY";
pub const ENV_PAGE_SIZE: &str = "GUARDIAN_PAGE_SIZE";

/// Connection settings for the content API, supplied by the host application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            page_size: default_page_size(),
        }
    }
}

impl ContentConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Defaults overridden by `GUARDIAN_API_BASE_URL`, `GUARDIAN_API_KEY` and
    /// `GUARDIAN_PAGE_SIZE`. The result is not validated.
    pub fn from_env() -> Result<Self> {
        Self::default().merge_vars(|key| std::env::var(key).ok())
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        serde_json::from_str(&raw).map_err(|e| {
            Error::config(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    /// Apply environment-style overrides on top of `self`.
    pub fn merge_vars<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
            self.base_url = base_url;
        }
        if let Some(api_key) = lookup(ENV_API_KEY).filter(|v| !v.trim().is_empty()) {
            self.api_key = api_key;
        }
        if let Some(page_size) = lookup(ENV_PAGE_SIZE) {
            self.page_size = page_size.trim().parse().map_err(|_| {
                Error::config(format!("{} must be a positive integer, got {:?}", ENV_PAGE_SIZE, page_size))
            })?;
        }
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(Error::InvalidRequest(format!(
                "API key not configured. Set {} or pass --api-key",
                ENV_API_KEY
            )));
        }
        if self.page_size == 0 {
            return Err(Error::InvalidRequest("page size must be greater than zero".to_string()));
        }
        if self.base_url.trim().is_empty() {
            return Err(Error::InvalidRequest("base URL must not be empty".to_string()));
        }
        Url::parse(&self.base_url)
            .map_err(|e| Error::InvalidRequest(format!("Invalid base URL {}: {}", self.base_url, e)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ContentConfig::default();
        assert_eq!(config.base_url, "https://content.guardianapis.com");
        assert_eq!(config.page_size, 20);
        assert!(config.api_key.is_empty());
    }

    #[test]
    fn test_missing_api_key_is_invalid_request() {
        let err = ContentConfig::default().validate().unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));
        assert!(ContentConfig::new("test").validate().is_ok());
    }

    #[test]
    fn test_invalid_values() {
        let zero = ContentConfig::new("test").with_page_size(0);
        assert!(matches!(zero.validate(), Err(Error::InvalidRequest(_))));

        let empty_base = ContentConfig::new("test").with_base_url("  ");
        assert!(matches!(empty_base.validate(), Err(Error::InvalidRequest(_))));

        let bad_url = ContentConfig::new("test").with_base_url("not a url");
        assert!(matches!(bad_url.validate(), Err(Error::InvalidRequest(_))));
    }

    #[test]
    fn test_merge_vars() {
        let config = ContentConfig::default()
            .merge_vars(lookup(&[
                (ENV_API_KEY, "secret"),
                (ENV_BASE_URL, "http://localhost:8080"),
                (ENV_PAGE_SIZE, "5"),
            ]))
            .unwrap();
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.page_size, 5);

        // blank values do not clobber existing settings
        let kept = ContentConfig::new("from-file")
            .merge_vars(lookup(&[(ENV_API_KEY, "  ")]))
            .unwrap();
        assert_eq!(kept.api_key, "from-file");

        let err = ContentConfig::default()
            .merge_vars(lookup(&[(ENV_PAGE_SIZE, "many")]))
            .unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_from_file_uses_defaults_for_missing_keys() {
        let path = std::env::temp_dir().join(format!("nt_config_{}.json", std::process::id()));
        std::fs::write(&path, r#"{"api_key": "file-key"}"#).unwrap();

        let config = ContentConfig::from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.api_key, "file-key");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    }
}
