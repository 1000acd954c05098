use crate::models::Article;
use serde::{Deserialize, Serialize};

/// Status of a list session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadingState {
    #[default]
    Idle,
    Loading,
    Loaded,
    LoadingMore,
    Error(String),
}

impl LoadingState {
    pub fn is_error(&self) -> bool {
        matches!(self, LoadingState::Error(_))
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            LoadingState::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Immutable view of a list session after a transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListSnapshot {
    pub articles: Vec<Article>,
    /// Last page requested, 1-based.
    pub current_page: u32,
    pub has_more_pages: bool,
    pub loading_state: LoadingState,
}

impl Default for ListSnapshot {
    fn default() -> Self {
        Self {
            articles: Vec::new(),
            current_page: 1,
            has_more_pages: true,
            loading_state: LoadingState::Idle,
        }
    }
}

impl ListSnapshot {
    pub fn can_load_more(&self) -> bool {
        self.has_more_pages && !self.is_loading_more()
    }

    pub fn is_loading_more(&self) -> bool {
        self.loading_state == LoadingState::LoadingMore
    }
}

/// Image state of a detail session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageState {
    pub data: Option<Vec<u8>>,
    pub is_loading: bool,
}
