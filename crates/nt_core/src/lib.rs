pub mod config;
pub mod date;
pub mod error;
pub mod models;
pub mod source;
pub mod types;

pub use config::ContentConfig;
pub use error::{Error, Result};
pub use models::{Article, ArticleFields, ResponsePage, SearchEnvelope, NO_CONTENT_PLACEHOLDER};
pub use source::{ArticleSource, ImageSource};
pub use types::{ImageState, ListSnapshot, LoadingState};

/// Page size used when the host application does not configure one.
pub const DEFAULT_PAGE_SIZE: u32 = 20;
