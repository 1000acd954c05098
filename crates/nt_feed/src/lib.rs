//! Stateful sessions behind the article list and article detail screens.

pub mod detail;
pub mod list;

#[cfg(test)]
pub(crate) mod test_utils;

pub use detail::ArticleDetail;
pub use list::ArticleList;
