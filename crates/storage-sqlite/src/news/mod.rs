//! SQLite storage implementation for news articles.

mod model;
mod repository;

pub use model::{NewNewsArticleDB, NewsArticleDB};
pub use repository::NewsRepository;
