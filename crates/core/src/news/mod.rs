//! News module - persisted articles and the live aggregation feed.

mod news_model;
mod news_service;
mod news_traits;

pub use news_model::{NewNewsArticle, NewsArticle};
pub use news_service::NewsService;
pub use news_traits::{NewsRepositoryTrait, NewsServiceTrait};
