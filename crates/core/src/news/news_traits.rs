use async_trait::async_trait;
use markethub_market_data::NewsItem;

use crate::errors::Result;
use crate::news::news_model::{NewNewsArticle, NewsArticle};
use crate::pagination::{Page, PageRequest};

/// Trait for news repository operations
#[async_trait]
pub trait NewsRepositoryTrait: Send + Sync {
    fn find_by_id(&self, article_id: &str) -> Result<NewsArticle>;
    fn find_by_url(&self, url: &str) -> Result<NewsArticle>;
    /// Ordered by `published_at` descending.
    fn list(&self, page: PageRequest) -> Result<Page<NewsArticle>>;
    /// Insert unless an article with the same URL already exists.
    /// Returns `true` when a row was actually inserted.
    async fn insert_ignore(&self, article: NewNewsArticle) -> Result<bool>;
    async fn delete(&self, article_id: &str) -> Result<usize>;
}

/// Trait for news service operations
#[async_trait]
pub trait NewsServiceTrait: Send + Sync {
    /// Live aggregated feed; bypasses persistence entirely.
    async fn live_news(&self, limit: usize) -> Vec<NewsItem>;
    fn list_articles(&self, page: PageRequest) -> Result<Page<NewsArticle>>;
    /// Pull the aggregated feed and upsert by URL. Returns how many
    /// articles were newly persisted.
    async fn sync_news(&self) -> Result<usize>;
}
