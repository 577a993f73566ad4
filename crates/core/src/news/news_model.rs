//! News domain models.

use chrono::{DateTime, Utc};
use markethub_market_data::NewsItem;
use serde::{Deserialize, Serialize};

/// Persisted news article. The URL is the natural key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    pub id: String,
    pub title: String,
    pub url: String,
    pub source: String,
    pub published_at: DateTime<Utc>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input model for persisting an article.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNewsArticle {
    pub title: String,
    pub url: String,
    pub source: String,
    pub published_at: DateTime<Utc>,
    pub description: Option<String>,
    pub category: Option<String>,
}

impl From<NewsItem> for NewNewsArticle {
    fn from(item: NewsItem) -> Self {
        Self {
            title: item.title,
            url: item.url,
            source: item.source,
            published_at: item.published_at,
            description: item.description,
            category: item.category,
        }
    }
}
