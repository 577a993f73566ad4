//! GNews business-headlines provider.
//!
//! `/api/v4/top-headlines` with `category=business`; the free tier caps at
//! 100 requests per day, hence the long default TTL.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::cache::TtlCache;
use crate::config::ProviderSettings;
use crate::errors::ProviderError;
use crate::models::NewsItem;
use crate::provider::NewsProvider;

const BASE_URL: &str = "https://gnews.io/api/v4";
const PROVIDER_ID: &str = "GNEWS";

/// GNews caps `max` at 100 on paid tiers, 10 on the free tier.
const MAX_PAGE_SIZE: usize = 50;

#[derive(Debug, Deserialize)]
struct HeadlinesResponse {
    #[serde(default)]
    articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Article {
    title: String,
    description: Option<String>,
    url: String,
    published_at: DateTime<Utc>,
    source: Option<ArticleSource>,
}

#[derive(Debug, Deserialize)]
struct ArticleSource {
    name: Option<String>,
}

pub struct GNewsProvider {
    client: Client,
    api_key: Option<String>,
    news: TtlCache<Vec<NewsItem>>,
}

impl GNewsProvider {
    pub fn new(settings: &ProviderSettings) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            api_key: settings.api_key.clone(),
            news: TtlCache::new(settings.cache_ttl),
        }
    }

    fn normalize(article: Article) -> NewsItem {
        let source = article
            .source
            .and_then(|s| s.name)
            .unwrap_or_else(|| "GNews".to_string());

        NewsItem {
            title: article.title,
            url: article.url,
            source,
            published_at: article.published_at,
            description: article.description.filter(|d| !d.is_empty()),
            category: Some("business".to_string()),
        }
    }
}

#[async_trait]
impl NewsProvider for GNewsProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn priority(&self) -> u8 {
        1
    }

    async fn latest_news(&self, limit: usize) -> Result<Vec<NewsItem>, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ProviderError::MissingApiKey {
                provider: PROVIDER_ID.to_string(),
            })?;

        let page_size = limit.min(MAX_PAGE_SIZE);
        let key = format!("headlines:{}", page_size);
        if let Some(hit) = self.news.get(&key) {
            return Ok(hit);
        }

        debug!("GNews: fetching business headlines");
        let response = self
            .client
            .get(format!("{}/top-headlines", BASE_URL))
            .query(&[
                ("category", "business"),
                ("lang", "en"),
                ("max", &page_size.to_string()),
                ("token", api_key),
            ])
            .send()
            .await
            .map_err(|e| ProviderError::from_request(PROVIDER_ID, e))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS
            || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(ProviderError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Upstream {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP {} - {}", status, body),
            });
        }

        let parsed: HeadlinesResponse =
            response
                .json()
                .await
                .map_err(|e| ProviderError::MalformedPayload {
                    provider: PROVIDER_ID.to_string(),
                    message: format!("headlines parse failed: {}", e),
                })?;

        let items: Vec<NewsItem> = parsed.articles.into_iter().map(Self::normalize).collect();

        self.news.insert(&key, items.clone());
        Ok(items)
    }

    fn clear_cache(&self) {
        self.news.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn article_normalizes() {
        let json = r#"{
            "articles": [{
                "title": "Markets rally on rate cut hopes",
                "description": "Stocks climbed...",
                "url": "https://example.com/markets-rally",
                "publishedAt": "2024-01-02T14:00:00Z",
                "source": { "name": "Example Finance", "url": "https://example.com" }
            }]
        }"#;
        let parsed: HeadlinesResponse = serde_json::from_str(json).unwrap();
        let item = GNewsProvider::normalize(parsed.articles.into_iter().next().unwrap());

        assert_eq!(item.source, "Example Finance");
        assert_eq!(item.description.as_deref(), Some("Stocks climbed..."));
        assert_eq!(item.category.as_deref(), Some("business"));
    }

    #[test]
    fn empty_description_becomes_none() {
        let article = Article {
            title: "t".to_string(),
            description: Some(String::new()),
            url: "u".to_string(),
            published_at: Utc::now(),
            source: None,
        };
        let item = GNewsProvider::normalize(article);
        assert!(item.description.is_none());
        assert_eq!(item.source, "GNews");
    }
}
