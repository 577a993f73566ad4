//! Currents API news provider.
//!
//! `/v1/latest-news` filtered to the business category. Timestamps arrive
//! as `2024-01-01 08:30:00 +0000`, not RFC 3339, so parsing is explicit.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::cache::TtlCache;
use crate::config::ProviderSettings;
use crate::errors::ProviderError;
use crate::models::NewsItem;
use crate::provider::NewsProvider;

const BASE_URL: &str = "https://api.currentsapi.services/v1";
const PROVIDER_ID: &str = "CURRENTS";

const PUBLISHED_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

#[derive(Debug, Deserialize)]
struct LatestNewsResponse {
    #[serde(default)]
    news: Vec<Article>,
}

#[derive(Debug, Deserialize)]
struct Article {
    title: String,
    description: Option<String>,
    url: String,
    published: String,
    #[serde(default)]
    category: Vec<String>,
}

pub struct CurrentsProvider {
    client: Client,
    api_key: Option<String>,
    news: TtlCache<Vec<NewsItem>>,
}

impl CurrentsProvider {
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

    fn parse_published(raw: &str) -> Option<DateTime<Utc>> {
        DateTime::parse_from_str(raw.trim(), PUBLISHED_FORMAT)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    fn normalize(article: Article) -> Option<NewsItem> {
        let published_at = match Self::parse_published(&article.published) {
            Some(ts) => ts,
            None => {
                warn!(
                    "Currents: unparseable published timestamp '{}', dropping item",
                    article.published
                );
                return None;
            }
        };

        Some(NewsItem {
            title: article.title,
            url: article.url,
            source: "Currents".to_string(),
            published_at,
            description: article.description.filter(|d| !d.is_empty()),
            category: article.category.into_iter().next(),
        })
    }
}

#[async_trait]
impl NewsProvider for CurrentsProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn priority(&self) -> u8 {
        3
    }

    async fn latest_news(&self, limit: usize) -> Result<Vec<NewsItem>, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ProviderError::MissingApiKey {
                provider: PROVIDER_ID.to_string(),
            })?;

        let key = format!("latest:{}", limit);
        if let Some(hit) = self.news.get(&key) {
            return Ok(hit);
        }

        debug!("Currents: fetching latest business news");
        let response = self
            .client
            .get(format!("{}/latest-news", BASE_URL))
            .query(&[
                ("language", "en"),
                ("category", "business"),
                ("apiKey", api_key),
            ])
            .send()
            .await
            .map_err(|e| ProviderError::from_request(PROVIDER_ID, e))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
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

        let parsed: LatestNewsResponse =
            response
                .json()
                .await
                .map_err(|e| ProviderError::MalformedPayload {
                    provider: PROVIDER_ID.to_string(),
                    message: format!("news parse failed: {}", e),
                })?;

        let items: Vec<NewsItem> = parsed
            .news
            .into_iter()
            .filter_map(Self::normalize)
            .take(limit)
            .collect();

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
    use chrono::Timelike;

    #[test]
    fn published_timestamp_parses() {
        let ts = CurrentsProvider::parse_published("2024-01-01 08:30:00 +0000").unwrap();
        assert_eq!(ts.hour(), 8);
        assert_eq!(ts.minute(), 30);
    }

    #[test]
    fn article_normalizes_with_first_category() {
        let article = Article {
            title: "Oil prices slip".to_string(),
            description: Some("Brent fell...".to_string()),
            url: "https://example.com/oil".to_string(),
            published: "2024-01-01 08:30:00 +0000".to_string(),
            category: vec!["business".to_string(), "energy".to_string()],
        };
        let item = CurrentsProvider::normalize(article).unwrap();
        assert_eq!(item.category.as_deref(), Some("business"));
        assert_eq!(item.source, "Currents");
    }

    #[test]
    fn unparseable_timestamp_drops_item() {
        let article = Article {
            title: "t".to_string(),
            description: None,
            url: "u".to_string(),
            published: "yesterday".to_string(),
            category: vec![],
        };
        assert!(CurrentsProvider::normalize(article).is_none());
    }
}
