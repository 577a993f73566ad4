//! CryptoPanic news provider.
//!
//! Crypto headlines from `/api/v1/posts/`, auth token as query parameter.
//! Everything it returns is tagged with the `crypto` category.

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

const BASE_URL: &str = "https://cryptopanic.com/api/v1";
const PROVIDER_ID: &str = "CRYPTOPANIC";

#[derive(Debug, Deserialize)]
struct PostsResponse {
    #[serde(default)]
    results: Vec<Post>,
}

#[derive(Debug, Deserialize)]
struct Post {
    title: String,
    url: String,
    published_at: DateTime<Utc>,
    source: Option<PostSource>,
}

#[derive(Debug, Deserialize)]
struct PostSource {
    title: Option<String>,
}

pub struct CryptoPanicProvider {
    client: Client,
    api_key: Option<String>,
    news: TtlCache<Vec<NewsItem>>,
}

impl CryptoPanicProvider {
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

    fn normalize(post: Post) -> NewsItem {
        let source = post
            .source
            .and_then(|s| s.title)
            .unwrap_or_else(|| "CryptoPanic".to_string());

        NewsItem {
            title: post.title,
            url: post.url,
            source,
            published_at: post.published_at,
            description: None,
            category: Some("crypto".to_string()),
        }
    }
}

#[async_trait]
impl NewsProvider for CryptoPanicProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn priority(&self) -> u8 {
        2
    }

    async fn latest_news(&self, limit: usize) -> Result<Vec<NewsItem>, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ProviderError::MissingApiKey {
                provider: PROVIDER_ID.to_string(),
            })?;

        let key = format!("posts:{}", limit);
        if let Some(hit) = self.news.get(&key) {
            return Ok(hit);
        }

        debug!("CryptoPanic: fetching latest posts");
        let response = self
            .client
            .get(format!("{}/posts/", BASE_URL))
            .query(&[("auth_token", api_key), ("public", "true")])
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

        let parsed: PostsResponse =
            response
                .json()
                .await
                .map_err(|e| ProviderError::MalformedPayload {
                    provider: PROVIDER_ID.to_string(),
                    message: format!("posts parse failed: {}", e),
                })?;

        let items: Vec<NewsItem> = parsed
            .results
            .into_iter()
            .take(limit)
            .map(Self::normalize)
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

    #[test]
    fn post_normalizes_with_source_title() {
        let json = r#"{
            "results": [{
                "title": "Bitcoin breaks resistance",
                "url": "https://cryptopanic.com/news/123",
                "published_at": "2024-01-01T08:30:00Z",
                "source": { "title": "CoinDesk", "domain": "coindesk.com" }
            }]
        }"#;
        let parsed: PostsResponse = serde_json::from_str(json).unwrap();
        let item = CryptoPanicProvider::normalize(parsed.results.into_iter().next().unwrap());

        assert_eq!(item.source, "CoinDesk");
        assert_eq!(item.category.as_deref(), Some("crypto"));
        assert_eq!(item.url, "https://cryptopanic.com/news/123");
    }

    #[test]
    fn missing_source_falls_back_to_provider_name() {
        let post = Post {
            title: "t".to_string(),
            url: "u".to_string(),
            published_at: Utc::now(),
            source: None,
        };
        assert_eq!(CryptoPanicProvider::normalize(post).source, "CryptoPanic");
    }
}
