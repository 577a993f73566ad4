use std::sync::Arc;

use async_trait::async_trait;
use markethub_market_data::{MarketAggregator, NewsItem};
use tracing::{debug, warn};

use crate::errors::Result;
use crate::news::news_model::NewsArticle;
use crate::news::news_traits::{NewsRepositoryTrait, NewsServiceTrait};
use crate::pagination::{Page, PageRequest};

/// Batch size pulled from the aggregator on each sync run.
const SYNC_BATCH_SIZE: usize = 50;

pub struct NewsService {
    news_repository: Arc<dyn NewsRepositoryTrait>,
    aggregator: Arc<MarketAggregator>,
}

impl NewsService {
    pub fn new(
        news_repository: Arc<dyn NewsRepositoryTrait>,
        aggregator: Arc<MarketAggregator>,
    ) -> Self {
        Self {
            news_repository,
            aggregator,
        }
    }
}

#[async_trait]
impl NewsServiceTrait for NewsService {
    async fn live_news(&self, limit: usize) -> Vec<NewsItem> {
        self.aggregator.aggregated_news(limit).await
    }

    fn list_articles(&self, page: PageRequest) -> Result<Page<NewsArticle>> {
        self.news_repository.list(page)
    }

    async fn sync_news(&self) -> Result<usize> {
        let items = self.aggregator.aggregated_news(SYNC_BATCH_SIZE).await;
        debug!("syncing {} aggregated news items", items.len());

        let mut inserted = 0;
        for item in items {
            let url = item.url.clone();
            match self.news_repository.insert_ignore(item.into()).await {
                Ok(true) => inserted += 1,
                Ok(false) => {}
                Err(e) => warn!("failed to persist article {}: {}", url, e),
            }
        }

        debug!("news sync persisted {} new articles", inserted);
        Ok(inserted)
    }
}
