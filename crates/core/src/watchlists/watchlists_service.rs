use std::sync::Arc;

use async_trait::async_trait;
use markethub_market_data::{AssetKind, MarketAggregator};
use tracing::debug;

use crate::errors::{Result, ValidationError};
use crate::watchlists::watchlists_model::{NewWatchlistEntry, WatchlistEntry, WatchlistQuote};
use crate::watchlists::watchlists_traits::{WatchlistRepositoryTrait, WatchlistServiceTrait};

pub struct WatchlistService {
    watchlist_repository: Arc<dyn WatchlistRepositoryTrait>,
    aggregator: Arc<MarketAggregator>,
}

impl WatchlistService {
    pub fn new(
        watchlist_repository: Arc<dyn WatchlistRepositoryTrait>,
        aggregator: Arc<MarketAggregator>,
    ) -> Self {
        Self {
            watchlist_repository,
            aggregator,
        }
    }
}

#[async_trait]
impl WatchlistServiceTrait for WatchlistService {
    fn list(&self, user_id: &str) -> Result<Vec<WatchlistEntry>> {
        self.watchlist_repository.list_for_user(user_id)
    }

    async fn list_with_quotes(&self, user_id: &str) -> Result<Vec<WatchlistQuote>> {
        let entries = self.watchlist_repository.list_for_user(user_id)?;

        let mut joined = Vec::with_capacity(entries.len());
        for entry in entries {
            let quote = self.aggregator.quote(entry.kind, &entry.symbol).await;
            joined.push(WatchlistQuote { entry, quote });
        }
        Ok(joined)
    }

    async fn add(&self, entry: NewWatchlistEntry) -> Result<WatchlistEntry> {
        if entry.symbol.trim().is_empty() {
            return Err(ValidationError::MissingField("symbol".to_string()).into());
        }
        let entry = NewWatchlistEntry {
            symbol: entry.symbol.trim().to_uppercase(),
            ..entry
        };
        debug!(
            "adding {} ({}) to watchlist of {}",
            entry.symbol,
            entry.kind.as_str(),
            entry.user_id
        );
        self.watchlist_repository.insert_ignore(entry).await
    }

    async fn remove(&self, user_id: &str, symbol: &str, kind: AssetKind) -> Result<usize> {
        self.watchlist_repository
            .delete(user_id, &symbol.trim().to_uppercase(), kind)
            .await
    }
}
