use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use markethub_market_data::{
    AssetKind, EconomicIndicators, MarketAggregator, Quote, TopMovers,
};
use tracing::{debug, warn};

use crate::errors::{Result, ValidationError};
use crate::markets::markets_model::{MarketAsset, NewMarketAsset};
use crate::markets::markets_traits::{MarketAssetRepositoryTrait, MarketsServiceTrait};
use crate::pagination::{Page, PageRequest};

pub struct MarketsService {
    asset_repository: Arc<dyn MarketAssetRepositoryTrait>,
    aggregator: Arc<MarketAggregator>,
}

impl MarketsService {
    pub fn new(
        asset_repository: Arc<dyn MarketAssetRepositoryTrait>,
        aggregator: Arc<MarketAggregator>,
    ) -> Self {
        Self {
            asset_repository,
            aggregator,
        }
    }
}

#[async_trait]
impl MarketsServiceTrait for MarketsService {
    async fn get_quote(&self, kind: AssetKind, symbol: &str) -> Option<Quote> {
        self.aggregator.quote(kind, symbol).await
    }

    async fn top_movers(&self) -> TopMovers {
        self.aggregator.top_movers().await
    }

    async fn economic_indicators(&self, country: &str) -> EconomicIndicators {
        self.aggregator.economic_indicators(country).await
    }

    fn list_assets(&self, page: PageRequest) -> Result<Page<MarketAsset>> {
        self.asset_repository.list(page)
    }

    fn search_assets(&self, query: &str, page: PageRequest) -> Result<Page<MarketAsset>> {
        self.asset_repository.search(query.trim(), page)
    }

    async fn track_asset(&self, new_asset: NewMarketAsset) -> Result<MarketAsset> {
        if new_asset.symbol.trim().is_empty() {
            return Err(ValidationError::MissingField("symbol".to_string()).into());
        }
        let new_asset = NewMarketAsset {
            symbol: new_asset.symbol.trim().to_uppercase(),
            ..new_asset
        };
        self.asset_repository.create(new_asset).await
    }

    async fn untrack_asset(&self, asset_id: &str) -> Result<usize> {
        self.asset_repository.delete(asset_id).await
    }

    async fn update_prices(&self) -> Result<usize> {
        let assets = self.asset_repository.list_all()?;
        debug!("refreshing prices for {} tracked assets", assets.len());

        let mut updated = 0;
        for asset in assets {
            let Some(quote) = self.aggregator.quote(asset.kind, &asset.symbol).await else {
                debug!("no quote resolvable for {}, skipping", asset.symbol);
                continue;
            };

            match self
                .asset_repository
                .save_quote(&asset.id, quote.price, quote.change_percent, Utc::now())
                .await
            {
                Ok(()) => updated += 1,
                Err(e) => warn!("failed to persist quote for {}: {}", asset.symbol, e),
            }
        }

        Ok(updated)
    }
}
