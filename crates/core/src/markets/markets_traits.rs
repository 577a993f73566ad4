use async_trait::async_trait;
use chrono::{DateTime, Utc};
use markethub_market_data::{AssetKind, EconomicIndicators, Quote, TopMovers};
use rust_decimal::Decimal;

use crate::errors::Result;
use crate::markets::markets_model::{MarketAsset, NewMarketAsset};
use crate::pagination::{Page, PageRequest};

/// Trait for market asset repository operations
#[async_trait]
pub trait MarketAssetRepositoryTrait: Send + Sync {
    fn find_by_id(&self, asset_id: &str) -> Result<MarketAsset>;
    fn find_by_symbol(&self, symbol: &str, kind: AssetKind) -> Result<MarketAsset>;
    fn list(&self, page: PageRequest) -> Result<Page<MarketAsset>>;
    fn list_all(&self) -> Result<Vec<MarketAsset>>;
    fn search(&self, query: &str, page: PageRequest) -> Result<Page<MarketAsset>>;
    async fn create(&self, new_asset: NewMarketAsset) -> Result<MarketAsset>;
    async fn delete(&self, asset_id: &str) -> Result<usize>;
    async fn save_quote(
        &self,
        asset_id: &str,
        price: Decimal,
        change_percent: Decimal,
        as_of: DateTime<Utc>,
    ) -> Result<()>;
}

/// Trait for markets service operations
#[async_trait]
pub trait MarketsServiceTrait: Send + Sync {
    /// Live quote routed through the fallback chain for `kind`.
    /// `None` means every provider was exhausted.
    async fn get_quote(&self, kind: AssetKind, symbol: &str) -> Option<Quote>;
    async fn top_movers(&self) -> TopMovers;
    async fn economic_indicators(&self, country: &str) -> EconomicIndicators;
    fn list_assets(&self, page: PageRequest) -> Result<Page<MarketAsset>>;
    fn search_assets(&self, query: &str, page: PageRequest) -> Result<Page<MarketAsset>>;
    async fn track_asset(&self, new_asset: NewMarketAsset) -> Result<MarketAsset>;
    async fn untrack_asset(&self, asset_id: &str) -> Result<usize>;
    /// Refresh persisted prices for every tracked asset. Returns the number
    /// of assets updated; assets with no resolvable quote are skipped.
    async fn update_prices(&self) -> Result<usize>;
}
