//! Provider client trait definitions.
//!
//! Each trait covers one logical query shape. A concrete client implements
//! whichever traits its upstream API can serve; the aggregator composes
//! clients per query without knowing upstream specifics.

use async_trait::async_trait;

use crate::errors::ProviderError;
use crate::models::{AssetKind, IndicatorKind, IndicatorPoint, NewsItem, Quote};

/// A client that can resolve a single symbol to a normalized [`Quote`].
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Stable identifier, used in `Quote::source` and logs.
    fn id(&self) -> &'static str;

    /// Fallback-chain position. Lower values are tried first.
    fn priority(&self) -> u8 {
        10
    }

    /// Asset kinds this provider can quote.
    fn kinds(&self) -> &'static [AssetKind];

    /// Fetch the latest quote, serving from the client's own cache when the
    /// entry is still within its TTL.
    async fn quote(&self, symbol: &str) -> Result<Quote, ProviderError>;

    /// Evict every cached entry immediately.
    fn clear_cache(&self);
}

/// A client that returns recent headlines as normalized [`NewsItem`]s.
#[async_trait]
pub trait NewsProvider: Send + Sync {
    fn id(&self) -> &'static str;

    /// Tie-break order when deduplicating across sources. Lower wins.
    fn priority(&self) -> u8 {
        10
    }

    async fn latest_news(&self, limit: usize) -> Result<Vec<NewsItem>, ProviderError>;

    fn clear_cache(&self);
}

/// A client that resolves one macro indicator for one country.
#[async_trait]
pub trait IndicatorProvider: Send + Sync {
    fn id(&self) -> &'static str;

    async fn indicator(
        &self,
        country: &str,
        kind: IndicatorKind,
    ) -> Result<IndicatorPoint, ProviderError>;

    fn clear_cache(&self);
}

/// A client that can return a full market snapshot in one call, used for
/// top-movers slicing.
#[async_trait]
pub trait SnapshotProvider: Send + Sync {
    fn id(&self) -> &'static str;

    async fn market_snapshot(&self) -> Result<Vec<Quote>, ProviderError>;

    fn clear_cache(&self);
}
