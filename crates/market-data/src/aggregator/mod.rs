//! Aggregation service: one answer per logical query, composed from
//! redundant provider clients.
//!
//! The aggregator owns every client and hides individual provider failure:
//! quote lookups walk a fixed-priority fallback chain and short-circuit on
//! the first success; news fans out to all providers concurrently and
//! merges; indicator lookups tolerate per-field failure. Exhaustion is
//! absence (`None`/empty), never an error, since missing market data is
//! an expected condition.

mod dedup;

pub use dedup::{dedup_news, normalize_title};

use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, warn};

use crate::config::MarketDataConfig;
use crate::errors::ProviderError;
use crate::models::{
    AssetKind, EconomicIndicators, IndicatorKind, IndicatorPoint, MoverBoard, NewsItem, Quote,
    TopMovers,
};
use crate::provider::{
    binance::BinanceProvider, cryptopanic::CryptoPanicProvider, currents::CurrentsProvider,
    finnhub::FinnhubProvider, fred::FredProvider, gnews::GNewsProvider, polygon::PolygonProvider,
    twelve_data::TwelveDataProvider, world_bank::WorldBankProvider, yahoo::YahooProvider,
    IndicatorProvider, NewsProvider, QuoteProvider, SnapshotProvider,
};

/// Entries kept per side of a movers board.
const MOVERS_PER_SIDE: usize = 5;

/// Stateless composition over owned provider clients.
pub struct MarketAggregator {
    quote_providers: Vec<Arc<dyn QuoteProvider>>,
    news_providers: Vec<Arc<dyn NewsProvider>>,
    /// Tried in registration order per indicator.
    indicator_providers: Vec<Arc<dyn IndicatorProvider>>,
    stock_snapshot: Option<Arc<dyn SnapshotProvider>>,
    crypto_snapshot: Option<Arc<dyn SnapshotProvider>>,
}

impl MarketAggregator {
    pub fn new(
        quote_providers: Vec<Arc<dyn QuoteProvider>>,
        news_providers: Vec<Arc<dyn NewsProvider>>,
        indicator_providers: Vec<Arc<dyn IndicatorProvider>>,
        stock_snapshot: Option<Arc<dyn SnapshotProvider>>,
        crypto_snapshot: Option<Arc<dyn SnapshotProvider>>,
    ) -> Self {
        Self {
            quote_providers,
            news_providers,
            indicator_providers,
            stock_snapshot,
            crypto_snapshot,
        }
    }

    /// Build the full client set from configuration.
    pub fn from_config(config: &MarketDataConfig) -> Result<Self, ProviderError> {
        let binance = Arc::new(BinanceProvider::new(&config.binance));
        let yahoo = Arc::new(YahooProvider::new(&config.yahoo)?);
        let finnhub = Arc::new(FinnhubProvider::new(&config.finnhub));
        let twelve_data = Arc::new(TwelveDataProvider::new(&config.twelve_data));
        let polygon = Arc::new(PolygonProvider::new(&config.polygon));

        Ok(Self::new(
            vec![
                binance.clone() as Arc<dyn QuoteProvider>,
                yahoo,
                finnhub,
                twelve_data,
            ],
            vec![
                Arc::new(GNewsProvider::new(&config.gnews)),
                Arc::new(CryptoPanicProvider::new(&config.cryptopanic)),
                Arc::new(CurrentsProvider::new(&config.currents)),
            ],
            vec![
                Arc::new(FredProvider::new(&config.fred)),
                Arc::new(WorldBankProvider::new(&config.world_bank)),
            ],
            Some(polygon),
            Some(binance),
        ))
    }

    /// Fetch a quote for the given asset kind, walking the fallback chain.
    ///
    /// The first provider returning a quote wins and later providers are
    /// not contacted. Every provider failing yields `None`.
    pub async fn quote(&self, kind: AssetKind, symbol: &str) -> Option<Quote> {
        let chain = self.ordered_chain(kind);
        if chain.is_empty() {
            warn!("no quote providers registered for kind {:?}", kind);
            return None;
        }

        for provider in chain {
            match provider.quote(symbol).await {
                Ok(quote) => {
                    debug!("quote for {} served by '{}'", symbol, provider.id());
                    return Some(quote);
                }
                Err(e) => {
                    warn!(
                        "provider '{}' failed for {}: {}, trying next",
                        provider.id(),
                        symbol,
                        e
                    );
                }
            }
        }

        debug!("all providers exhausted for {}", symbol);
        None
    }

    pub async fn stock_quote(&self, symbol: &str) -> Option<Quote> {
        self.quote(AssetKind::Stock, symbol).await
    }

    pub async fn crypto_quote(&self, symbol: &str) -> Option<Quote> {
        self.quote(AssetKind::Crypto, symbol).await
    }

    pub async fn forex_quote(&self, symbol: &str) -> Option<Quote> {
        self.quote(AssetKind::Forex, symbol).await
    }

    /// Concurrent fan-out over all news providers, merged and deduplicated.
    ///
    /// Items are pre-sorted by (provider priority, published_at desc) so the
    /// first-seen-wins dedup is deterministic for a given input set, then
    /// re-sorted by recency and truncated to `limit`.
    pub async fn aggregated_news(&self, limit: usize) -> Vec<NewsItem> {
        let calls = self.news_providers.iter().map(|provider| {
            let provider = provider.clone();
            async move {
                let result = provider.latest_news(limit).await;
                (provider.id(), provider.priority(), result)
            }
        });

        let mut ranked: Vec<(u8, NewsItem)> = Vec::new();
        for (id, priority, result) in join_all(calls).await {
            match result {
                Ok(items) => ranked.extend(items.into_iter().map(|item| (priority, item))),
                Err(e) => warn!("news provider '{}' failed: {}", id, e),
            }
        }

        ranked.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.published_at.cmp(&a.1.published_at)));

        let mut items = dedup_news(ranked.into_iter().map(|(_, item)| item).collect());
        items.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        items.truncate(limit);
        items
    }

    /// Merge per-indicator lookups; a failed indicator stays absent.
    pub async fn economic_indicators(&self, country: &str) -> EconomicIndicators {
        let country = country.to_uppercase();
        let (gdp_growth, inflation, unemployment, interest_rate) = tokio::join!(
            self.indicator(&country, IndicatorKind::GdpGrowth),
            self.indicator(&country, IndicatorKind::Inflation),
            self.indicator(&country, IndicatorKind::Unemployment),
            self.indicator(&country, IndicatorKind::InterestRate),
        );

        EconomicIndicators {
            country,
            gdp_growth,
            inflation,
            unemployment,
            interest_rate,
        }
    }

    async fn indicator(&self, country: &str, kind: IndicatorKind) -> Option<IndicatorPoint> {
        for provider in &self.indicator_providers {
            match provider.indicator(country, kind).await {
                Ok(point) => return Some(point),
                Err(e) => debug!(
                    "indicator provider '{}' failed for {}/{}: {}",
                    provider.id(),
                    country,
                    kind.as_str(),
                    e
                ),
            }
        }
        None
    }

    /// Market movers: top and bottom slices by change percent.
    pub async fn top_movers(&self) -> TopMovers {
        let (stocks, crypto) = tokio::join!(
            Self::board(&self.stock_snapshot),
            Self::board(&self.crypto_snapshot),
        );

        TopMovers { stocks, crypto }
    }

    async fn board(provider: &Option<Arc<dyn SnapshotProvider>>) -> MoverBoard {
        let Some(provider) = provider else {
            return MoverBoard::default();
        };

        match provider.market_snapshot().await {
            Ok(quotes) => Self::slice_board(quotes),
            Err(e) => {
                warn!("snapshot provider '{}' failed: {}", provider.id(), e);
                MoverBoard::default()
            }
        }
    }

    fn slice_board(mut quotes: Vec<Quote>) -> MoverBoard {
        quotes.sort_by(|a, b| b.change_percent.cmp(&a.change_percent));

        let gainers: Vec<Quote> = quotes.iter().take(MOVERS_PER_SIDE).cloned().collect();
        let losers: Vec<Quote> = quotes
            .iter()
            .rev()
            .take(MOVERS_PER_SIDE)
            .cloned()
            .collect();

        MoverBoard { gainers, losers }
    }

    /// Evict every cache of every owned client.
    pub fn clear_all_caches(&self) {
        for provider in &self.quote_providers {
            provider.clear_cache();
        }
        for provider in &self.news_providers {
            provider.clear_cache();
        }
        for provider in &self.indicator_providers {
            provider.clear_cache();
        }
        if let Some(provider) = &self.stock_snapshot {
            provider.clear_cache();
        }
        if let Some(provider) = &self.crypto_snapshot {
            provider.clear_cache();
        }
    }

    /// Providers supporting `kind`, ordered by ascending priority value.
    fn ordered_chain(&self, kind: AssetKind) -> Vec<&Arc<dyn QuoteProvider>> {
        let mut chain: Vec<_> = self
            .quote_providers
            .iter()
            .filter(|p| p.kinds().contains(&kind))
            .collect();
        chain.sort_by_key(|p| p.priority());
        chain
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{Duration as ChronoDuration, Utc};
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use crate::cache::TtlCache;

    struct MockQuoteProvider {
        id: &'static str,
        priority: u8,
        kinds: &'static [AssetKind],
        calls: AtomicUsize,
        result: Option<Quote>,
    }

    impl MockQuoteProvider {
        fn failing(id: &'static str, priority: u8, kinds: &'static [AssetKind]) -> Self {
            Self {
                id,
                priority,
                kinds,
                calls: AtomicUsize::new(0),
                result: None,
            }
        }

        fn returning(
            id: &'static str,
            priority: u8,
            kinds: &'static [AssetKind],
            quote: Quote,
        ) -> Self {
            Self {
                id,
                priority,
                kinds,
                calls: AtomicUsize::new(0),
                result: Some(quote),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl QuoteProvider for MockQuoteProvider {
        fn id(&self) -> &'static str {
            self.id
        }

        fn priority(&self) -> u8 {
            self.priority
        }

        fn kinds(&self) -> &'static [AssetKind] {
            self.kinds
        }

        async fn quote(&self, _symbol: &str) -> Result<Quote, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.result {
                Some(quote) => Ok(quote.clone()),
                None => Err(ProviderError::Upstream {
                    provider: self.id.to_string(),
                    message: "mock failure".to_string(),
                }),
            }
        }

        fn clear_cache(&self) {}
    }

    struct MockNewsProvider {
        id: &'static str,
        priority: u8,
        items: Vec<NewsItem>,
        fail: bool,
    }

    #[async_trait]
    impl NewsProvider for MockNewsProvider {
        fn id(&self) -> &'static str {
            self.id
        }

        fn priority(&self) -> u8 {
            self.priority
        }

        async fn latest_news(&self, _limit: usize) -> Result<Vec<NewsItem>, ProviderError> {
            if self.fail {
                Err(ProviderError::Timeout {
                    provider: self.id.to_string(),
                })
            } else {
                Ok(self.items.clone())
            }
        }

        fn clear_cache(&self) {}
    }

    /// Mock client with a real TTL cache in front of a counted "upstream".
    struct CachingMockProvider {
        upstream_calls: AtomicUsize,
        cache: TtlCache<Quote>,
    }

    impl CachingMockProvider {
        fn new(ttl: Duration) -> Self {
            Self {
                upstream_calls: AtomicUsize::new(0),
                cache: TtlCache::new(ttl),
            }
        }
    }

    #[async_trait]
    impl QuoteProvider for CachingMockProvider {
        fn id(&self) -> &'static str {
            "CACHING_MOCK"
        }

        fn kinds(&self) -> &'static [AssetKind] {
            &[AssetKind::Stock]
        }

        async fn quote(&self, symbol: &str) -> Result<Quote, ProviderError> {
            if let Some(hit) = self.cache.get(symbol) {
                return Ok(hit);
            }
            // Each upstream fetch produces a distinct price.
            let fetch = self.upstream_calls.fetch_add(1, Ordering::SeqCst) + 1;
            let price = rust_decimal::Decimal::from(fetch as i64 * 10);
            let quote = Quote::new(symbol, price, dec!(0), dec!(0), "CACHING_MOCK");
            self.cache.insert(symbol, quote.clone());
            Ok(quote)
        }

        fn clear_cache(&self) {
            self.cache.clear();
        }
    }

    fn quote(symbol: &str, price: rust_decimal::Decimal, source: &str) -> Quote {
        Quote::new(symbol, price, dec!(0.25), dec!(0.25), source)
    }

    fn news(title: &str, url: &str, minutes_ago: i64) -> NewsItem {
        NewsItem {
            title: title.to_string(),
            url: url.to_string(),
            source: "mock".to_string(),
            published_at: Utc::now() - ChronoDuration::minutes(minutes_ago),
            description: None,
            category: None,
        }
    }

    fn aggregator_with_quotes(providers: Vec<Arc<dyn QuoteProvider>>) -> MarketAggregator {
        MarketAggregator::new(providers, vec![], vec![], None, None)
    }

    const STOCK: &[AssetKind] = &[AssetKind::Stock];

    #[tokio::test]
    async fn first_success_short_circuits() {
        let first = Arc::new(MockQuoteProvider::returning(
            "FIRST",
            1,
            STOCK,
            quote("AAPL", dec!(150), "FIRST"),
        ));
        let second = Arc::new(MockQuoteProvider::returning(
            "SECOND",
            2,
            STOCK,
            quote("AAPL", dec!(151), "SECOND"),
        ));
        let aggregator = aggregator_with_quotes(vec![first.clone(), second.clone()]);

        let result = aggregator.stock_quote("AAPL").await.unwrap();
        assert_eq!(result.source, "FIRST");
        assert_eq!(first.calls(), 1);
        assert_eq!(second.calls(), 0);
    }

    #[tokio::test]
    async fn failure_falls_through_to_next_provider() {
        let first = Arc::new(MockQuoteProvider::failing("FIRST", 1, STOCK));
        let second = Arc::new(MockQuoteProvider::returning(
            "SECOND",
            2,
            STOCK,
            quote("EURUSD", dec!(1.085), "SECOND"),
        ));
        let aggregator = aggregator_with_quotes(vec![first.clone(), second.clone()]);

        let result = aggregator.stock_quote("EURUSD").await.unwrap();
        assert_eq!(result.price, dec!(1.085));
        assert_eq!(result.change, dec!(0.25));
        assert_eq!(first.calls(), 1);
        assert_eq!(second.calls(), 1);
    }

    #[tokio::test]
    async fn exhausted_chain_is_none() {
        let first = Arc::new(MockQuoteProvider::failing("FIRST", 1, STOCK));
        let second = Arc::new(MockQuoteProvider::failing("SECOND", 2, STOCK));
        let aggregator = aggregator_with_quotes(vec![first, second]);

        assert!(aggregator.stock_quote("AAPL").await.is_none());
    }

    #[tokio::test]
    async fn chain_ordering_follows_priority_not_registration() {
        let low = Arc::new(MockQuoteProvider::returning(
            "LOW",
            9,
            STOCK,
            quote("AAPL", dec!(1), "LOW"),
        ));
        let high = Arc::new(MockQuoteProvider::returning(
            "HIGH",
            1,
            STOCK,
            quote("AAPL", dec!(2), "HIGH"),
        ));
        // Registered low-priority first.
        let aggregator = aggregator_with_quotes(vec![low, high]);

        let result = aggregator.stock_quote("AAPL").await.unwrap();
        assert_eq!(result.source, "HIGH");
    }

    #[tokio::test]
    async fn kind_filter_excludes_wrong_market() {
        let crypto_only = Arc::new(MockQuoteProvider::returning(
            "CRYPTO",
            1,
            &[AssetKind::Crypto],
            quote("BTCUSDT", dec!(67000), "CRYPTO"),
        ));
        let aggregator = aggregator_with_quotes(vec![crypto_only.clone()]);

        assert!(aggregator.stock_quote("AAPL").await.is_none());
        assert_eq!(crypto_only.calls(), 0);
        assert!(aggregator.crypto_quote("BTCUSDT").await.is_some());
    }

    #[tokio::test]
    async fn cached_client_hits_upstream_once_within_ttl() {
        let provider = Arc::new(CachingMockProvider::new(Duration::from_secs(60)));
        let aggregator = aggregator_with_quotes(vec![provider.clone()]);

        aggregator.stock_quote("AAPL").await.unwrap();
        aggregator.stock_quote("AAPL").await.unwrap();
        assert_eq!(provider.upstream_calls.load(Ordering::SeqCst), 1);

        // Distinct parameters are distinct cache keys.
        aggregator.stock_quote("MSFT").await.unwrap();
        assert_eq!(provider.upstream_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn expired_entry_refetches_upstream_with_new_value() {
        let provider = Arc::new(CachingMockProvider::new(Duration::from_millis(50)));
        let aggregator = aggregator_with_quotes(vec![provider.clone()]);

        let first = aggregator.stock_quote("AAPL").await.unwrap();
        let cached = aggregator.stock_quote("AAPL").await.unwrap();
        assert_eq!(cached.price, first.price);
        assert_eq!(provider.upstream_calls.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_millis(120)).await;

        let refreshed = aggregator.stock_quote("AAPL").await.unwrap();
        assert_eq!(provider.upstream_calls.load(Ordering::SeqCst), 2);
        assert_ne!(refreshed.price, first.price);
    }

    #[tokio::test]
    async fn clear_all_caches_forces_refetch() {
        let provider = Arc::new(CachingMockProvider::new(Duration::from_secs(60)));
        let aggregator = aggregator_with_quotes(vec![provider.clone()]);

        aggregator.stock_quote("AAPL").await.unwrap();
        aggregator.clear_all_caches();
        aggregator.stock_quote("AAPL").await.unwrap();
        assert_eq!(provider.upstream_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn news_merges_dedups_sorts_and_truncates() {
        let primary = Arc::new(MockNewsProvider {
            id: "PRIMARY",
            priority: 1,
            items: vec![
                news("Fed Holds Rates", "https://a.example/fed", 10),
                news("Oil rallies", "https://a.example/oil", 30),
            ],
            fail: false,
        });
        let secondary = Arc::new(MockNewsProvider {
            id: "SECONDARY",
            priority: 2,
            items: vec![
                // Duplicate of the primary item, differing only in casing
                // and whitespace; must lose to the higher-priority source.
                news("FED  holds rates", "https://b.example/fed-holds", 5),
                news("Gold slips", "https://b.example/gold", 20),
                news("Yen strengthens", "https://b.example/yen", 40),
            ],
            fail: false,
        });
        let aggregator =
            MarketAggregator::new(vec![], vec![primary, secondary], vec![], None, None);

        let items = aggregator.aggregated_news(3).await;

        assert_eq!(items.len(), 3);
        // Sorted by recency.
        assert!(items
            .windows(2)
            .all(|w| w[0].published_at >= w[1].published_at));
        // The duplicate survived through the priority-1 source only.
        let fed: Vec<_> = items
            .iter()
            .filter(|i| normalize_title(&i.title) == "fed holds rates")
            .collect();
        assert_eq!(fed.len(), 1);
        assert_eq!(fed[0].url, "https://a.example/fed");
    }

    #[tokio::test]
    async fn news_provider_failure_is_tolerated() {
        let healthy = Arc::new(MockNewsProvider {
            id: "HEALTHY",
            priority: 1,
            items: vec![news("A", "https://x.example/a", 1)],
            fail: false,
        });
        let broken = Arc::new(MockNewsProvider {
            id: "BROKEN",
            priority: 2,
            items: vec![],
            fail: true,
        });
        let aggregator = MarketAggregator::new(vec![], vec![healthy, broken], vec![], None, None);

        let items = aggregator.aggregated_news(10).await;
        assert_eq!(items.len(), 1);
    }

    #[tokio::test]
    async fn news_respects_limit() {
        let provider = Arc::new(MockNewsProvider {
            id: "P",
            priority: 1,
            items: (0..20)
                .map(|i| news(&format!("Title {}", i), &format!("https://x.example/{}", i), i))
                .collect(),
            fail: false,
        });
        let aggregator = MarketAggregator::new(vec![], vec![provider], vec![], None, None);

        assert_eq!(aggregator.aggregated_news(7).await.len(), 7);
    }

    struct MockIndicatorProvider {
        id: &'static str,
        supported: Option<IndicatorKind>,
    }

    #[async_trait]
    impl IndicatorProvider for MockIndicatorProvider {
        fn id(&self) -> &'static str {
            self.id
        }

        async fn indicator(
            &self,
            _country: &str,
            kind: IndicatorKind,
        ) -> Result<IndicatorPoint, ProviderError> {
            if self.supported == Some(kind) || self.supported.is_none() {
                Ok(IndicatorPoint {
                    value: dec!(2.5),
                    period: "2023".to_string(),
                    source: self.id.to_string(),
                })
            } else {
                Err(ProviderError::NoData)
            }
        }

        fn clear_cache(&self) {}
    }

    #[tokio::test]
    async fn partial_indicator_failure_leaves_field_absent() {
        // Only the interest rate resolves; everything else stays None.
        let rates_only = Arc::new(MockIndicatorProvider {
            id: "RATES",
            supported: Some(IndicatorKind::InterestRate),
        });
        let aggregator = MarketAggregator::new(vec![], vec![], vec![rates_only], None, None);

        let result = aggregator.economic_indicators("us").await;
        assert_eq!(result.country, "US");
        assert!(result.interest_rate.is_some());
        assert!(result.gdp_growth.is_none());
        assert!(result.inflation.is_none());
        assert!(result.unemployment.is_none());
    }

    #[test]
    fn movers_board_slices_top_and_bottom() {
        let quotes: Vec<Quote> = (0..12)
            .map(|i| {
                let pct = rust_decimal::Decimal::from(i) - dec!(6);
                Quote::new(&format!("S{}", i), dec!(100), pct, pct, "SNAP")
            })
            .collect();

        let board = MarketAggregator::slice_board(quotes);
        assert_eq!(board.gainers.len(), 5);
        assert_eq!(board.losers.len(), 5);
        assert_eq!(board.gainers[0].change_percent, dec!(5));
        assert_eq!(board.losers[0].change_percent, dec!(-6));
    }

    #[tokio::test]
    async fn missing_snapshot_provider_yields_empty_board() {
        let aggregator = MarketAggregator::new(vec![], vec![], vec![], None, None);
        let movers = aggregator.top_movers().await;
        assert!(movers.stocks.gainers.is_empty());
        assert!(movers.crypto.losers.is_empty());
    }
}
