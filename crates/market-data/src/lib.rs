//! Market data retrieval for markethub.
//!
//! This crate talks to the external market data world: quotes, market
//! movers, financial news, and macroeconomic indicators, each sourced from
//! several redundant upstream APIs. Callers go through [`MarketAggregator`],
//! which owns one client per provider, walks priority-ordered fallback
//! chains, and treats provider exhaustion as absence rather than failure.
//! Every client caches responses with a per-provider TTL.

pub mod aggregator;
pub mod cache;
pub mod config;
pub mod errors;
pub mod models;
pub mod provider;

pub use aggregator::MarketAggregator;
pub use cache::TtlCache;
pub use config::{MarketDataConfig, ProviderSettings};
pub use errors::ProviderError;
pub use models::{
    AssetKind, EconomicIndicators, IndicatorKind, IndicatorPoint, MoverBoard, NewsItem, Quote,
    TopMovers,
};
