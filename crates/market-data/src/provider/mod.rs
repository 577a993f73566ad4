//! Provider client implementations.
//!
//! Each module wraps exactly one upstream API: it issues the HTTP call,
//! normalizes the provider-specific payload into the shared models, and
//! shields callers behind its own TTL cache. Providers never see each
//! other; composition happens in the aggregator.

mod traits;

pub mod binance;
pub mod cryptopanic;
pub mod currents;
pub mod finnhub;
pub mod fred;
pub mod gnews;
pub mod polygon;
pub mod twelve_data;
pub mod world_bank;
pub mod yahoo;

pub use traits::{IndicatorProvider, NewsProvider, QuoteProvider, SnapshotProvider};
