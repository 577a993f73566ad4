//! Markets module - tracked assets, live quotes, movers, indicators.

mod markets_model;
mod markets_service;
mod markets_traits;

pub use markets_model::{MarketAsset, NewMarketAsset};
pub use markets_service::MarketsService;
pub use markets_traits::{MarketAssetRepositoryTrait, MarketsServiceTrait};
