//! SQLite storage implementation for market assets.

mod model;
mod repository;

pub use model::{MarketAssetDB, NewMarketAssetDB};
pub use repository::MarketAssetRepository;
