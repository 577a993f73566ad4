//! Normalized data shapes shared by all provider clients.

mod indicators;
mod movers;
mod news;
mod quote;

pub use indicators::{EconomicIndicators, IndicatorKind, IndicatorPoint};
pub use movers::{MoverBoard, TopMovers};
pub use news::NewsItem;
pub use quote::{AssetKind, Quote};
