//! Market asset domain models.

use chrono::{DateTime, Utc};
use markethub_market_data::AssetKind;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A tracked instrument with its last persisted quote.
///
/// Price fields are `None` until the first successful refresh; the symbol
/// and kind together form the natural key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MarketAsset {
    pub id: String,
    pub symbol: String,
    pub kind: AssetKind,
    pub name: String,
    pub price: Option<Decimal>,
    pub change_percent: Option<Decimal>,
    pub price_updated_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Input model for tracking a new asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMarketAsset {
    pub symbol: String,
    pub kind: AssetKind,
    pub name: String,
}
