//! Watchlist domain models.

use chrono::{DateTime, Utc};
use markethub_market_data::{AssetKind, Quote};
use serde::{Deserialize, Serialize};

/// One (user, symbol) watchlist row. The pair is unique per kind.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistEntry {
    pub id: String,
    pub user_id: String,
    pub symbol: String,
    pub kind: AssetKind,
    pub created_at: DateTime<Utc>,
}

/// Input model for adding a symbol to a watchlist.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWatchlistEntry {
    pub user_id: String,
    pub symbol: String,
    pub kind: AssetKind,
}

/// Watchlist entry joined with its live quote, when one resolved.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistQuote {
    pub entry: WatchlistEntry,
    pub quote: Option<Quote>,
}
