use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Asset classification used to pick a provider fallback chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Stock,
    Crypto,
    Forex,
}

impl AssetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::Stock => "stock",
            AssetKind::Crypto => "crypto",
            AssetKind::Forex => "forex",
        }
    }
}

/// Normalized market quote.
///
/// Every provider client maps its own response shape into this struct.
/// `source` records which provider produced the value so that fallback
/// ordering can be verified from the outside.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub symbol: String,

    pub price: Decimal,

    /// Absolute change over the provider's reference period (usually 24h or
    /// previous close).
    pub change: Decimal,

    pub change_percent: Decimal,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<Decimal>,

    /// Provider id that produced this quote (BINANCE, YAHOO, ...).
    pub source: String,

    pub timestamp: DateTime<Utc>,
}

impl Quote {
    pub fn new(symbol: &str, price: Decimal, change: Decimal, change_percent: Decimal, source: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            price,
            change,
            change_percent,
            volume: None,
            source: source.to_string(),
            timestamp: Utc::now(),
        }
    }
}
