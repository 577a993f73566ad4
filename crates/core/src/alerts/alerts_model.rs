//! Price alert domain models.

use chrono::{DateTime, Utc};
use markethub_market_data::AssetKind;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which side of the target price fires the alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertDirection {
    Above,
    Below,
}

impl AlertDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertDirection::Above => "above",
            AlertDirection::Below => "below",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "above" => Some(AlertDirection::Above),
            "below" => Some(AlertDirection::Below),
            _ => None,
        }
    }

    /// Inclusive crossing predicate: a price exactly at the target fires.
    pub fn crossed(&self, price: Decimal, target: Decimal) -> bool {
        match self {
            AlertDirection::Above => price >= target,
            AlertDirection::Below => price <= target,
        }
    }
}

/// A user's standing price alert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserAlert {
    pub id: String,
    pub user_id: String,
    pub symbol: String,
    pub kind: AssetKind,
    pub price_target: Decimal,
    pub direction: AlertDirection,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// Input model for creating an alert.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUserAlert {
    pub user_id: String,
    pub symbol: String,
    pub kind: AssetKind,
    pub price_target: Decimal,
    pub direction: AlertDirection,
}

/// One alert whose predicate held at check time, with the price seen.
///
/// Emitting this does not deactivate the alert; delivery and state
/// transitions are a consumer concern.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggeredAlert {
    pub alert: UserAlert,
    pub price: Decimal,
    pub checked_at: DateTime<Utc>,
}
