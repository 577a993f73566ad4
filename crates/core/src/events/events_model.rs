//! Economic calendar domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Expected market impact of a calendar entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventImpact {
    Low,
    Medium,
    High,
}

impl EventImpact {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventImpact::Low => "low",
            EventImpact::Medium => "medium",
            EventImpact::High => "high",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "low" => Some(EventImpact::Low),
            "medium" => Some(EventImpact::Medium),
            "high" => Some(EventImpact::High),
            _ => None,
        }
    }
}

/// A scheduled macroeconomic release or announcement.
///
/// `actual`, `forecast`, and `previous` are kept as the upstream's display
/// strings ("3.2%", "250K") rather than parsed numbers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EconomicEvent {
    pub id: String,
    pub title: String,
    pub country: String,
    pub impact: EventImpact,
    pub scheduled_at: DateTime<Utc>,
    pub actual: Option<String>,
    pub forecast: Option<String>,
    pub previous: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input model for creating a calendar entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEconomicEvent {
    pub title: String,
    pub country: String,
    pub impact: EventImpact,
    pub scheduled_at: DateTime<Utc>,
    pub actual: Option<String>,
    pub forecast: Option<String>,
    pub previous: Option<String>,
}
