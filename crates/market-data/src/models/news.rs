use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Normalized news item.
///
/// `url` is the natural deduplication key across providers; titles are
/// additionally compared in normalized form (see `aggregator::dedup`).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub title: String,

    pub url: String,

    /// Publication or provider name as reported upstream.
    pub source: String,

    pub published_at: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}
