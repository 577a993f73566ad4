//! Polygon.io snapshot provider.
//!
//! Serves the US stock movers board via the
//! `/v2/snapshot/locale/us/markets/stocks/{gainers,losers}` endpoints.
//! Both directions are fetched and concatenated so the aggregator can slice
//! top/bottom itself.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use crate::cache::TtlCache;
use crate::config::ProviderSettings;
use crate::errors::ProviderError;
use crate::models::Quote;
use crate::provider::SnapshotProvider;

const BASE_URL: &str = "https://api.polygon.io";
const PROVIDER_ID: &str = "POLYGON";

#[derive(Debug, Deserialize)]
struct SnapshotResponse {
    #[serde(default)]
    tickers: Vec<SnapshotTicker>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotTicker {
    ticker: String,
    todays_change: Option<f64>,
    todays_change_perc: Option<f64>,
    day: Option<SnapshotBar>,
    prev_day: Option<SnapshotBar>,
    /// Last update in epoch nanoseconds.
    updated: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct SnapshotBar {
    /// Close price
    c: Option<f64>,
    /// Volume
    v: Option<f64>,
}

pub struct PolygonProvider {
    client: Client,
    api_key: Option<String>,
    snapshot: TtlCache<Vec<Quote>>,
}

impl PolygonProvider {
    pub fn new(settings: &ProviderSettings) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            api_key: settings.api_key.clone(),
            snapshot: TtlCache::new(settings.cache_ttl),
        }
    }

    fn normalize(ticker: &SnapshotTicker) -> Option<Quote> {
        // Fall back to the previous session close outside trading hours,
        // when the current day bar is zeroed.
        let close = ticker
            .day
            .as_ref()
            .and_then(|bar| bar.c)
            .filter(|c| *c != 0.0)
            .or_else(|| ticker.prev_day.as_ref().and_then(|bar| bar.c))?;

        let timestamp = ticker
            .updated
            .map(|ns| Utc.timestamp_nanos(ns))
            .unwrap_or_else(Utc::now);

        Some(Quote {
            symbol: ticker.ticker.clone(),
            price: Decimal::from_f64_retain(close)?,
            change: ticker
                .todays_change
                .and_then(Decimal::from_f64_retain)
                .unwrap_or(Decimal::ZERO),
            change_percent: ticker
                .todays_change_perc
                .and_then(Decimal::from_f64_retain)
                .unwrap_or(Decimal::ZERO),
            volume: ticker
                .day
                .as_ref()
                .and_then(|bar| bar.v)
                .and_then(Decimal::from_f64_retain),
            source: PROVIDER_ID.to_string(),
            timestamp,
        })
    }

    async fn fetch_direction(
        &self,
        api_key: &str,
        direction: &str,
    ) -> Result<Vec<SnapshotTicker>, ProviderError> {
        let url = format!(
            "{}/v2/snapshot/locale/us/markets/stocks/{}",
            BASE_URL, direction
        );
        debug!("Polygon: fetching {} snapshot", direction);

        let response = self
            .client
            .get(&url)
            .query(&[("apiKey", api_key)])
            .send()
            .await
            .map_err(|e| ProviderError::from_request(PROVIDER_ID, e))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Upstream {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP {} - {}", status, body),
            });
        }

        let parsed: SnapshotResponse =
            response
                .json()
                .await
                .map_err(|e| ProviderError::MalformedPayload {
                    provider: PROVIDER_ID.to_string(),
                    message: format!("snapshot parse failed: {}", e),
                })?;

        Ok(parsed.tickers)
    }
}

#[async_trait]
impl SnapshotProvider for PolygonProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn market_snapshot(&self) -> Result<Vec<Quote>, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ProviderError::MissingApiKey {
                provider: PROVIDER_ID.to_string(),
            })?;

        const KEY: &str = "us:movers";
        if let Some(hit) = self.snapshot.get(KEY) {
            return Ok(hit);
        }

        let gainers = self.fetch_direction(api_key, "gainers").await?;
        let losers = self.fetch_direction(api_key, "losers").await?;

        let quotes: Vec<Quote> = gainers
            .iter()
            .chain(losers.iter())
            .filter_map(Self::normalize)
            .collect();

        if quotes.is_empty() {
            return Err(ProviderError::NoData);
        }

        self.snapshot.insert(KEY, quotes.clone());
        Ok(quotes)
    }

    fn clear_cache(&self) {
        self.snapshot.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn snapshot_ticker_normalizes() {
        let json = r#"{
            "ticker": "NVDA",
            "todaysChange": 12.5,
            "todaysChangePerc": 2.75,
            "day": { "c": 465.5, "v": 31200000 },
            "prevDay": { "c": 453.0, "v": 28000000 },
            "updated": 1704067200000000000
        }"#;
        let ticker: SnapshotTicker = serde_json::from_str(json).unwrap();
        let quote = PolygonProvider::normalize(&ticker).unwrap();

        assert_eq!(quote.symbol, "NVDA");
        assert_eq!(quote.price, dec!(465.5));
        assert_eq!(quote.change_percent, dec!(2.75));
        assert_eq!(quote.source, "POLYGON");
    }

    #[test]
    fn zero_day_close_falls_back_to_prev_day() {
        let json = r#"{
            "ticker": "AAPL",
            "todaysChangePerc": -0.5,
            "day": { "c": 0.0, "v": 0 },
            "prevDay": { "c": 189.95, "v": 50000000 }
        }"#;
        let ticker: SnapshotTicker = serde_json::from_str(json).unwrap();
        let quote = PolygonProvider::normalize(&ticker).unwrap();
        assert_eq!(quote.price, dec!(189.95));
    }

    #[test]
    fn ticker_without_any_close_is_skipped() {
        let json = r#"{"ticker": "XXXX"}"#;
        let ticker: SnapshotTicker = serde_json::from_str(json).unwrap();
        assert!(PolygonProvider::normalize(&ticker).is_none());
    }
}
