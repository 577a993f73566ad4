//! Binance market data provider.
//!
//! Crypto quotes and full-market snapshots via the public
//! `/api/v3/ticker/24hr` endpoint. No API key required; the endpoint is
//! weight-limited, which the short cache TTL absorbs.

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
use crate::models::{AssetKind, Quote};
use crate::provider::{QuoteProvider, SnapshotProvider};

const BASE_URL: &str = "https://api.binance.com/api/v3";
const PROVIDER_ID: &str = "BINANCE";

/// One row of the 24hr ticker endpoint. All numbers arrive as strings.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Ticker24h {
    symbol: String,
    last_price: String,
    price_change: String,
    price_change_percent: String,
    volume: String,
    /// Close time in epoch milliseconds.
    close_time: i64,
}

#[derive(Debug, Deserialize)]
struct BinanceErrorBody {
    code: Option<i64>,
    msg: Option<String>,
}

pub struct BinanceProvider {
    client: Client,
    quotes: TtlCache<Quote>,
    snapshot: TtlCache<Vec<Quote>>,
}

impl BinanceProvider {
    pub fn new(settings: &ProviderSettings) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            quotes: TtlCache::new(settings.cache_ttl),
            snapshot: TtlCache::new(settings.cache_ttl),
        }
    }

    async fn fetch_text(&self, url: &str) -> Result<String, ProviderError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ProviderError::from_request(PROVIDER_ID, e))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS
            || status == reqwest::StatusCode::IM_A_TEAPOT
        {
            // 418 is Binance's auto-ban response for repeated 429s.
            return Err(ProviderError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }

        let body = response.text().await.map_err(ProviderError::Network)?;

        if !status.is_success() {
            if let Ok(err) = serde_json::from_str::<BinanceErrorBody>(&body) {
                // -1121 = invalid symbol
                if err.code == Some(-1121) {
                    return Err(ProviderError::SymbolNotFound(
                        err.msg.unwrap_or_else(|| "Invalid symbol".to_string()),
                    ));
                }
            }
            return Err(ProviderError::Upstream {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP {} - {}", status, body),
            });
        }

        Ok(body)
    }

    fn normalize(ticker: &Ticker24h) -> Result<Quote, ProviderError> {
        let parse = |field: &str, raw: &str| -> Result<Decimal, ProviderError> {
            raw.parse::<Decimal>()
                .map_err(|_| ProviderError::MalformedPayload {
                    provider: PROVIDER_ID.to_string(),
                    message: format!("bad {} value: {}", field, raw),
                })
        };

        let timestamp = Utc
            .timestamp_millis_opt(ticker.close_time)
            .single()
            .unwrap_or_else(Utc::now);

        Ok(Quote {
            symbol: ticker.symbol.clone(),
            price: parse("lastPrice", &ticker.last_price)?,
            change: parse("priceChange", &ticker.price_change)?,
            change_percent: parse("priceChangePercent", &ticker.price_change_percent)?,
            volume: ticker.volume.parse::<Decimal>().ok(),
            source: PROVIDER_ID.to_string(),
            timestamp,
        })
    }
}

#[async_trait]
impl QuoteProvider for BinanceProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn priority(&self) -> u8 {
        1
    }

    fn kinds(&self) -> &'static [AssetKind] {
        &[AssetKind::Crypto]
    }

    async fn quote(&self, symbol: &str) -> Result<Quote, ProviderError> {
        let key = symbol.to_uppercase();
        if let Some(hit) = self.quotes.get(&key) {
            return Ok(hit);
        }

        debug!("Binance: fetching 24hr ticker for {}", key);
        let url = format!("{}/ticker/24hr?symbol={}", BASE_URL, key);
        let body = self.fetch_text(&url).await?;

        let ticker: Ticker24h =
            serde_json::from_str(&body).map_err(|e| ProviderError::MalformedPayload {
                provider: PROVIDER_ID.to_string(),
                message: format!("ticker parse failed: {}", e),
            })?;

        let quote = Self::normalize(&ticker)?;
        self.quotes.insert(&key, quote.clone());
        Ok(quote)
    }

    fn clear_cache(&self) {
        self.quotes.clear();
        self.snapshot.clear();
    }
}

#[async_trait]
impl SnapshotProvider for BinanceProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    /// Full 24hr snapshot, reduced to USDT-quoted pairs with nonzero volume.
    async fn market_snapshot(&self) -> Result<Vec<Quote>, ProviderError> {
        const KEY: &str = "24hr:usdt";
        if let Some(hit) = self.snapshot.get(KEY) {
            return Ok(hit);
        }

        debug!("Binance: fetching full 24hr snapshot");
        let url = format!("{}/ticker/24hr", BASE_URL);
        let body = self.fetch_text(&url).await?;

        let tickers: Vec<Ticker24h> =
            serde_json::from_str(&body).map_err(|e| ProviderError::MalformedPayload {
                provider: PROVIDER_ID.to_string(),
                message: format!("snapshot parse failed: {}", e),
            })?;

        let quotes: Vec<Quote> = tickers
            .iter()
            .filter(|t| t.symbol.ends_with("USDT"))
            .filter_map(|t| Self::normalize(t).ok())
            .filter(|q| q.volume.map(|v| v > Decimal::ZERO).unwrap_or(false))
            .collect();

        if quotes.is_empty() {
            return Err(ProviderError::NoData);
        }

        self.snapshot.insert(KEY, quotes.clone());
        Ok(quotes)
    }

    fn clear_cache(&self) {
        QuoteProvider::clear_cache(self);
    }
}
