//! Twelve Data provider for stock and forex quotes.
//!
//! Uses the `/quote` endpoint with the API key as a query parameter. Twelve
//! Data reports change and percent change directly, and serves forex pairs
//! in `EUR/USD` notation; compact six-letter pairs are rewritten before the
//! request goes out.

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
use crate::provider::QuoteProvider;

const BASE_URL: &str = "https://api.twelvedata.com";
const PROVIDER_ID: &str = "TWELVE_DATA";

/// ISO codes accepted when splitting a compact pair like EURUSD.
const MAJOR_CURRENCIES: &[&str] = &[
    "USD", "EUR", "GBP", "JPY", "CHF", "AUD", "CAD", "NZD", "CNY", "SEK", "NOK", "SGD",
];

/// Response from `/quote`. Numeric fields arrive as strings.
#[derive(Debug, Deserialize)]
struct QuoteResponse {
    close: Option<String>,
    change: Option<String>,
    percent_change: Option<String>,
    volume: Option<String>,
    timestamp: Option<i64>,
    // Error responses reuse the same endpoint with these fields set.
    code: Option<i64>,
    message: Option<String>,
}

pub struct TwelveDataProvider {
    client: Client,
    api_key: Option<String>,
    quotes: TtlCache<Quote>,
}

impl TwelveDataProvider {
    pub fn new(settings: &ProviderSettings) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            api_key: settings.api_key.clone(),
            quotes: TtlCache::new(settings.cache_ttl),
        }
    }

    /// Rewrite EURUSD to EUR/USD when both halves are known currency codes.
    fn to_api_symbol(symbol: &str) -> String {
        if symbol.len() == 6 && !symbol.contains('/') {
            let (from, to) = symbol.split_at(3);
            if MAJOR_CURRENCIES.contains(&from) && MAJOR_CURRENCIES.contains(&to) {
                return format!("{}/{}", from, to);
            }
        }
        symbol.to_string()
    }

    fn normalize(symbol: &str, response: &QuoteResponse) -> Result<Quote, ProviderError> {
        if let Some(code) = response.code {
            let message = response.message.clone().unwrap_or_default();
            return Err(match code {
                404 => ProviderError::SymbolNotFound(symbol.to_string()),
                429 => ProviderError::RateLimited {
                    provider: PROVIDER_ID.to_string(),
                },
                _ => ProviderError::Upstream {
                    provider: PROVIDER_ID.to_string(),
                    message: format!("code {} - {}", code, message),
                },
            });
        }

        let parse = |field: &str, raw: Option<&String>| -> Result<Decimal, ProviderError> {
            raw.ok_or_else(|| ProviderError::MalformedPayload {
                provider: PROVIDER_ID.to_string(),
                message: format!("missing {}", field),
            })?
            .parse::<Decimal>()
            .map_err(|_| ProviderError::MalformedPayload {
                provider: PROVIDER_ID.to_string(),
                message: format!("bad {} value", field),
            })
        };

        let timestamp = response
            .timestamp
            .and_then(|ts| Utc.timestamp_opt(ts, 0).single())
            .unwrap_or_else(Utc::now);

        Ok(Quote {
            symbol: symbol.to_string(),
            price: parse("close", response.close.as_ref())?,
            change: parse("change", response.change.as_ref()).unwrap_or(Decimal::ZERO),
            change_percent: parse("percent_change", response.percent_change.as_ref())
                .unwrap_or(Decimal::ZERO),
            volume: response.volume.as_ref().and_then(|v| v.parse().ok()),
            source: PROVIDER_ID.to_string(),
            timestamp,
        })
    }
}

#[async_trait]
impl QuoteProvider for TwelveDataProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn priority(&self) -> u8 {
        3
    }

    fn kinds(&self) -> &'static [AssetKind] {
        &[AssetKind::Stock, AssetKind::Forex, AssetKind::Crypto]
    }

    async fn quote(&self, symbol: &str) -> Result<Quote, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ProviderError::MissingApiKey {
                provider: PROVIDER_ID.to_string(),
            })?;

        let key = symbol.to_uppercase();
        if let Some(hit) = self.quotes.get(&key) {
            return Ok(hit);
        }

        let api_symbol = Self::to_api_symbol(&key);
        debug!("Twelve Data: fetching quote for {}", api_symbol);
        let response = self
            .client
            .get(format!("{}/quote", BASE_URL))
            .query(&[("symbol", api_symbol.as_str()), ("apikey", api_key)])
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

        let parsed: QuoteResponse =
            response
                .json()
                .await
                .map_err(|e| ProviderError::MalformedPayload {
                    provider: PROVIDER_ID.to_string(),
                    message: format!("quote parse failed: {}", e),
                })?;

        let quote = Self::normalize(&key, &parsed)?;
        self.quotes.insert(&key, quote.clone());
        Ok(quote)
    }

    fn clear_cache(&self) {
        self.quotes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn compact_forex_pair_gets_slash() {
        assert_eq!(TwelveDataProvider::to_api_symbol("EURUSD"), "EUR/USD");
        assert_eq!(TwelveDataProvider::to_api_symbol("GBPJPY"), "GBP/JPY");
    }

    #[test]
    fn six_letter_ticker_is_left_alone() {
        assert_eq!(TwelveDataProvider::to_api_symbol("GOOGL"), "GOOGL");
        // AMZN-like six letter tickers that don't split into currencies
        assert_eq!(TwelveDataProvider::to_api_symbol("SNDLQQ"), "SNDLQQ");
        assert_eq!(TwelveDataProvider::to_api_symbol("EUR/USD"), "EUR/USD");
    }

    #[test]
    fn quote_response_normalizes() {
        let json = r#"{
            "symbol": "EUR/USD",
            "close": "1.08500",
            "change": "0.00270",
            "percent_change": "0.25",
            "timestamp": 1704067200
        }"#;
        let response: QuoteResponse = serde_json::from_str(json).unwrap();
        let quote = TwelveDataProvider::normalize("EURUSD", &response).unwrap();

        assert_eq!(quote.symbol, "EURUSD");
        assert_eq!(quote.price, dec!(1.085));
        assert_eq!(quote.change_percent, dec!(0.25));
        assert_eq!(quote.source, "TWELVE_DATA");
        assert!(quote.volume.is_none());
    }

    #[test]
    fn embedded_error_code_maps_to_error() {
        let json = r#"{"code":404,"message":"symbol not found","status":"error"}"#;
        let response: QuoteResponse = serde_json::from_str(json).unwrap();
        let err = TwelveDataProvider::normalize("NOPE", &response).unwrap_err();
        assert!(matches!(err, ProviderError::SymbolNotFound(_)));
    }
}
