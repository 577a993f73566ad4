//! Finnhub stock quote provider.
//!
//! Uses the `/quote` endpoint (60 calls/minute on the free tier). The API
//! key travels in the `X-Finnhub-Token` header.
//! API documentation: https://finnhub.io/docs/api

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

const BASE_URL: &str = "https://finnhub.io/api/v1";
const PROVIDER_ID: &str = "FINNHUB";

/// Response from `/quote`. Single-letter fields are Finnhub's naming.
#[derive(Debug, Deserialize)]
struct QuoteResponse {
    /// Current price
    c: Option<f64>,
    /// Change
    d: Option<f64>,
    /// Percent change
    dp: Option<f64>,
    /// Open price of the day
    o: Option<f64>,
    /// Timestamp (Unix seconds)
    t: Option<i64>,
}

pub struct FinnhubProvider {
    client: Client,
    api_key: Option<String>,
    quotes: TtlCache<Quote>,
}

impl FinnhubProvider {
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

    fn normalize(symbol: &str, response: &QuoteResponse) -> Result<Quote, ProviderError> {
        let price = response.c.ok_or_else(|| ProviderError::MalformedPayload {
            provider: PROVIDER_ID.to_string(),
            message: "missing current price".to_string(),
        })?;

        // Finnhub answers unknown symbols with zeros instead of an error.
        if price == 0.0 && response.o.unwrap_or(0.0) == 0.0 {
            return Err(ProviderError::SymbolNotFound(symbol.to_string()));
        }

        let to_decimal = |v: Option<f64>| v.and_then(Decimal::from_f64_retain);

        let timestamp = response
            .t
            .and_then(|ts| Utc.timestamp_opt(ts, 0).single())
            .unwrap_or_else(Utc::now);

        Ok(Quote {
            symbol: symbol.to_string(),
            price: Decimal::from_f64_retain(price).ok_or_else(|| {
                ProviderError::MalformedPayload {
                    provider: PROVIDER_ID.to_string(),
                    message: format!("non-finite price: {}", price),
                }
            })?,
            change: to_decimal(response.d).unwrap_or(Decimal::ZERO),
            change_percent: to_decimal(response.dp).unwrap_or(Decimal::ZERO),
            volume: None, // /quote does not report volume
            source: PROVIDER_ID.to_string(),
            timestamp,
        })
    }
}

#[async_trait]
impl QuoteProvider for FinnhubProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn priority(&self) -> u8 {
        2
    }

    fn kinds(&self) -> &'static [AssetKind] {
        &[AssetKind::Stock]
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

        debug!("Finnhub: fetching quote for {}", key);
        let response = self
            .client
            .get(format!("{}/quote", BASE_URL))
            .header("X-Finnhub-Token", api_key)
            .query(&[("symbol", key.as_str())])
            .send()
            .await
            .map_err(|e| ProviderError::from_request(PROVIDER_ID, e))?;

        let status = response.status();
        match status {
            reqwest::StatusCode::TOO_MANY_REQUESTS | reqwest::StatusCode::FORBIDDEN => {
                return Err(ProviderError::RateLimited {
                    provider: PROVIDER_ID.to_string(),
                })
            }
            reqwest::StatusCode::UNAUTHORIZED => {
                return Err(ProviderError::Upstream {
                    provider: PROVIDER_ID.to_string(),
                    message: "invalid or missing API key".to_string(),
                })
            }
            _ if !status.is_success() => {
                let body = response.text().await.unwrap_or_default();
                return Err(ProviderError::Upstream {
                    provider: PROVIDER_ID.to_string(),
                    message: format!("HTTP {} - {}", status, body),
                });
            }
            _ => {}
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
    fn quote_response_normalizes() {
        let json = r#"{"c":150.25,"d":1.5,"dp":1.01,"h":152.0,"l":148.5,"o":149.0,"pc":148.75,"t":1704067200}"#;
        let response: QuoteResponse = serde_json::from_str(json).unwrap();
        let quote = FinnhubProvider::normalize("AAPL", &response).unwrap();

        assert_eq!(quote.price, dec!(150.25));
        assert_eq!(quote.change, dec!(1.5));
        assert_eq!(quote.change_percent, dec!(1.01));
        assert!(quote.volume.is_none());
        assert_eq!(quote.source, "FINNHUB");
    }

    #[test]
    fn all_zero_response_is_symbol_not_found() {
        let response = QuoteResponse {
            c: Some(0.0),
            d: None,
            dp: None,
            o: Some(0.0),
            t: None,
        };
        let err = FinnhubProvider::normalize("NOPE", &response).unwrap_err();
        assert!(matches!(err, ProviderError::SymbolNotFound(_)));
    }

    #[tokio::test]
    async fn missing_api_key_fails_without_network() {
        let provider = FinnhubProvider::new(&ProviderSettings::with_key(
            None,
            Duration::from_secs(300),
        ));
        let err = provider.quote("AAPL").await.unwrap_err();
        assert!(matches!(err, ProviderError::MissingApiKey { .. }));
    }
}
