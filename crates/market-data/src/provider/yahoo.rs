//! Yahoo Finance provider, via the `yahoo_finance_api` chart client.
//!
//! First choice in the stock fallback chain: keyless and broadly covered.
//! Change and change-percent are derived from the last two daily closes,
//! since the chart endpoint does not report them directly.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use tracing::debug;
use yahoo_finance_api as yahoo;

use crate::cache::TtlCache;
use crate::config::ProviderSettings;
use crate::errors::ProviderError;
use crate::models::{AssetKind, Quote};
use crate::provider::QuoteProvider;

const PROVIDER_ID: &str = "YAHOO";

pub struct YahooProvider {
    connector: yahoo::YahooConnector,
    quotes: TtlCache<Quote>,
}

impl YahooProvider {
    pub fn new(settings: &ProviderSettings) -> Result<Self, ProviderError> {
        let connector = yahoo::YahooConnector::new().map_err(|e| ProviderError::Upstream {
            provider: PROVIDER_ID.to_string(),
            message: format!("failed to initialize connector: {}", e),
        })?;
        Ok(Self {
            connector,
            quotes: TtlCache::new(settings.cache_ttl),
        })
    }

    fn to_decimal(value: f64, field: &str) -> Result<Decimal, ProviderError> {
        Decimal::from_f64_retain(value).ok_or_else(|| ProviderError::MalformedPayload {
            provider: PROVIDER_ID.to_string(),
            message: format!("non-finite {} value: {}", field, value),
        })
    }

    /// Build a normalized quote from the two most recent daily bars.
    fn normalize(symbol: &str, bars: &[yahoo::Quote]) -> Result<Quote, ProviderError> {
        let last = bars.last().ok_or(ProviderError::NoData)?;

        let price = Self::to_decimal(last.close, "close")?;
        let previous = if bars.len() >= 2 {
            Self::to_decimal(bars[bars.len() - 2].close, "previous close")?
        } else {
            price
        };

        let change = price - previous;
        let change_percent = if previous.is_zero() {
            Decimal::ZERO
        } else {
            change / previous * Decimal::ONE_HUNDRED
        };

        let timestamp = Utc
            .timestamp_opt(last.timestamp as i64, 0)
            .single()
            .unwrap_or_else(Utc::now);

        Ok(Quote {
            symbol: symbol.to_string(),
            price,
            change,
            change_percent,
            volume: Some(Decimal::from(last.volume)),
            source: PROVIDER_ID.to_string(),
            timestamp,
        })
    }
}

#[async_trait]
impl QuoteProvider for YahooProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn priority(&self) -> u8 {
        1
    }

    fn kinds(&self) -> &'static [AssetKind] {
        &[AssetKind::Stock]
    }

    async fn quote(&self, symbol: &str) -> Result<Quote, ProviderError> {
        let key = symbol.to_uppercase();
        if let Some(hit) = self.quotes.get(&key) {
            return Ok(hit);
        }

        debug!("Yahoo: fetching daily bars for {}", key);
        let response = self
            .connector
            .get_quote_range(&key, "1d", "5d")
            .await
            .map_err(|e| match e {
                yahoo::YahooError::NoQuotes | yahoo::YahooError::NoResult => {
                    ProviderError::SymbolNotFound(key.clone())
                }
                other => ProviderError::Upstream {
                    provider: PROVIDER_ID.to_string(),
                    message: other.to_string(),
                },
            })?;

        let bars = response
            .quotes()
            .map_err(|_| ProviderError::SymbolNotFound(key.clone()))?;

        let quote = Self::normalize(&key, &bars)?;
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

    fn bar(timestamp: i64, close: f64, volume: u64) -> yahoo::Quote {
        yahoo::Quote {
            timestamp,
            open: close,
            high: close,
            low: close,
            volume,
            close,
            adjclose: close,
        }
    }

    #[test]
    fn change_derived_from_last_two_closes() {
        let bars = vec![bar(1704067200, 100.0, 500), bar(1704153600, 102.5, 800)];
        let quote = YahooProvider::normalize("AAPL", &bars).unwrap();

        assert_eq!(quote.price, dec!(102.5));
        assert_eq!(quote.change, dec!(2.5));
        assert_eq!(quote.change_percent, dec!(2.5));
        assert_eq!(quote.volume, Some(dec!(800)));
        assert_eq!(quote.source, "YAHOO");
    }

    #[test]
    fn single_bar_reports_zero_change() {
        let bars = vec![bar(1704067200, 55.0, 100)];
        let quote = YahooProvider::normalize("MSFT", &bars).unwrap();

        assert_eq!(quote.price, dec!(55));
        assert_eq!(quote.change, Decimal::ZERO);
        assert_eq!(quote.change_percent, Decimal::ZERO);
    }

    #[test]
    fn empty_bars_is_no_data() {
        let err = YahooProvider::normalize("AAPL", &[]).unwrap_err();
        assert!(matches!(err, ProviderError::NoData));
    }
}
