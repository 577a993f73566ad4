//! World Bank open-data provider for macro indicators.
//!
//! `/v2/country/{country}/indicator/{code}?format=json&mrnev=1` returns the
//! most recent non-empty value. The payload is a two-element JSON array:
//! pagination metadata first, observations second. Keyless, so only the long
//! TTL protects the upstream.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use crate::cache::TtlCache;
use crate::config::ProviderSettings;
use crate::errors::ProviderError;
use crate::models::{IndicatorKind, IndicatorPoint};
use crate::provider::IndicatorProvider;

const BASE_URL: &str = "https://api.worldbank.org/v2";
const PROVIDER_ID: &str = "WORLD_BANK";

#[derive(Debug, Deserialize)]
struct Observation {
    date: Option<String>,
    value: Option<f64>,
}

pub struct WorldBankProvider {
    client: Client,
    points: TtlCache<IndicatorPoint>,
}

impl WorldBankProvider {
    pub fn new(settings: &ProviderSettings) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            points: TtlCache::new(settings.cache_ttl),
        }
    }

    fn indicator_code(kind: IndicatorKind) -> &'static str {
        match kind {
            IndicatorKind::GdpGrowth => "NY.GDP.MKTP.KD.ZG",
            IndicatorKind::Inflation => "FP.CPI.TOTL.ZG",
            IndicatorKind::Unemployment => "SL.UEM.TOTL.ZS",
            // Lending interest rate; FRED is preferred for the US policy rate.
            IndicatorKind::InterestRate => "FR.INR.LEND",
        }
    }

    fn extract_observation(body: &str) -> Result<Observation, ProviderError> {
        let malformed = |message: String| ProviderError::MalformedPayload {
            provider: PROVIDER_ID.to_string(),
            message,
        };

        let value: serde_json::Value = serde_json::from_str(body)
            .map_err(|e| malformed(format!("response parse failed: {}", e)))?;

        // Error responses are a one-element array carrying a "message" list.
        let observations = value
            .as_array()
            .and_then(|parts| parts.get(1))
            .ok_or_else(|| malformed("missing observation element".to_string()))?;

        let first = observations
            .as_array()
            .and_then(|rows| rows.first())
            .ok_or(ProviderError::NoData)?;

        serde_json::from_value(first.clone())
            .map_err(|e| malformed(format!("observation parse failed: {}", e)))
    }

    fn normalize(observation: Observation) -> Result<IndicatorPoint, ProviderError> {
        let raw = observation.value.ok_or(ProviderError::NoData)?;
        let value =
            Decimal::from_f64_retain(raw).ok_or_else(|| ProviderError::MalformedPayload {
                provider: PROVIDER_ID.to_string(),
                message: format!("non-finite value: {}", raw),
            })?;

        Ok(IndicatorPoint {
            value,
            period: observation.date.unwrap_or_default(),
            source: PROVIDER_ID.to_string(),
        })
    }
}

#[async_trait]
impl IndicatorProvider for WorldBankProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn indicator(
        &self,
        country: &str,
        kind: IndicatorKind,
    ) -> Result<IndicatorPoint, ProviderError> {
        let code = Self::indicator_code(kind);
        let key = format!("{}:{}", country.to_uppercase(), code);
        if let Some(hit) = self.points.get(&key) {
            return Ok(hit);
        }

        debug!("World Bank: fetching {} for {}", code, country);
        let url = format!(
            "{}/country/{}/indicator/{}",
            BASE_URL,
            urlencoding::encode(country),
            code
        );
        let response = self
            .client
            .get(&url)
            .query(&[("format", "json"), ("per_page", "1"), ("mrnev", "1")])
            .send()
            .await
            .map_err(|e| ProviderError::from_request(PROVIDER_ID, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Upstream {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP {} - {}", status, body),
            });
        }

        let body = response.text().await.map_err(ProviderError::Network)?;
        let point = Self::normalize(Self::extract_observation(&body)?)?;

        self.points.insert(&key, point.clone());
        Ok(point)
    }

    fn clear_cache(&self) {
        self.points.clear();
    }
}
