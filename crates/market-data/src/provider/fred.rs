//! FRED (St. Louis Fed) provider for the US policy interest rate.
//!
//! `/fred/series/observations` on the FEDFUNDS series, newest observation
//! first. FRED publishes US series only, so any other country is answered
//! with `NoData` and the aggregator falls through to the World Bank rate.

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

const BASE_URL: &str = "https://api.stlouisfed.org/fred";
const PROVIDER_ID: &str = "FRED";

const FED_FUNDS_SERIES: &str = "FEDFUNDS";

#[derive(Debug, Deserialize)]
struct ObservationsResponse {
    #[serde(default)]
    observations: Vec<Observation>,
}

#[derive(Debug, Deserialize)]
struct Observation {
    date: String,
    /// FRED reports missing values as ".".
    value: String,
}

pub struct FredProvider {
    client: Client,
    api_key: Option<String>,
    points: TtlCache<IndicatorPoint>,
}

impl FredProvider {
    pub fn new(settings: &ProviderSettings) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            api_key: settings.api_key.clone(),
            points: TtlCache::new(settings.cache_ttl),
        }
    }

    fn is_us(country: &str) -> bool {
        matches!(
            country.to_uppercase().as_str(),
            "US" | "USA" | "UNITED STATES"
        )
    }

    fn normalize(observation: &Observation) -> Result<IndicatorPoint, ProviderError> {
        if observation.value.trim() == "." {
            return Err(ProviderError::NoData);
        }
        let value =
            observation
                .value
                .parse::<Decimal>()
                .map_err(|_| ProviderError::MalformedPayload {
                    provider: PROVIDER_ID.to_string(),
                    message: format!("bad observation value: {}", observation.value),
                })?;

        Ok(IndicatorPoint {
            value,
            period: observation.date.clone(),
            source: PROVIDER_ID.to_string(),
        })
    }
}

#[async_trait]
impl IndicatorProvider for FredProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn indicator(
        &self,
        country: &str,
        kind: IndicatorKind,
    ) -> Result<IndicatorPoint, ProviderError> {
        if kind != IndicatorKind::InterestRate || !Self::is_us(country) {
            return Err(ProviderError::NoData);
        }

        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ProviderError::MissingApiKey {
                provider: PROVIDER_ID.to_string(),
            })?;

        let key = format!("series:{}", FED_FUNDS_SERIES);
        if let Some(hit) = self.points.get(&key) {
            return Ok(hit);
        }

        debug!("FRED: fetching latest {} observation", FED_FUNDS_SERIES);
        let response = self
            .client
            .get(format!("{}/series/observations", BASE_URL))
            .query(&[
                ("series_id", FED_FUNDS_SERIES),
                ("api_key", api_key),
                ("file_type", "json"),
                ("sort_order", "desc"),
                ("limit", "1"),
            ])
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

        let parsed: ObservationsResponse =
            response
                .json()
                .await
                .map_err(|e| ProviderError::MalformedPayload {
                    provider: PROVIDER_ID.to_string(),
                    message: format!("observations parse failed: {}", e),
                })?;

        let first = parsed.observations.first().ok_or(ProviderError::NoData)?;
        let point = Self::normalize(first)?;

        self.points.insert(&key, point.clone());
        Ok(point)
    }

    fn clear_cache(&self) {
        self.points.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn observation_normalizes() {
        let json = r#"{"observations": [{"date": "2024-06-01", "value": "5.33", "realtime_start": "2024-07-01", "realtime_end": "2024-07-01"}]}"#;
        let parsed: ObservationsResponse = serde_json::from_str(json).unwrap();
        let point = FredProvider::normalize(&parsed.observations[0]).unwrap();

        assert_eq!(point.value, dec!(5.33));
        assert_eq!(point.period, "2024-06-01");
        assert_eq!(point.source, "FRED");
    }

    #[test]
    fn dot_value_is_no_data() {
        let obs = Observation {
            date: "2024-06-01".to_string(),
            value: ".".to_string(),
        };
        assert!(matches!(
            FredProvider::normalize(&obs),
            Err(ProviderError::NoData)
        ));
    }

    #[tokio::test]
    async fn non_us_country_is_refused_without_network() {
        let provider = FredProvider::new(&ProviderSettings::with_key(
            Some("key".to_string()),
            Duration::from_secs(3600),
        ));
        let err = provider
            .indicator("DE", IndicatorKind::InterestRate)
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::NoData));
    }

    #[test]
    fn us_aliases_recognized() {
        assert!(FredProvider::is_us("us"));
        assert!(FredProvider::is_us("USA"));
        assert!(FredProvider::is_us("United States"));
        assert!(!FredProvider::is_us("GB"));
    }
}
