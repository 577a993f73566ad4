use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use markethub_market_data::{AssetKind, MarketAggregator};
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::alerts::alerts_model::{NewUserAlert, TriggeredAlert, UserAlert};
use crate::alerts::alerts_traits::{AlertRepositoryTrait, AlertsServiceTrait};
use crate::errors::{Result, ValidationError};

pub struct AlertsService {
    alert_repository: Arc<dyn AlertRepositoryTrait>,
    aggregator: Arc<MarketAggregator>,
}

impl AlertsService {
    pub fn new(
        alert_repository: Arc<dyn AlertRepositoryTrait>,
        aggregator: Arc<MarketAggregator>,
    ) -> Self {
        Self {
            alert_repository,
            aggregator,
        }
    }
}

#[async_trait]
impl AlertsServiceTrait for AlertsService {
    fn list_alerts(&self, user_id: &str) -> Result<Vec<UserAlert>> {
        self.alert_repository.list_for_user(user_id)
    }

    async fn create_alert(&self, new_alert: NewUserAlert) -> Result<UserAlert> {
        if new_alert.symbol.trim().is_empty() {
            return Err(ValidationError::MissingField("symbol".to_string()).into());
        }
        if new_alert.price_target <= Decimal::ZERO {
            return Err(ValidationError::InvalidInput(format!(
                "price target must be positive, got {}",
                new_alert.price_target
            ))
            .into());
        }
        let new_alert = NewUserAlert {
            symbol: new_alert.symbol.trim().to_uppercase(),
            ..new_alert
        };
        self.alert_repository.create(new_alert).await
    }

    async fn set_alert_active(
        &self,
        alert_id: &str,
        user_id: &str,
        active: bool,
    ) -> Result<UserAlert> {
        self.alert_repository
            .set_active(alert_id, user_id, active)
            .await
    }

    async fn delete_alert(&self, alert_id: &str, user_id: &str) -> Result<usize> {
        self.alert_repository.delete(alert_id, user_id).await
    }

    async fn check_price_alerts(&self) -> Result<Vec<TriggeredAlert>> {
        let alerts = self.alert_repository.list_active()?;
        if alerts.is_empty() {
            return Ok(Vec::new());
        }
        debug!("checking {} active price alerts", alerts.len());

        // One quote lookup per distinct (kind, symbol), however many alerts
        // reference it.
        let mut prices: HashMap<(AssetKind, String), Option<Decimal>> = HashMap::new();
        for alert in &alerts {
            let key = (alert.kind, alert.symbol.clone());
            if !prices.contains_key(&key) {
                let price = self
                    .aggregator
                    .quote(alert.kind, &alert.symbol)
                    .await
                    .map(|q| q.price);
                prices.insert(key, price);
            }
        }

        let checked_at = Utc::now();
        let triggered: Vec<TriggeredAlert> = alerts
            .into_iter()
            .filter_map(|alert| {
                let price = (*prices.get(&(alert.kind, alert.symbol.clone()))?)?;
                alert
                    .direction
                    .crossed(price, alert.price_target)
                    .then(|| TriggeredAlert {
                        alert,
                        price,
                        checked_at,
                    })
            })
            .collect();

        if !triggered.is_empty() {
            info!("{} price alerts triggered", triggered.len());
        }
        Ok(triggered)
    }
}
