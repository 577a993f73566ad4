//! Background jobs driving the persisted side of the system.
//!
//! Four independent interval loops: price refresh, news sync, alert
//! checks, and event pruning. A failing run is logged and the loop keeps
//! going; nothing here is fatal to the server.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::interval;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::main_lib::AppState;

/// Delay before the first run of each job, letting the server come up.
const INITIAL_DELAY_SECS: u64 = 30;

pub fn start_background_jobs(state: Arc<AppState>, config: &Config) {
    spawn_price_sync(state.clone(), config.price_sync_interval);
    spawn_news_sync(state.clone(), config.news_sync_interval);
    spawn_alert_check(state.clone(), config.alert_check_interval);
    spawn_event_prune(state, config.event_prune_interval, config.event_retention_days);
}

fn spawn_price_sync(state: Arc<AppState>, every: Duration) {
    tokio::spawn(async move {
        info!("price sync scheduler started ({:?} interval)", every);
        tokio::time::sleep(Duration::from_secs(INITIAL_DELAY_SECS)).await;
        let mut ticker = interval(every);
        loop {
            ticker.tick().await;
            match state.markets_service.update_prices().await {
                Ok(updated) => debug!("price sync refreshed {} assets", updated),
                Err(e) => warn!("price sync failed: {}", e),
            }
        }
    });
}

fn spawn_news_sync(state: Arc<AppState>, every: Duration) {
    tokio::spawn(async move {
        info!("news sync scheduler started ({:?} interval)", every);
        tokio::time::sleep(Duration::from_secs(INITIAL_DELAY_SECS)).await;
        let mut ticker = interval(every);
        loop {
            ticker.tick().await;
            match state.news_service.sync_news().await {
                Ok(inserted) => debug!("news sync persisted {} new articles", inserted),
                Err(e) => warn!("news sync failed: {}", e),
            }
        }
    });
}

fn spawn_alert_check(state: Arc<AppState>, every: Duration) {
    tokio::spawn(async move {
        info!("alert check scheduler started ({:?} interval)", every);
        tokio::time::sleep(Duration::from_secs(INITIAL_DELAY_SECS)).await;
        let mut ticker = interval(every);
        loop {
            ticker.tick().await;
            match state.alerts_service.check_price_alerts().await {
                Ok(triggered) => {
                    // Delivery is out of scope; triggered alerts are logged
                    // for downstream consumers.
                    for hit in &triggered {
                        info!(
                            "alert {} triggered: {} {} target {} at price {}",
                            hit.alert.id,
                            hit.alert.symbol,
                            hit.alert.direction.as_str(),
                            hit.alert.price_target,
                            hit.price
                        );
                    }
                }
                Err(e) => warn!("alert check failed: {}", e),
            }
        }
    });
}

fn spawn_event_prune(state: Arc<AppState>, every: Duration, retention_days: i64) {
    tokio::spawn(async move {
        info!("event prune scheduler started ({:?} interval)", every);
        tokio::time::sleep(Duration::from_secs(INITIAL_DELAY_SECS)).await;
        let mut ticker = interval(every);
        loop {
            ticker.tick().await;
            match state.events_service.prune_old(retention_days).await {
                Ok(removed) => debug!("event prune removed {} rows", removed),
                Err(e) => warn!("event prune failed: {}", e),
            }
        }
    });
}
