//! Application state wiring and tracing setup.

use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use markethub_core::{
    alerts::{AlertsService, AlertsServiceTrait},
    events::{EventsService, EventsServiceTrait},
    markets::{MarketsService, MarketsServiceTrait},
    news::{NewsService, NewsServiceTrait},
    users::{UserService, UserServiceTrait},
    watchlists::{WatchlistService, WatchlistServiceTrait},
};
use markethub_market_data::{MarketAggregator, MarketDataConfig};
use markethub_storage_sqlite::{
    db, AlertRepository, EventRepository, MarketAssetRepository, NewsRepository, UserRepository,
    WatchlistRepository,
};

use crate::auth::AuthManager;
use crate::config::Config;

pub struct AppState {
    pub auth: Arc<AuthManager>,
    pub aggregator: Arc<MarketAggregator>,
    pub user_service: Arc<dyn UserServiceTrait>,
    pub markets_service: Arc<dyn MarketsServiceTrait>,
    pub news_service: Arc<dyn NewsServiceTrait>,
    pub events_service: Arc<dyn EventsServiceTrait>,
    pub alerts_service: Arc<dyn AlertsServiceTrait>,
    pub watchlist_service: Arc<dyn WatchlistServiceTrait>,
}

pub fn init_tracing() {
    let log_format = std::env::var("MH_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let pool = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", config.db_path);

    let aggregator = Arc::new(MarketAggregator::from_config(&MarketDataConfig::from_env())?);

    let user_repo = Arc::new(UserRepository::new(pool.clone()));
    let asset_repo = Arc::new(MarketAssetRepository::new(pool.clone()));
    let news_repo = Arc::new(NewsRepository::new(pool.clone()));
    let event_repo = Arc::new(EventRepository::new(pool.clone()));
    let alert_repo = Arc::new(AlertRepository::new(pool.clone()));
    let watchlist_repo = Arc::new(WatchlistRepository::new(pool.clone()));

    let state = AppState {
        auth: Arc::new(AuthManager::new(&config.jwt_secret, config.token_ttl)),
        aggregator: aggregator.clone(),
        user_service: Arc::new(UserService::new(user_repo)),
        markets_service: Arc::new(MarketsService::new(asset_repo, aggregator.clone())),
        news_service: Arc::new(NewsService::new(news_repo, aggregator.clone())),
        events_service: Arc::new(EventsService::new(event_repo)),
        alerts_service: Arc::new(AlertsService::new(alert_repo, aggregator.clone())),
        watchlist_service: Arc::new(WatchlistService::new(watchlist_repo, aggregator)),
    };

    Ok(Arc::new(state))
}
