//! Server configuration from environment variables.

use std::time::Duration;

/// Typed view over the environment. Provider API keys are read separately
/// by `MarketDataConfig::from_env`.
#[derive(Clone, Debug)]
pub struct Config {
    pub listen_addr: String,
    pub db_path: String,
    pub jwt_secret: String,
    /// Bearer token lifetime.
    pub token_ttl: Duration,
    pub price_sync_interval: Duration,
    pub news_sync_interval: Duration,
    pub alert_check_interval: Duration,
    pub event_prune_interval: Duration,
    pub event_retention_days: i64,
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_secs(name: &str, default: u64) -> Duration {
    let secs = std::env::var(name)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default);
    Duration::from_secs(secs)
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            listen_addr: env_or("MH_LISTEN_ADDR", "0.0.0.0:8080"),
            db_path: env_or("MH_DB_PATH", "markethub.db"),
            jwt_secret: env_or("MH_JWT_SECRET", "change-me-in-production"),
            token_ttl: env_secs("MH_TOKEN_TTL_SECS", 24 * 60 * 60),
            price_sync_interval: env_secs("MH_PRICE_SYNC_INTERVAL_SECS", 5 * 60),
            news_sync_interval: env_secs("MH_NEWS_SYNC_INTERVAL_SECS", 15 * 60),
            alert_check_interval: env_secs("MH_ALERT_CHECK_INTERVAL_SECS", 5 * 60),
            event_prune_interval: env_secs("MH_EVENT_PRUNE_INTERVAL_SECS", 24 * 60 * 60),
            event_retention_days: std::env::var("MH_EVENT_RETENTION_DAYS")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(30),
        }
    }
}
