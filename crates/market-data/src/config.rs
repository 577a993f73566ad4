//! Provider configuration.
//!
//! TTLs and the fallback priority order are deliberate configuration, not
//! tuned values: each TTL roughly tracks the upstream rate limit, and the
//! chain order puts the faster, keyless sources first.

use std::time::Duration;

/// Settings for one provider client.
#[derive(Clone, Debug)]
pub struct ProviderSettings {
    /// API key/token, where the upstream requires one.
    pub api_key: Option<String>,

    /// How long a fetched value stays servable from cache.
    pub cache_ttl: Duration,
}

impl ProviderSettings {
    pub fn keyless(cache_ttl: Duration) -> Self {
        Self {
            api_key: None,
            cache_ttl,
        }
    }

    pub fn with_key(api_key: Option<String>, cache_ttl: Duration) -> Self {
        Self { api_key, cache_ttl }
    }
}

/// Configuration for every provider client owned by the aggregator.
#[derive(Clone, Debug)]
pub struct MarketDataConfig {
    pub binance: ProviderSettings,
    pub yahoo: ProviderSettings,
    pub finnhub: ProviderSettings,
    pub twelve_data: ProviderSettings,
    pub polygon: ProviderSettings,
    pub cryptopanic: ProviderSettings,
    pub gnews: ProviderSettings,
    pub currents: ProviderSettings,
    pub world_bank: ProviderSettings,
    pub fred: ProviderSettings,
}

impl Default for MarketDataConfig {
    fn default() -> Self {
        Self {
            binance: ProviderSettings::keyless(Duration::from_secs(60)),
            yahoo: ProviderSettings::keyless(Duration::from_secs(5 * 60)),
            finnhub: ProviderSettings::with_key(None, Duration::from_secs(5 * 60)),
            twelve_data: ProviderSettings::with_key(None, Duration::from_secs(5 * 60)),
            polygon: ProviderSettings::with_key(None, Duration::from_secs(5 * 60)),
            cryptopanic: ProviderSettings::with_key(None, Duration::from_secs(10 * 60)),
            gnews: ProviderSettings::with_key(None, Duration::from_secs(15 * 60)),
            currents: ProviderSettings::with_key(None, Duration::from_secs(15 * 60)),
            world_bank: ProviderSettings::keyless(Duration::from_secs(24 * 60 * 60)),
            fred: ProviderSettings::with_key(None, Duration::from_secs(12 * 60 * 60)),
        }
    }
}

impl MarketDataConfig {
    /// Read API keys and TTL overrides from the environment.
    ///
    /// Keys: `FINNHUB_API_KEY`, `TWELVE_DATA_API_KEY`, `POLYGON_API_KEY`,
    /// `CRYPTOPANIC_API_KEY`, `GNEWS_API_KEY`, `CURRENTS_API_KEY`,
    /// `FRED_API_KEY`. Each provider's cache TTL can be overridden with
    /// `MH_<PROVIDER>_TTL_SECS` (e.g. `MH_BINANCE_TTL_SECS`); unset or
    /// unparsable values keep the default.
    pub fn from_env() -> Self {
        let key = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());
        let ttl = |name: &str, default: Duration| {
            std::env::var(name)
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .map(Duration::from_secs)
                .unwrap_or(default)
        };

        let mut config = Self::default();
        config.finnhub.api_key = key("FINNHUB_API_KEY");
        config.twelve_data.api_key = key("TWELVE_DATA_API_KEY");
        config.polygon.api_key = key("POLYGON_API_KEY");
        config.cryptopanic.api_key = key("CRYPTOPANIC_API_KEY");
        config.gnews.api_key = key("GNEWS_API_KEY");
        config.currents.api_key = key("CURRENTS_API_KEY");
        config.fred.api_key = key("FRED_API_KEY");

        config.binance.cache_ttl = ttl("MH_BINANCE_TTL_SECS", config.binance.cache_ttl);
        config.yahoo.cache_ttl = ttl("MH_YAHOO_TTL_SECS", config.yahoo.cache_ttl);
        config.finnhub.cache_ttl = ttl("MH_FINNHUB_TTL_SECS", config.finnhub.cache_ttl);
        config.twelve_data.cache_ttl = ttl("MH_TWELVE_DATA_TTL_SECS", config.twelve_data.cache_ttl);
        config.polygon.cache_ttl = ttl("MH_POLYGON_TTL_SECS", config.polygon.cache_ttl);
        config.cryptopanic.cache_ttl = ttl("MH_CRYPTOPANIC_TTL_SECS", config.cryptopanic.cache_ttl);
        config.gnews.cache_ttl = ttl("MH_GNEWS_TTL_SECS", config.gnews.cache_ttl);
        config.currents.cache_ttl = ttl("MH_CURRENTS_TTL_SECS", config.currents.cache_ttl);
        config.world_bank.cache_ttl = ttl("MH_WORLD_BANK_TTL_SECS", config.world_bank.cache_ttl);
        config.fred.cache_ttl = ttl("MH_FRED_TTL_SECS", config.fred.cache_ttl);
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ttl_overrides_come_from_env() {
        std::env::set_var("MH_BINANCE_TTL_SECS", "7");
        std::env::set_var("MH_WORLD_BANK_TTL_SECS", "not-a-number");

        let config = MarketDataConfig::from_env();
        assert_eq!(config.binance.cache_ttl, Duration::from_secs(7));
        // Unparsable override keeps the default.
        assert_eq!(
            config.world_bank.cache_ttl,
            MarketDataConfig::default().world_bank.cache_ttl
        );
        // Untouched provider keeps the default too.
        assert_eq!(
            config.yahoo.cache_ttl,
            MarketDataConfig::default().yahoo.cache_ttl
        );

        std::env::remove_var("MH_BINANCE_TTL_SECS");
        std::env::remove_var("MH_WORLD_BANK_TTL_SECS");
    }
}
