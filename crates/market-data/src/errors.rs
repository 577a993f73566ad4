//! Error types for provider clients.
//!
//! Providers surface these errors to the aggregator only; the aggregator
//! downgrades them to "no data" so absence of market data is never an
//! exceptional condition for callers above it.

use thiserror::Error;

/// Errors a provider client can produce while talking to its upstream API.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The upstream request timed out.
    #[error("Timeout: {provider}")]
    Timeout { provider: String },

    /// The provider rate limited the request (HTTP 429 or quota exhausted).
    #[error("Rate limited: {provider}")]
    RateLimited { provider: String },

    /// Upstream returned a non-2xx status or an application-level error.
    #[error("Provider error: {provider} - {message}")]
    Upstream { provider: String, message: String },

    /// Upstream returned 2xx but the payload did not match the expected shape.
    #[error("Malformed payload from {provider}: {message}")]
    MalformedPayload { provider: String, message: String },

    /// The requested symbol is unknown to the provider.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// The client was constructed without the API key its upstream requires.
    #[error("Missing API key for {provider}")]
    MissingApiKey { provider: String },

    /// The call succeeded but returned an empty result set.
    #[error("No data returned")]
    NoData,

    /// Transport-level failure before any HTTP status was received.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl ProviderError {
    /// Classify a reqwest failure into timeout vs generic upstream error.
    pub fn from_request(provider: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout {
                provider: provider.to_string(),
            }
        } else {
            ProviderError::Network(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_provider() {
        let err = ProviderError::Upstream {
            provider: "FINNHUB".to_string(),
            message: "HTTP 500".to_string(),
        };
        assert_eq!(format!("{}", err), "Provider error: FINNHUB - HTTP 500");

        let err = ProviderError::RateLimited {
            provider: "GNEWS".to_string(),
        };
        assert_eq!(format!("{}", err), "Rate limited: GNEWS");
    }
}
