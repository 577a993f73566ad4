use async_trait::async_trait;
use markethub_market_data::AssetKind;

use crate::errors::Result;
use crate::watchlists::watchlists_model::{NewWatchlistEntry, WatchlistEntry, WatchlistQuote};

/// Trait for watchlist repository operations
#[async_trait]
pub trait WatchlistRepositoryTrait: Send + Sync {
    fn list_for_user(&self, user_id: &str) -> Result<Vec<WatchlistEntry>>;
    fn find_entry(
        &self,
        user_id: &str,
        symbol: &str,
        kind: AssetKind,
    ) -> Result<WatchlistEntry>;
    /// Insert unless the (user, symbol, kind) row already exists.
    /// Returns the stored entry either way.
    async fn insert_ignore(&self, entry: NewWatchlistEntry) -> Result<WatchlistEntry>;
    async fn delete(&self, user_id: &str, symbol: &str, kind: AssetKind) -> Result<usize>;
}

/// Trait for watchlist service operations
#[async_trait]
pub trait WatchlistServiceTrait: Send + Sync {
    fn list(&self, user_id: &str) -> Result<Vec<WatchlistEntry>>;
    /// List joined with live quotes; unresolvable symbols carry `None`.
    async fn list_with_quotes(&self, user_id: &str) -> Result<Vec<WatchlistQuote>>;
    /// Idempotent: adding a symbol twice returns the existing entry.
    async fn add(&self, entry: NewWatchlistEntry) -> Result<WatchlistEntry>;
    async fn remove(&self, user_id: &str, symbol: &str, kind: AssetKind) -> Result<usize>;
}
