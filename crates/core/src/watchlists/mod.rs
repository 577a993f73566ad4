//! Watchlists module - per-user symbol lists joined with live quotes.

mod watchlists_model;
mod watchlists_service;
mod watchlists_traits;

pub use watchlists_model::{NewWatchlistEntry, WatchlistEntry, WatchlistQuote};
pub use watchlists_service::WatchlistService;
pub use watchlists_traits::{WatchlistRepositoryTrait, WatchlistServiceTrait};
