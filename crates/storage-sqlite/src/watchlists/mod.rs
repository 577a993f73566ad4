//! SQLite storage implementation for watchlists.

mod model;
mod repository;

pub use model::{NewWatchlistEntryDB, WatchlistEntryDB};
pub use repository::WatchlistRepository;
