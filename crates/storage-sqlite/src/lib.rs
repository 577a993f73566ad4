//! SQLite storage implementation for markethub.
//!
//! All database functionality lives here: connection pooling, embedded
//! Diesel migrations, and the repository implementations for the traits
//! defined in `markethub-core`. This is the only crate in the workspace
//! that depends on Diesel; everything above it works with traits.

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

pub mod alerts;
pub mod events;
pub mod markets;
pub mod news;
pub mod users;
pub mod watchlists;

pub use db::{create_pool, get_connection, init, run_migrations, DbConnection, DbPool};
pub use errors::StorageError;

pub use alerts::AlertRepository;
pub use events::EventRepository;
pub use markets::MarketAssetRepository;
pub use news::NewsRepository;
pub use users::UserRepository;
pub use watchlists::WatchlistRepository;
