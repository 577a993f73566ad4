//! SQLite storage implementation for economic events.

mod model;
mod repository;

pub use model::{EconomicEventDB, NewEconomicEventDB};
pub use repository::EventRepository;
