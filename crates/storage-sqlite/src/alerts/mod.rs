//! SQLite storage implementation for price alerts.

mod model;
mod repository;

pub use model::{NewUserAlertDB, UserAlertDB};
pub use repository::AlertRepository;
