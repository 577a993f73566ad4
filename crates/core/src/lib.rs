//! Markethub Core - Domain entities, services, and traits.
//!
//! This crate contains the business logic sitting between the HTTP layer
//! and the two edges of the system: market data (via
//! `markethub-market-data`) and persistence. It is database-agnostic and
//! defines repository traits that are implemented by the `storage-sqlite`
//! crate.

pub mod alerts;
pub mod errors;
pub mod events;
pub mod markets;
pub mod news;
pub mod pagination;
pub mod users;
pub mod watchlists;

pub use errors::Error;
pub use errors::Result;
pub use pagination::{Page, PageRequest};
