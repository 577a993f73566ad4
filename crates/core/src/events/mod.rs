//! Economic events module - calendar entries and age-based pruning.

mod events_model;
mod events_service;
mod events_traits;

pub use events_model::{EconomicEvent, EventImpact, NewEconomicEvent};
pub use events_service::EventsService;
pub use events_traits::{EventRepositoryTrait, EventsServiceTrait};
