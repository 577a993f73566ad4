//! Alerts module - user price alerts and the scheduled crossing check.

mod alerts_model;
mod alerts_service;
mod alerts_traits;

pub use alerts_model::{AlertDirection, NewUserAlert, TriggeredAlert, UserAlert};
pub use alerts_service::AlertsService;
pub use alerts_traits::{AlertRepositoryTrait, AlertsServiceTrait};
