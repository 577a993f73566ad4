//! HTTP routers, one module per resource.

pub mod alerts;
pub mod auth;
pub mod events;
pub mod health;
pub mod markets;
pub mod news;
pub mod watchlist;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::main_lib::AppState;

pub fn app_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(markets::router())
        .merge(news::router())
        .merge(events::router())
        .merge(alerts::router())
        .merge(watchlist::router())
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
