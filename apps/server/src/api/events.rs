use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use markethub_core::events::{EconomicEvent, NewEconomicEvent};

use crate::auth::AuthUser;
use crate::error::{ok, ApiError, ApiResult, Envelope};
use crate::main_lib::AppState;
use crate::models::{PageQuery, Paginated};

const DEFAULT_UPCOMING_DAYS: i64 = 7;

#[derive(Deserialize)]
struct UpcomingQuery {
    days: Option<i64>,
}

async fn upcoming_events(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UpcomingQuery>,
) -> ApiResult<Json<Envelope<Vec<EconomicEvent>>>> {
    let days = query.days.unwrap_or(DEFAULT_UPCOMING_DAYS).clamp(0, 90);
    let events = state.events_service.upcoming(days)?;
    Ok(ok(events))
}

async fn list_events(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<Envelope<Paginated<EconomicEvent>>>> {
    let request = query.request();
    let page = state.events_service.list_events(request)?;
    Ok(ok(Paginated::from_page(page, &request)))
}

async fn create_event(
    State(state): State<Arc<AppState>>,
    _caller: AuthUser,
    Json(req): Json<NewEconomicEvent>,
) -> ApiResult<Json<Envelope<EconomicEvent>>> {
    let event = state.events_service.create_event(req).await?;
    Ok(ok(event))
}

async fn update_event(
    State(state): State<Arc<AppState>>,
    _caller: AuthUser,
    Json(event): Json<EconomicEvent>,
) -> ApiResult<Json<Envelope<EconomicEvent>>> {
    let event = state.events_service.update_event(event).await?;
    Ok(ok(event))
}

async fn delete_event(
    State(state): State<Arc<AppState>>,
    _caller: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let removed = state.events_service.delete_event(&id).await?;
    if removed == 0 {
        return Err(ApiError::NotFound(format!("event {}", id)));
    }
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/events/upcoming", get(upcoming_events))
        .route(
            "/api/events",
            get(list_events).post(create_event).put(update_event),
        )
        .route("/api/events/{id}", axum::routing::delete(delete_event))
}
