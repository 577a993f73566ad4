use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, patch};
use axum::{Json, Router};
use rust_decimal::Decimal;
use serde::Deserialize;

use markethub_core::alerts::{AlertDirection, NewUserAlert, UserAlert};
use markethub_market_data::AssetKind;

use crate::auth::AuthUser;
use crate::error::{ok, ApiError, ApiResult, Envelope};
use crate::main_lib::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateAlertRequest {
    symbol: String,
    kind: AssetKind,
    price_target: Decimal,
    direction: AlertDirection,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SetActiveRequest {
    active: bool,
}

async fn list_alerts(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
) -> ApiResult<Json<Envelope<Vec<UserAlert>>>> {
    let alerts = state.alerts_service.list_alerts(&caller.user_id)?;
    Ok(ok(alerts))
}

async fn create_alert(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
    Json(req): Json<CreateAlertRequest>,
) -> ApiResult<Json<Envelope<UserAlert>>> {
    let alert = state
        .alerts_service
        .create_alert(NewUserAlert {
            user_id: caller.user_id,
            symbol: req.symbol,
            kind: req.kind,
            price_target: req.price_target,
            direction: req.direction,
        })
        .await?;
    Ok(ok(alert))
}

async fn set_alert_active(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
    Path(id): Path<String>,
    Json(req): Json<SetActiveRequest>,
) -> ApiResult<Json<Envelope<UserAlert>>> {
    let alert = state
        .alerts_service
        .set_alert_active(&id, &caller.user_id, req.active)
        .await?;
    Ok(ok(alert))
}

async fn delete_alert(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let removed = state.alerts_service.delete_alert(&id, &caller.user_id).await?;
    if removed == 0 {
        return Err(ApiError::NotFound(format!("alert {}", id)));
    }
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/alerts", get(list_alerts).post(create_alert))
        .route("/api/alerts/{id}/active", patch(set_alert_active))
        .route("/api/alerts/{id}", axum::routing::delete(delete_alert))
}
