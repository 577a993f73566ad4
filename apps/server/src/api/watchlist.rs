use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use markethub_core::watchlists::{NewWatchlistEntry, WatchlistEntry, WatchlistQuote};
use markethub_market_data::AssetKind;

use crate::auth::AuthUser;
use crate::error::{ok, ApiError, ApiResult, Envelope};
use crate::main_lib::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddEntryRequest {
    symbol: String,
    kind: AssetKind,
}

async fn list_watchlist(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
) -> ApiResult<Json<Envelope<Vec<WatchlistEntry>>>> {
    let entries = state.watchlist_service.list(&caller.user_id)?;
    Ok(ok(entries))
}

async fn list_with_quotes(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
) -> ApiResult<Json<Envelope<Vec<WatchlistQuote>>>> {
    let joined = state
        .watchlist_service
        .list_with_quotes(&caller.user_id)
        .await?;
    Ok(ok(joined))
}

async fn add_entry(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
    Json(req): Json<AddEntryRequest>,
) -> ApiResult<Json<Envelope<WatchlistEntry>>> {
    let entry = state
        .watchlist_service
        .add(NewWatchlistEntry {
            user_id: caller.user_id,
            symbol: req.symbol,
            kind: req.kind,
        })
        .await?;
    Ok(ok(entry))
}

async fn remove_entry(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
    Path((kind, symbol)): Path<(String, String)>,
) -> ApiResult<StatusCode> {
    let kind = match kind.to_lowercase().as_str() {
        "stock" => AssetKind::Stock,
        "crypto" => AssetKind::Crypto,
        "forex" => AssetKind::Forex,
        other => return Err(ApiError::BadRequest(format!("unknown asset kind: {}", other))),
    };

    let removed = state
        .watchlist_service
        .remove(&caller.user_id, &symbol, kind)
        .await?;
    if removed == 0 {
        return Err(ApiError::NotFound(format!("{} not on watchlist", symbol)));
    }
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/watchlist", get(list_watchlist).post(add_entry))
        .route("/api/watchlist/quotes", get(list_with_quotes))
        .route(
            "/api/watchlist/{kind}/{symbol}",
            axum::routing::delete(remove_entry),
        )
}
