use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use markethub_core::markets::{MarketAsset, NewMarketAsset};
use markethub_market_data::{AssetKind, EconomicIndicators, Quote, TopMovers};

use crate::auth::AuthUser;
use crate::error::{ok, ApiError, ApiResult, Envelope};
use crate::main_lib::AppState;
use crate::models::{PageQuery, Paginated};

fn parse_kind(raw: &str) -> Result<AssetKind, ApiError> {
    match raw.to_lowercase().as_str() {
        "stock" => Ok(AssetKind::Stock),
        "crypto" => Ok(AssetKind::Crypto),
        "forex" => Ok(AssetKind::Forex),
        other => Err(ApiError::BadRequest(format!(
            "unknown asset kind: {}",
            other
        ))),
    }
}

/// `data` is `null` when every provider in the chain failed.
async fn get_quote(
    State(state): State<Arc<AppState>>,
    Path((kind, symbol)): Path<(String, String)>,
) -> ApiResult<Json<Envelope<Option<Quote>>>> {
    let kind = parse_kind(&kind)?;
    let quote = state.markets_service.get_quote(kind, &symbol).await;
    Ok(ok(quote))
}

async fn get_movers(State(state): State<Arc<AppState>>) -> Json<Envelope<TopMovers>> {
    ok(state.markets_service.top_movers().await)
}

async fn get_indicators(
    State(state): State<Arc<AppState>>,
    Path(country): Path<String>,
) -> Json<Envelope<EconomicIndicators>> {
    ok(state.markets_service.economic_indicators(&country).await)
}

#[derive(Deserialize)]
struct AssetsQuery {
    search: Option<String>,
}

async fn list_assets(
    State(state): State<Arc<AppState>>,
    Query(page): Query<PageQuery>,
    Query(query): Query<AssetsQuery>,
) -> ApiResult<Json<Envelope<Paginated<MarketAsset>>>> {
    let request = page.request();
    let result = match query.search.as_deref().filter(|q| !q.trim().is_empty()) {
        Some(term) => state.markets_service.search_assets(term, request)?,
        None => state.markets_service.list_assets(request)?,
    };
    Ok(ok(Paginated::from_page(result, &request)))
}

async fn track_asset(
    State(state): State<Arc<AppState>>,
    _caller: AuthUser,
    Json(req): Json<NewMarketAsset>,
) -> ApiResult<Json<Envelope<MarketAsset>>> {
    let asset = state.markets_service.track_asset(req).await?;
    Ok(ok(asset))
}

async fn untrack_asset(
    State(state): State<Arc<AppState>>,
    _caller: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let removed = state.markets_service.untrack_asset(&id).await?;
    if removed == 0 {
        return Err(ApiError::NotFound(format!("asset {}", id)));
    }
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/markets/quote/{kind}/{symbol}", get(get_quote))
        .route("/api/markets/movers", get(get_movers))
        .route("/api/markets/indicators/{country}", get(get_indicators))
        .route("/api/markets/assets", get(list_assets).post(track_asset))
        .route(
            "/api/markets/assets/{id}",
            axum::routing::delete(untrack_asset),
        )
}
