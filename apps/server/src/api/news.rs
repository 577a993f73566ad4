use std::sync::Arc;

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use markethub_core::news::NewsArticle;
use markethub_market_data::NewsItem;

use crate::error::{ok, ApiResult, Envelope};
use crate::main_lib::AppState;
use crate::models::{PageQuery, Paginated};

const DEFAULT_LIVE_LIMIT: usize = 20;
const MAX_LIVE_LIMIT: usize = 100;

#[derive(Deserialize)]
struct LiveQuery {
    limit: Option<usize>,
}

/// Aggregated feed straight from the providers; nothing is persisted.
async fn live_news(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LiveQuery>,
) -> Json<Envelope<Vec<NewsItem>>> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_LIVE_LIMIT)
        .clamp(1, MAX_LIVE_LIMIT);
    ok(state.news_service.live_news(limit).await)
}

async fn list_articles(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<Envelope<Paginated<NewsArticle>>>> {
    let request = query.request();
    let page = state.news_service.list_articles(request)?;
    Ok(ok(Paginated::from_page(page, &request)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/news/live", get(live_news))
        .route("/api/news", get(list_articles))
}
