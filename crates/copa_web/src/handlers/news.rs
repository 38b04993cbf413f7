use axum::extract::{Query, State};
use axum::Json;
use copa_core::NewsPage;
use copa_news::{NewsQuery, RawNewsQuery};
use std::sync::Arc;

use crate::error::ApiError;
use crate::state::AppState;

pub async fn get_news(
    State(state): State<Arc<AppState>>,
    Query(raw): Query<RawNewsQuery>,
) -> Result<Json<NewsPage>, ApiError> {
    let query = NewsQuery::from_raw(raw)?;
    let page = state.news.fetch_page(&query).await?;
    Ok(Json(page))
}
