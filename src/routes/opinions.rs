use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
};

use super::bounded_limit;
use crate::{
    AppState,
    error::AppResult,
    models::{LimitQuery, TopOpinion},
};

const MAX_TOP_LIMIT: u64 = 100;

pub async fn top(
    State(state): State<Arc<AppState>>,
    Query(q): Query<LimitQuery>,
) -> AppResult<Json<Vec<TopOpinion>>> {
    let limit = bounded_limit(q.limit, MAX_TOP_LIMIT)?;
    Ok(Json(state.store.top_opinions(limit).await?))
}
