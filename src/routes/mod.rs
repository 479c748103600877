pub mod movies;
pub mod opinions;
pub mod votes;

use std::sync::Arc;

use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::{
    AppState,
    error::{AppError, AppResult},
};

pub const DEFAULT_LIMIT: u64 = 10;

/// Applies the default and rejects limits outside `1..=max`.
pub(crate) fn bounded_limit(limit: Option<u64>, max: u64) -> AppResult<u64> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT);
    if !(1..=max).contains(&limit) {
        return Err(AppError::Validation(format!("limit must be between 1 and {max}")));
    }
    Ok(limit)
}

pub async fn index() -> Json<Value> {
    Json(json!({
        "message": "Welcome to the Unreliable Unicorn API",
        "tagline": "The Critic You Shouldn't Trust",
        "endpoints": {
            "random_movie": "/movie/random",
            "search_movies": "/movie/search?q=interstellar",
            "movie_detail": "/movie/{id}",
            "add_opinion": "/movie/{id}/opinion",
            "add_absurd_opinion": "/movie/{id}/absurd-opinion",
            "add_review": "/movie/{id}/review",
            "top_opinions": "/opinions/top",
            "vote_on_opinion": "/vote/opinion/{id}",
            "vote_on_user_opinion": "/vote/user-opinion/{id}",
            "health_check": "/health/db",
        }
    }))
}

pub async fn health_db(State(state): State<Arc<AppState>>) -> AppResult<Json<Value>> {
    state.store.ping().await?;
    Ok(Json(json!({ "db": "ok" })))
}
