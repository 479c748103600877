pub mod auth;
pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod models;
pub mod routes;
pub mod sampling;
pub mod store;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::{config::Config, store::Store};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Store,
}

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/health/db", get(routes::health_db))
        .route("/movie/random", get(routes::movies::random))
        .route("/movie/search", get(routes::movies::search))
        .route("/movie", post(routes::movies::create))
        .route("/movie/", post(routes::movies::create))
        .route("/movie/{id}", get(routes::movies::detail).delete(routes::movies::delete))
        .route("/movie/{id}/opinion", post(routes::movies::add_opinion))
        .route("/movie/{id}/absurd-opinion", post(routes::movies::add_absurd_opinion))
        .route(
            "/movie/{id}/absurd-opinion/generate",
            post(routes::movies::generate_absurd_opinion),
        )
        .route("/movie/{id}/review", post(routes::movies::add_review))
        .route("/opinions/top", get(routes::opinions::top))
        .route("/vote/opinion/{id}", post(routes::votes::vote_generated))
        .route("/vote/user-opinion/{id}", post(routes::votes::vote_user))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
