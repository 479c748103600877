use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::debug;
use validator::Validate;

use super::bounded_limit;
use crate::{
    AppState,
    auth::ApiKey,
    error::{AppError, AppResult},
    models::{
        AbsurdOpinionCreate, GeneratedOpinionResponse, MovieCreate, MovieDetailResponse,
        MovieResponse, OpinionCreate, OpinionResponse, RandomMovieResponse, ReviewCreate,
        ReviewResponse, SearchQuery, non_blank,
    },
    sampling::{self, TEMPLATE_METHOD},
    store::MovieBundle,
};

const MAX_SEARCH_LIMIT: u64 = 50;
const MANUAL_METHOD: &str = "manual";

fn sample(bundle: &MovieBundle) -> (Option<String>, String) {
    let mut rng = rand::thread_rng();
    let real_review = sampling::pick_real_review(&bundle.reviews, &mut rng);
    let fake_opinion = sampling::pick_fake_opinion(&bundle.opinions, &mut rng);
    (real_review, fake_opinion)
}

pub async fn random(State(state): State<Arc<AppState>>) -> AppResult<Json<RandomMovieResponse>> {
    let Some(bundle) = state.store.random_movie().await? else {
        return Err(AppError::NotFound("No movies found in database".to_string()));
    };

    let (real_review, fake_opinion) = sample(&bundle);
    let MovieBundle { movie, genres, .. } = bundle;

    Ok(Json(RandomMovieResponse {
        id: movie.id,
        title: movie.title,
        original_title: movie.original_title,
        poster_url: movie.poster_url,
        backdrop_url: movie.backdrop_url,
        release_date: movie.release_date,
        runtime: movie.runtime,
        vote_average: movie.vote_average,
        genres: genres.into_iter().map(|g| g.name).collect(),
        real_review,
        fake_opinion,
    }))
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(q): Query<SearchQuery>,
) -> AppResult<Json<Vec<MovieResponse>>> {
    let query = q.q.trim();
    if query.is_empty() {
        return Err(AppError::Validation("q must not be empty".to_string()));
    }
    let limit = bounded_limit(q.limit, MAX_SEARCH_LIMIT)?;

    let movies = state.store.search_movies(query, limit).await?;
    if movies.is_empty() {
        return Err(AppError::NotFound(format!("No movies found matching '{query}'")));
    }

    Ok(Json(movies.into_iter().map(|(movie, genres)| MovieResponse::new(movie, genres)).collect()))
}

pub async fn detail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<Json<MovieDetailResponse>> {
    let bundle = state.store.movie_bundle(id).await?;
    let (real_review, fake_opinion) = sample(&bundle);

    debug!(movie_id = id, reviews = bundle.reviews.len(), opinions = bundle.opinions.len(), "movie detail");

    Ok(Json(MovieDetailResponse {
        movie: MovieResponse::new(bundle.movie, bundle.genres),
        real_review,
        fake_opinion,
    }))
}

pub async fn create(
    _: ApiKey,
    State(state): State<Arc<AppState>>,
    Json(req): Json<MovieCreate>,
) -> AppResult<(StatusCode, Json<MovieResponse>)> {
    req.validate()?;

    let (movie, genres) = state.store.create_movie(&req).await?;
    Ok((StatusCode::CREATED, Json(MovieResponse::new(movie, genres))))
}

pub async fn delete(
    _: ApiKey,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.store.delete_movie(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_opinion(
    _: ApiKey,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(req): Json<OpinionCreate>,
) -> AppResult<(StatusCode, Json<OpinionResponse>)> {
    req.validate()?;

    let (opinion, movie_title) = state.store.add_user_opinion(id, &req).await?;
    Ok((StatusCode::CREATED, Json(OpinionResponse::new(opinion, movie_title))))
}

pub async fn add_absurd_opinion(
    _: ApiKey,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(req): Json<AbsurdOpinionCreate>,
) -> AppResult<(StatusCode, Json<GeneratedOpinionResponse>)> {
    req.validate()?;

    let method = non_blank(req.generation_method).unwrap_or_else(|| MANUAL_METHOD.to_string());
    let (opinion, movie_title) = state
        .store
        .add_generated_opinion(id, &req.content, req.absurdity_score, Some(method))
        .await?;
    Ok((StatusCode::CREATED, Json(GeneratedOpinionResponse::new(opinion, movie_title))))
}

pub async fn generate_absurd_opinion(
    _: ApiKey,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<(StatusCode, Json<GeneratedOpinionResponse>)> {
    let generated = sampling::template_opinion(&mut rand::thread_rng());

    let (opinion, movie_title) = state
        .store
        .add_generated_opinion(
            id,
            generated.content,
            generated.absurdity_score,
            Some(TEMPLATE_METHOD.to_string()),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(GeneratedOpinionResponse::new(opinion, movie_title))))
}

pub async fn add_review(
    _: ApiKey,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(req): Json<ReviewCreate>,
) -> AppResult<(StatusCode, Json<ReviewResponse>)> {
    req.validate()?;

    let (review, movie_title) = state.store.add_user_review(id, &req).await?;
    Ok((StatusCode::CREATED, Json(ReviewResponse::new(review, movie_title))))
}
