use std::{net::SocketAddr, sync::Arc};

use axum::{
    Json,
    extract::{ConnectInfo, Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::{
    AppState,
    auth::ApiKey,
    entities::opinion_vote::VoteTarget,
    error::{AppError, AppResult},
    models::{VoteCreate, VoteResponse, non_blank},
};

pub async fn vote_generated(
    _: ApiKey,
    State(state): State<Arc<AppState>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    Path(id): Path<i32>,
    Json(req): Json<VoteCreate>,
) -> AppResult<(StatusCode, Json<VoteResponse>)> {
    record_vote(&state, VoteTarget::Generated(id), peer, req).await
}

pub async fn vote_user(
    _: ApiKey,
    State(state): State<Arc<AppState>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    Path(id): Path<i32>,
    Json(req): Json<VoteCreate>,
) -> AppResult<(StatusCode, Json<VoteResponse>)> {
    record_vote(&state, VoteTarget::User(id), peer, req).await
}

/// Falls back to the peer address when the body carries no voter identifier.
async fn record_vote(
    state: &AppState,
    target: VoteTarget,
    peer: SocketAddr,
    req: VoteCreate,
) -> AppResult<(StatusCode, Json<VoteResponse>)> {
    req.validate()?;

    let voter = non_blank(req.voter_identifier).unwrap_or_else(|| peer.ip().to_string());
    let vote = state.store.cast_vote(target, req.vote_type, Some(voter)).await?;

    // A stored row that fails this was written around the check constraint.
    let target = vote.target().map_err(|e| AppError::Internal(e.to_string()))?;

    Ok((
        StatusCode::CREATED,
        Json(VoteResponse::new(vote.id, target, vote.vote_type, vote.voter_identifier)),
    ))
}
