use std::sync::Arc;

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::{AppState, error::AppError};

pub const API_KEY_HEADER: &str = "x-api-key";

/// Guard for write endpoints: the `X-API-Key` header must match the
/// configured key.
pub struct ApiKey;

impl FromRequestParts<Arc<AppState>> for ApiKey {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let Some(provided) = parts.headers.get(API_KEY_HEADER) else {
            return Err(AppError::Unauthorized);
        };

        if provided.as_bytes() != state.config.api_key.as_bytes() {
            tracing::warn!(path = %parts.uri.path(), "rejected request with invalid API key");
            return Err(AppError::Forbidden);
        }

        Ok(ApiKey)
    }
}
