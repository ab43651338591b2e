//! JWT handlers — login and refresh.

use axum::Json;
use axum::extract::State;
use axum::http::request::Parts;

use docshelf_core::error::AppError;

use crate::dto::request::LoginRequest;
use crate::dto::response::{AccessTokenResponse, TokenPairResponse};
use crate::error::validate_dto;
use crate::extractors::auth::bearer_token;
use crate::state::AppState;

/// POST /jwt
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<TokenPairResponse>, AppError> {
    validate_dto(&req)?;

    let pair = state
        .auth_service
        .login(&req.user_name, &req.password)
        .await?;

    Ok(Json(TokenPairResponse::from(pair)))
}

/// POST /jwt/refreshtoken
///
/// The refresh token arrives in the `Authorization: Bearer` header; the
/// response carries a fresh access token only.
pub async fn refresh(
    State(state): State<AppState>,
    parts: Parts,
) -> Result<Json<AccessTokenResponse>, AppError> {
    let token = bearer_token(&parts)?;

    let (access_token, access_expires_at) = state.auth_service.refresh(token).await?;

    Ok(Json(AccessTokenResponse {
        access_token,
        access_expires_at,
    }))
}
