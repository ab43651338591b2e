//! User handlers — registration, lookup, listing, password change,
//! deletion.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use docshelf_core::error::AppError;
use docshelf_core::types::UserId;

use crate::dto::request::{ChangePasswordRequest, RegisterUserRequest};
use crate::dto::response::{MessageResponse, PaginatedResponse, UserResponse};
use crate::error::validate_dto;
use crate::extractors::{AuthUser, PaginationParams};
use crate::middleware::rbac::require_admin;
use crate::state::AppState;

/// POST /user
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    validate_dto(&req)?;

    let user = state
        .user_service
        .register(&req.user_name, &req.password)
        .await?;

    Ok(Json(UserResponse::from(&user)))
}

/// GET /user/{id}
pub async fn get_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<UserResponse>, AppError> {
    let user = state
        .user_service
        .get(auth.context(), UserId::from_uuid(id))
        .await?;

    Ok(Json(UserResponse::from(&user)))
}

/// GET /user?pageNumber=&pageSize=
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<PaginatedResponse<UserResponse>>, AppError> {
    require_admin(&auth)?;

    let page = state
        .user_service
        .list(auth.context(), params.into_page_request())
        .await?;

    Ok(Json(PaginatedResponse::from_page(page, |user| {
        UserResponse::from(&user)
    })))
}

/// PUT /user/{id}
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<Json<UserResponse>, AppError> {
    validate_dto(&req)?;

    let user = state
        .user_service
        .change_password(auth.context(), UserId::from_uuid(id), &req.password)
        .await?;

    Ok(Json(UserResponse::from(&user)))
}

/// DELETE /user/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    require_admin(&auth)?;

    state
        .user_service
        .delete(auth.context(), UserId::from_uuid(id))
        .await?;

    Ok(Json(MessageResponse {
        message: "User deleted".to_string(),
    }))
}
