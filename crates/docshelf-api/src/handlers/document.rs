//! Document handlers — CRUD plus the tag and metadata sub-resources.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use docshelf_core::error::AppError;
use docshelf_core::types::DocumentId;
use docshelf_entity::document::MetadataValue;
use docshelf_service::document::{CreateDocumentInput, UpdateDocumentInput};

use crate::dto::request::{
    CreateDocumentRequest, DocumentListQuery, TagRequest, UpdateDocumentRequest, into_tags,
    parse_metadata,
};
use crate::dto::response::{DocumentResponse, MessageResponse, PaginatedResponse};
use crate::error::validate_dto;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// POST /document
pub async fn create_document(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateDocumentRequest>,
) -> Result<Json<DocumentResponse>, AppError> {
    validate_dto(&req)?;

    let input = CreateDocumentInput {
        file_name: req.file_name,
        file_extension: req.file_extension,
        content_type: req.content_type,
        content: req.content,
        tags: into_tags(req.tags)?,
        metadata: parse_metadata(req.metadata.as_ref())?,
    };

    let document = state
        .document_service
        .create(auth.context(), input)
        .await?;

    Ok(Json(DocumentResponse::from(&document)))
}

/// GET /document/{id}
pub async fn get_document(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<DocumentResponse>, AppError> {
    let document = state
        .document_service
        .get(auth.context(), DocumentId::from_uuid(id))
        .await?;

    Ok(Json(DocumentResponse::from(&document)))
}

/// GET /document?pageNumber=&pageSize=&tagKey=&tagName=&metadata=
pub async fn list_documents(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(pagination): Query<PaginationParams>,
    Query(query): Query<DocumentListQuery>,
) -> Result<Json<PaginatedResponse<DocumentResponse>>, AppError> {
    let filter = query.into_filter()?;

    let page = state
        .document_service
        .list(auth.context(), filter, pagination.into_page_request())
        .await?;

    Ok(Json(PaginatedResponse::from_page(page, |document| {
        DocumentResponse::from(&document)
    })))
}

/// PUT /document/{id}
pub async fn update_document(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateDocumentRequest>,
) -> Result<Json<DocumentResponse>, AppError> {
    validate_dto(&req)?;

    let input = UpdateDocumentInput {
        file_name: req.file_name,
        file_extension: req.file_extension,
        content_type: req.content_type,
        content: req.content,
        tags: into_tags(req.tags)?,
    };

    let document = state
        .document_service
        .update(auth.context(), DocumentId::from_uuid(id), input)
        .await?;

    Ok(Json(DocumentResponse::from(&document)))
}

/// DELETE /document/{id}
pub async fn delete_document(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    state
        .document_service
        .delete(auth.context(), DocumentId::from_uuid(id))
        .await?;

    Ok(Json(MessageResponse {
        message: "Document deleted".to_string(),
    }))
}

/// POST /document/{id}/tag
pub async fn add_tag(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<TagRequest>,
) -> Result<Json<DocumentResponse>, AppError> {
    validate_dto(&req)?;

    let document = state
        .document_service
        .add_tag(auth.context(), DocumentId::from_uuid(id), req.into_tag()?)
        .await?;

    Ok(Json(DocumentResponse::from(&document)))
}

/// PUT /document/{id}/tag
pub async fn update_tag(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<TagRequest>,
) -> Result<Json<DocumentResponse>, AppError> {
    validate_dto(&req)?;

    let document = state
        .document_service
        .update_tag(auth.context(), DocumentId::from_uuid(id), req.into_tag()?)
        .await?;

    Ok(Json(DocumentResponse::from(&document)))
}

/// DELETE /document/{id}/tag/{key}
pub async fn remove_tag(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((id, key)): Path<(Uuid, String)>,
) -> Result<Json<DocumentResponse>, AppError> {
    let document = state
        .document_service
        .remove_tag(auth.context(), DocumentId::from_uuid(id), &key)
        .await?;

    Ok(Json(DocumentResponse::from(&document)))
}

/// PUT /document/{id}/meta
///
/// The body is the raw metadata tree; it is validated into the closed
/// shape before it reaches the aggregate.
pub async fn update_meta(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(raw): Json<serde_json::Value>,
) -> Result<Json<DocumentResponse>, AppError> {
    let metadata = MetadataValue::from_json(&raw)?;

    let document = state
        .document_service
        .update_meta(auth.context(), DocumentId::from_uuid(id), metadata)
        .await?;

    Ok(Json(DocumentResponse::from(&document)))
}

/// DELETE /document/{id}/meta
pub async fn delete_meta(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<DocumentResponse>, AppError> {
    let document = state
        .document_service
        .delete_meta(auth.context(), DocumentId::from_uuid(id))
        .await?;

    Ok(Json(DocumentResponse::from(&document)))
}
