//! Document CRUD, tag sub-resource, and metadata operations.
//!
//! Every operation loads its own aggregate instance, mutates it, and
//! persists the result. Aggregates are never shared across requests, so
//! the effective concurrency control is last-writer-wins at the
//! persistence layer.

use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use tracing::{info, warn};

use docshelf_core::error::AppError;
use docshelf_core::events::NotificationEvent;
use docshelf_core::traits::{Notifier, Repository};
use docshelf_core::types::DocumentId;
use docshelf_core::types::pagination::{Page, PageRequest, paginate_vec};
use docshelf_database::repositories::PgDocumentRepository;
use docshelf_entity::document::{
    Document, DocumentFilter, DocumentUpdate, MetadataValue, NewDocument, Tag,
};
use docshelf_storage::StorageManager;

use crate::context::RequestContext;

/// Data accepted for document creation, before domain validation.
#[derive(Debug, Clone)]
pub struct CreateDocumentInput {
    /// File name.
    pub file_name: String,
    /// File extension.
    pub file_extension: String,
    /// Content type.
    pub content_type: String,
    /// Text payload.
    pub content: String,
    /// Initial tags.
    pub tags: Vec<Tag>,
    /// Optional metadata tree.
    pub metadata: Option<MetadataValue>,
}

/// Data accepted for a full document update.
#[derive(Debug, Clone)]
pub struct UpdateDocumentInput {
    /// New file name.
    pub file_name: String,
    /// New file extension.
    pub file_extension: String,
    /// New content type.
    pub content_type: String,
    /// New text payload.
    pub content: String,
    /// Replacement tag set.
    pub tags: Vec<Tag>,
}

/// Handles document operations on behalf of an authenticated user.
#[derive(Debug, Clone)]
pub struct DocumentService {
    document_repo: Arc<PgDocumentRepository>,
    storage: Arc<StorageManager>,
    notifier: Arc<dyn Notifier>,
}

impl DocumentService {
    /// Creates a new document service.
    pub fn new(
        document_repo: Arc<PgDocumentRepository>,
        storage: Arc<StorageManager>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            document_repo,
            storage,
            notifier,
        }
    }

    /// Creates a document owned by the current user.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        input: CreateDocumentInput,
    ) -> Result<Document, AppError> {
        let document = Document::create(NewDocument {
            owner_id: ctx.user_id,
            file_name: input.file_name,
            file_extension: input.file_extension,
            content_type: input.content_type,
            content: input.content,
            tags: input.tags,
            metadata: input.metadata,
        })?;

        self.document_repo.insert(&document).await?;
        self.mirror_content(&document).await;
        self.notify_detached(NotificationEvent::DocumentCreated {
            document_id: document.id(),
            owner_id: document.owner_id(),
            file_name: document.file_name().to_string(),
            occurred_at: Utc::now(),
        });

        info!(document_id = %document.id(), owner_id = %ctx.user_id, "Document created");
        Ok(document)
    }

    /// Fetches one document; permitted for the owner or an admin.
    pub async fn get(
        &self,
        ctx: &RequestContext,
        id: DocumentId,
    ) -> Result<Document, AppError> {
        self.load_authorized(ctx, id).await
    }

    /// Lists documents with in-memory filtering and pagination.
    ///
    /// Regular users see their own documents; admins see everything.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        filter: DocumentFilter,
        page: PageRequest,
    ) -> Result<Page<Document>, AppError> {
        let documents = if ctx.is_admin() {
            self.document_repo.fetch_all().await?
        } else {
            self.document_repo.fetch_by_owner(ctx.user_id).await?
        };

        Ok(paginate_vec(filter.apply(documents), &page))
    }

    /// Replaces a document's mutable fields and tag set in full.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: DocumentId,
        input: UpdateDocumentInput,
    ) -> Result<Document, AppError> {
        let mut document = self.load_authorized(ctx, id).await?;

        document.update(DocumentUpdate {
            file_name: input.file_name,
            file_extension: input.file_extension,
            content_type: input.content_type,
            content: input.content,
            tags: input.tags,
        })?;

        self.document_repo.update(&document).await?;
        self.mirror_content(&document).await;
        self.notify_detached(NotificationEvent::DocumentUpdated {
            document_id: document.id(),
            owner_id: document.owner_id(),
            file_name: document.file_name().to_string(),
            occurred_at: Utc::now(),
        });

        info!(document_id = %id, "Document updated");
        Ok(document)
    }

    /// Deletes a document; its tags cascade and any mirrored blob is
    /// removed best-effort.
    pub async fn delete(&self, ctx: &RequestContext, id: DocumentId) -> Result<(), AppError> {
        let document = self.load_authorized(ctx, id).await?;

        self.document_repo.delete(&document.id()).await?;

        if self.storage.is_enabled() {
            if let Err(e) = self.storage.delete(&blob_key(id)).await {
                warn!(document_id = %id, error = %e, "Failed to remove mirrored blob");
            }
        }

        info!(document_id = %id, "Document deleted");
        Ok(())
    }

    /// Adds a tag; a duplicate key leaves the set unchanged but still
    /// counts as a write.
    pub async fn add_tag(
        &self,
        ctx: &RequestContext,
        id: DocumentId,
        tag: Tag,
    ) -> Result<Document, AppError> {
        let mut document = self.load_authorized(ctx, id).await?;
        document.add_tag(tag.clone());
        self.document_repo
            .add_tag(id, &tag, document.updated_at())
            .await?;
        Ok(document)
    }

    /// Renames an existing tag; an absent key changes nothing but still
    /// counts as a write.
    pub async fn update_tag(
        &self,
        ctx: &RequestContext,
        id: DocumentId,
        tag: Tag,
    ) -> Result<Document, AppError> {
        let mut document = self.load_authorized(ctx, id).await?;
        document.update_tag(tag.clone());
        self.document_repo
            .update_tag(id, &tag, document.updated_at())
            .await?;
        Ok(document)
    }

    /// Removes a tag by key, idempotently.
    pub async fn remove_tag(
        &self,
        ctx: &RequestContext,
        id: DocumentId,
        key: &str,
    ) -> Result<Document, AppError> {
        let mut document = self.load_authorized(ctx, id).await?;
        document.delete_tag(key);
        self.document_repo
            .remove_tag(id, key, document.updated_at())
            .await?;
        Ok(document)
    }

    /// Replaces the metadata tree.
    pub async fn update_meta(
        &self,
        ctx: &RequestContext,
        id: DocumentId,
        metadata: MetadataValue,
    ) -> Result<Document, AppError> {
        let mut document = self.load_authorized(ctx, id).await?;
        document.update_meta(metadata);
        self.document_repo.update(&document).await?;
        Ok(document)
    }

    /// Clears the metadata tree.
    pub async fn delete_meta(
        &self,
        ctx: &RequestContext,
        id: DocumentId,
    ) -> Result<Document, AppError> {
        let mut document = self.load_authorized(ctx, id).await?;
        document.delete_meta();
        self.document_repo.update(&document).await?;
        Ok(document)
    }

    async fn load_authorized(
        &self,
        ctx: &RequestContext,
        id: DocumentId,
    ) -> Result<Document, AppError> {
        let document = self
            .document_repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Document {id} not found")))?;

        if document.owner_id() != ctx.user_id && !ctx.is_admin() {
            return Err(AppError::authorization(
                "Only the document owner or an admin may access this document",
            ));
        }

        Ok(document)
    }

    /// Mirror the content blob after a committed write. PostgreSQL stays
    /// the source of truth; a mirror failure (after fallback) is logged,
    /// never surfaced.
    async fn mirror_content(&self, document: &Document) {
        if !self.storage.is_enabled() {
            return;
        }
        let key = blob_key(document.id());
        let data = Bytes::from(document.content().as_bytes().to_vec());
        if let Err(e) = self.storage.put(&key, data).await {
            warn!(document_id = %document.id(), error = %e, "Failed to mirror content blob");
        }
    }

    fn notify_detached(&self, event: NotificationEvent) {
        let notifier = self.notifier.clone();
        tokio::spawn(async move {
            if let Err(e) = notifier.notify(&event).await {
                warn!(event = event.name(), error = %e, "Document notification gave up");
            }
        });
    }
}

fn blob_key(id: DocumentId) -> String {
    format!("documents/{id}")
}
