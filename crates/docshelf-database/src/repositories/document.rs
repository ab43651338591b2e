//! Document repository implementation.
//!
//! A document row and its tag rows are written inside one transaction so
//! a partial aggregate is never observable. Updates are full replaces
//! (last writer wins): the tag set is deleted and rewritten rather than
//! merged.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};

use docshelf_core::error::{AppError, ErrorKind};
use docshelf_core::result::AppResult;
use docshelf_core::traits::Repository;
use docshelf_core::types::pagination::{Page, PageRequest, paginate_vec};
use docshelf_core::types::{DocumentId, UserId};
use docshelf_entity::document::mapper::{self, DocumentRecord, TagRecord};
use docshelf_entity::document::{Document, Tag};

/// Repository for document CRUD, tag sub-resource writes, and queries.
#[derive(Debug, Clone)]
pub struct PgDocumentRepository {
    pool: PgPool,
}

impl PgDocumentRepository {
    /// Create a new document repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch every document owned by one user, tags included.
    ///
    /// List filtering is evaluated in memory over this set, so the query
    /// deliberately has no filter pushdown.
    pub async fn fetch_by_owner(&self, owner_id: UserId) -> AppResult<Vec<Document>> {
        let records = sqlx::query_as::<_, DocumentRecord>(
            "SELECT * FROM documents WHERE owner_id = $1 ORDER BY created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list documents by owner", e)
        })?;

        self.materialize(records).await
    }

    /// Fetch every document in the store, tags included (admin listing).
    pub async fn fetch_all(&self) -> AppResult<Vec<Document>> {
        let records = sqlx::query_as::<_, DocumentRecord>(
            "SELECT * FROM documents ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list documents", e))?;

        self.materialize(records).await
    }

    /// Persist one tag insertion together with the aggregate's new
    /// `updated_at`. The insert is a no-op when the key already exists
    /// (first write wins), but the timestamp bump still lands.
    pub async fn add_tag(
        &self,
        document_id: DocumentId,
        tag: &Tag,
        updated_at: DateTime<Utc>,
    ) -> AppResult<()> {
        let mut tx = self.begin().await?;

        touch_document(&mut tx, document_id, updated_at).await?;

        sqlx::query(
            "INSERT INTO tags (document_id, key, name) VALUES ($1, $2, $3) \
             ON CONFLICT (document_id, key) DO NOTHING",
        )
        .bind(document_id)
        .bind(&tag.key)
        .bind(&tag.name)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to insert tag", e))?;

        commit(tx).await
    }

    /// Persist one tag rename; absent keys change nothing beyond the
    /// timestamp bump.
    pub async fn update_tag(
        &self,
        document_id: DocumentId,
        tag: &Tag,
        updated_at: DateTime<Utc>,
    ) -> AppResult<()> {
        let mut tx = self.begin().await?;

        touch_document(&mut tx, document_id, updated_at).await?;

        sqlx::query("UPDATE tags SET name = $3 WHERE document_id = $1 AND key = $2")
            .bind(document_id)
            .bind(&tag.key)
            .bind(&tag.name)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update tag", e))?;

        commit(tx).await
    }

    /// Persist one tag removal, idempotently.
    pub async fn remove_tag(
        &self,
        document_id: DocumentId,
        key: &str,
        updated_at: DateTime<Utc>,
    ) -> AppResult<()> {
        let mut tx = self.begin().await?;

        touch_document(&mut tx, document_id, updated_at).await?;

        sqlx::query("DELETE FROM tags WHERE document_id = $1 AND key = $2")
            .bind(document_id)
            .bind(key)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete tag", e))?;

        commit(tx).await
    }

    async fn materialize(&self, records: Vec<DocumentRecord>) -> AppResult<Vec<Document>> {
        let mut documents = Vec::with_capacity(records.len());
        for record in records {
            let tags = self.tag_rows(record.id).await?;
            documents.push(mapper::from_record(record, tags)?);
        }
        Ok(documents)
    }

    async fn tag_rows(&self, document_id: DocumentId) -> AppResult<Vec<TagRecord>> {
        sqlx::query_as::<_, TagRecord>("SELECT * FROM tags WHERE document_id = $1")
            .bind(document_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load tags", e))
    }

    async fn begin(&self) -> AppResult<Transaction<'static, Postgres>> {
        self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })
    }
}

#[async_trait]
impl Repository<Document, DocumentId> for PgDocumentRepository {
    async fn find_by_id(&self, id: &DocumentId) -> AppResult<Option<Document>> {
        let record = sqlx::query_as::<_, DocumentRecord>("SELECT * FROM documents WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find document by id", e)
            })?;

        match record {
            Some(record) => {
                let tags = self.tag_rows(record.id).await?;
                Ok(Some(mapper::from_record(record, tags)?))
            }
            None => Ok(None),
        }
    }

    async fn find_all(&self, page: &PageRequest) -> AppResult<Page<Document>> {
        // The filter contract evaluates in memory, so listing fetches the
        // full set and pages it with the same pure helper.
        let documents = self.fetch_all().await?;
        Ok(paginate_vec(documents, page))
    }

    async fn insert(&self, document: &Document) -> AppResult<()> {
        let (record, tag_rows) = mapper::to_record(document)?;
        let mut tx = self.begin().await?;

        sqlx::query(
            "INSERT INTO documents \
             (id, owner_id, file_name, file_extension, content_type, content, metadata, \
              created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(record.id)
        .bind(record.owner_id)
        .bind(&record.file_name)
        .bind(&record.file_extension)
        .bind(&record.content_type)
        .bind(&record.content)
        .bind(&record.metadata)
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to insert document", e))?;

        insert_tag_rows(&mut tx, &tag_rows).await?;

        commit(tx).await
    }

    async fn update(&self, document: &Document) -> AppResult<()> {
        let (record, tag_rows) = mapper::to_record(document)?;
        let mut tx = self.begin().await?;

        let result = sqlx::query(
            "UPDATE documents SET file_name = $2, file_extension = $3, content_type = $4, \
             content = $5, metadata = $6, updated_at = $7 \
             WHERE id = $1",
        )
        .bind(record.id)
        .bind(&record.file_name)
        .bind(&record.file_extension)
        .bind(&record.content_type)
        .bind(&record.content)
        .bind(&record.metadata)
        .bind(record.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update document", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "Document {} not found",
                record.id
            )));
        }

        // Full replace: rebuild the tag set rather than merging.
        sqlx::query("DELETE FROM tags WHERE document_id = $1")
            .bind(record.id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to clear tags", e))?;

        insert_tag_rows(&mut tx, &tag_rows).await?;

        commit(tx).await
    }

    async fn delete(&self, id: &DocumentId) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM documents WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete document", e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Document {id} not found")));
        }
        Ok(())
    }

    async fn count(&self) -> AppResult<u64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM documents")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count documents", e)
            })?;
        Ok(total as u64)
    }
}

async fn insert_tag_rows(
    tx: &mut Transaction<'static, Postgres>,
    tag_rows: &[TagRecord],
) -> AppResult<()> {
    for row in tag_rows {
        sqlx::query("INSERT INTO tags (document_id, key, name) VALUES ($1, $2, $3)")
            .bind(row.document_id)
            .bind(&row.key)
            .bind(&row.name)
            .execute(&mut **tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to insert tag", e))?;
    }
    Ok(())
}

/// Bump the owning document's `updated_at`, failing with NotFound when
/// the document row is missing.
async fn touch_document(
    tx: &mut Transaction<'static, Postgres>,
    document_id: DocumentId,
    updated_at: DateTime<Utc>,
) -> AppResult<()> {
    let result = sqlx::query("UPDATE documents SET updated_at = $2 WHERE id = $1")
        .bind(document_id)
        .bind(updated_at)
        .execute(&mut **tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to touch document", e))?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found(format!(
            "Document {document_id} not found"
        )));
    }
    Ok(())
}

async fn commit(tx: Transaction<'static, Postgres>) -> AppResult<()> {
    tx.commit()
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e))
}
