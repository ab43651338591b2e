//! User repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use docshelf_core::error::{AppError, ErrorKind};
use docshelf_core::result::AppResult;
use docshelf_core::traits::Repository;
use docshelf_core::types::UserId;
use docshelf_core::types::pagination::{Page, PageRequest};
use docshelf_entity::user::mapper::{self, UserRecord};
use docshelf_entity::user::{User, UserRole};

/// Repository for user CRUD and query operations.
#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by username (case-insensitive).
    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let record = sqlx::query_as::<_, UserRecord>(
            "SELECT * FROM users WHERE LOWER(username) = LOWER($1)",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find user by username", e)
        })?;

        record.map(mapper::from_record).transpose()
    }

    /// Whether any admin account exists (bootstrap check).
    pub async fn admin_exists(&self) -> AppResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE role = $1")
            .bind(UserRole::Admin)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count admins", e))?;
        Ok(count > 0)
    }
}

#[async_trait]
impl Repository<User, UserId> for PgUserRepository {
    async fn find_by_id(&self, id: &UserId) -> AppResult<Option<User>> {
        let record = sqlx::query_as::<_, UserRecord>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by id", e)
            })?;

        record.map(mapper::from_record).transpose()
    }

    async fn find_all(&self, page: &PageRequest) -> AppResult<Page<User>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count users", e))?;
        let total = total as u64;

        let records = sqlx::query_as::<_, UserRecord>(
            "SELECT * FROM users ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(page.limit() as i64)
        .bind(page.offset_for(total) as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list users", e))?;

        let users = records
            .into_iter()
            .map(mapper::from_record)
            .collect::<AppResult<Vec<_>>>()?;

        Ok(Page::new(
            users,
            page.effective_page(total),
            page.size,
            total,
        ))
    }

    async fn insert(&self, user: &User) -> AppResult<()> {
        let record = mapper::to_record(user)?;

        sqlx::query(
            "INSERT INTO users (id, username, role, password_hash, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(record.id)
        .bind(&record.username)
        .bind(record.role)
        .bind(&record.password_hash)
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.constraint() == Some("users_username_key") => {
                AppError::conflict(format!("Username '{}' already exists", record.username))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to insert user", e),
        })?;

        Ok(())
    }

    async fn update(&self, user: &User) -> AppResult<()> {
        let record = mapper::to_record(user)?;

        let result = sqlx::query(
            "UPDATE users SET username = $2, role = $3, password_hash = $4, updated_at = $5 \
             WHERE id = $1",
        )
        .bind(record.id)
        .bind(&record.username)
        .bind(record.role)
        .bind(&record.password_hash)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update user", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("User {} not found", record.id)));
        }
        Ok(())
    }

    async fn delete(&self, id: &UserId) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete user", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("User {id} not found")));
        }
        Ok(())
    }

    async fn count(&self) -> AppResult<u64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count users", e))?;
        Ok(total as u64)
    }
}
