use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::{Account, Camp, CampRow, CampUpdate, NewCamp};
use crate::error::{AppError, DatabaseError};

/// Credential persistence as seen by the auth core. Uniqueness of usernames
/// is the storage layer's responsibility: `create_account` must fail with
/// `DatabaseError::Duplicate` atomically, not by a separate read.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_account_by_username(&self, username: &str) -> Result<Option<Account>, AppError>;
    async fn create_account(&self, username: &str, password_hash: &str) -> Result<Account, AppError>;
}

#[async_trait]
pub trait CampStore: Send + Sync {
    async fn list_camps(&self) -> Result<Vec<Camp>, AppError>;
    async fn get_camp(&self, id: Uuid) -> Result<Option<Camp>, AppError>;
    async fn create_camp(&self, new_camp: NewCamp) -> Result<Camp, AppError>;
    async fn update_camp(&self, id: Uuid, update: CampUpdate) -> Result<Option<Camp>, AppError>;
    async fn delete_camp(&self, id: Uuid) -> Result<bool, AppError>;
}

const ACCOUNT_COLUMNS: &str = "id, username, password_hash, created_at, updated_at";
const CAMP_COLUMNS: &str =
    "id, title, location, description, price, image_data, image_content_type, image_filename, created_at, updated_at";

pub struct DbOperations {
    pool: Arc<PgPool>,
}

impl DbOperations {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await
            .map_err(|e| {
                AppError::DatabaseError(DatabaseError::ConnectionError(e.to_string()))
            })?;

        sqlx::migrate!()
            .run(&pool)
            .await
            .map_err(|e| AppError::DatabaseError(DatabaseError::QueryError(e.to_string())))?;

        Ok(Self { pool: Arc::new(pool) })
    }
}

#[async_trait]
impl CredentialStore for DbOperations {
    async fn find_account_by_username(&self, username: &str) -> Result<Option<Account>, AppError> {
        let account = sqlx::query_as::<_, Account>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(account)
    }

    async fn create_account(&self, username: &str, password_hash: &str) -> Result<Account, AppError> {
        let account = Account::new(username.to_string(), password_hash.to_string());

        // The unique index on username turns a concurrent duplicate signup
        // into a Duplicate error here instead of a second account
        let created = sqlx::query_as::<_, Account>(&format!(
            r#"
            INSERT INTO accounts (id, username, password_hash, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {ACCOUNT_COLUMNS}
            "#
        ))
        .bind(account.id)
        .bind(&account.username)
        .bind(&account.password_hash)
        .bind(account.created_at)
        .bind(account.updated_at)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(created)
    }
}

#[async_trait]
impl CampStore for DbOperations {
    async fn list_camps(&self) -> Result<Vec<Camp>, AppError> {
        let rows = sqlx::query_as::<_, CampRow>(&format!(
            "SELECT {CAMP_COLUMNS} FROM camps ORDER BY created_at"
        ))
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Camp::from).collect())
    }

    async fn get_camp(&self, id: Uuid) -> Result<Option<Camp>, AppError> {
        let row = sqlx::query_as::<_, CampRow>(&format!(
            "SELECT {CAMP_COLUMNS} FROM camps WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Camp::from))
    }

    async fn create_camp(&self, new_camp: NewCamp) -> Result<Camp, AppError> {
        let now = Utc::now();
        let (image_data, image_content_type, image_filename) = match new_camp.image {
            Some(image) => (Some(image.data), Some(image.content_type), Some(image.filename)),
            None => (None, None, None),
        };

        let row = sqlx::query_as::<_, CampRow>(&format!(
            r#"
            INSERT INTO camps (id, title, location, description, price,
                               image_data, image_content_type, image_filename,
                               created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {CAMP_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&new_camp.title)
        .bind(&new_camp.location)
        .bind(&new_camp.description)
        .bind(new_camp.price)
        .bind(image_data)
        .bind(image_content_type)
        .bind(image_filename)
        .bind(now)
        .bind(now)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn update_camp(&self, id: Uuid, update: CampUpdate) -> Result<Option<Camp>, AppError> {
        let (image_data, image_content_type, image_filename) = match update.image {
            Some(image) => (Some(image.data), Some(image.content_type), Some(image.filename)),
            None => (None, None, None),
        };

        // COALESCE keeps stored values for fields absent from the request
        let row = sqlx::query_as::<_, CampRow>(&format!(
            r#"
            UPDATE camps SET
                title = COALESCE($2, title),
                location = COALESCE($3, location),
                description = COALESCE($4, description),
                price = COALESCE($5, price),
                image_data = COALESCE($6, image_data),
                image_content_type = COALESCE($7, image_content_type),
                image_filename = COALESCE($8, image_filename),
                updated_at = $9
            WHERE id = $1
            RETURNING {CAMP_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(update.title)
        .bind(update.location)
        .bind(update.description)
        .bind(update.price)
        .bind(image_data)
        .bind(image_content_type)
        .bind(image_filename)
        .bind(Utc::now())
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Camp::from))
    }

    async fn delete_camp(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM camps WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
