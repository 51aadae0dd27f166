//! PostgreSQL implementation of the record store.
//!
//! Stores each uploaded resume as one row of the `all_resume_json` table, with the
//! document itself in a `JSONB` column.

use async_trait::async_trait;
use resume_indexer_shared::RawRecord;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::Row;
use tracing::{debug, info};

use crate::config::StoreConfig;
use crate::errors::RecordStoreError;
use crate::interfaces::RecordStore;

/// Name of the backing table.
pub const TABLE_NAME: &str = "all_resume_json";

/// DDL for the backing table.
pub const CREATE_TABLE_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS all_resume_json (
    id SERIAL PRIMARY KEY,
    file_name TEXT UNIQUE NOT NULL,
    resume_data JSONB NOT NULL
)"#;

/// PostgreSQL-backed record store.
///
/// Each operation checks a connection out of the pool and returns it when the
/// operation ends, so no connection outlives a single call.
pub struct PostgresRecordStore {
    /// PostgreSQL connection pool
    pool: sqlx::PgPool,
}

impl PostgresRecordStore {
    /// Connects to PostgreSQL using the given settings.
    ///
    /// # Returns
    ///
    /// * `Ok(PostgresRecordStore)` - Ready-to-use store instance
    /// * `Err(RecordStoreError)` - If the database cannot be reached
    pub async fn connect(config: &StoreConfig) -> Result<Self, RecordStoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect_with(config.connect_options())
            .await?;

        info!(
            host = %config.host,
            port = config.port,
            database = %config.database,
            "Connected to record store"
        );

        Ok(Self { pool })
    }

    /// Wraps an existing pool.
    pub fn from_pool(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PostgresRecordStore {
    async fn ensure_schema(&self) -> Result<(), RecordStoreError> {
        let mut conn = self.pool.acquire().await?;
        sqlx::query(CREATE_TABLE_SQL).execute(&mut *conn).await?;
        debug!(table = TABLE_NAME, "Ensured record store table exists");
        Ok(())
    }

    async fn exists(&self, file_name: &str) -> Result<bool, RecordStoreError> {
        let mut conn = self.pool.acquire().await?;
        let row = sqlx::query("SELECT 1 FROM all_resume_json WHERE file_name = $1")
            .bind(file_name)
            .fetch_optional(&mut *conn)
            .await?;

        Ok(row.is_some())
    }

    async fn insert(&self, file_name: &str, resume_data: &Value) -> Result<(), RecordStoreError> {
        let mut conn = self.pool.acquire().await?;
        let result = sqlx::query("INSERT INTO all_resume_json (file_name, resume_data) VALUES ($1, $2)")
            .bind(file_name)
            .bind(Json(resume_data))
            .execute(&mut *conn)
            .await;

        match result {
            Ok(_) => {
                debug!(file_name = %file_name, "Inserted record");
                Ok(())
            }
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(RecordStoreError::Conflict(file_name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn fetch_all(&self) -> Result<Vec<RawRecord>, RecordStoreError> {
        let mut conn = self.pool.acquire().await?;
        let rows = sqlx::query("SELECT file_name, resume_data FROM all_resume_json ORDER BY id")
            .fetch_all(&mut *conn)
            .await?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            let file_name: String = row.try_get("file_name")?;
            let resume_data: Value = row.try_get("resume_data")?;
            records.push(RawRecord::new(file_name, resume_data));
        }

        debug!(count = records.len(), "Fetched all records");
        Ok(records)
    }
}
