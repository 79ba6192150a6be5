use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

use super::{effective_limit, ensure_non_empty, JsonRecord, RecordStore};
use crate::config::DatabaseConfig;
use crate::error::StoreError;

const ENSURE_SCHEMA: [&str; 2] = [
    r#"
    CREATE TABLE IF NOT EXISTS json_records (
      id          BIGSERIAL PRIMARY KEY,
      url         VARCHAR(2048) NOT NULL,
      content     TEXT NOT NULL,
      created_at  TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_json_records_created_at ON json_records (created_at DESC)",
];

/// Postgres-backed [`RecordStore`]. The pool is shared by all requests.
#[derive(Clone)]
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    /// Connects and ensures the schema exists before returning.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(5))
            .connect_with(config.connect_options())
            .await
            .map_err(StoreError::ConnectionSetup)?;

        let store = Self::from_pool(pool).await?;
        tracing::info!(host = %config.host, database = %config.name, "connected to PostgreSQL");
        Ok(store)
    }

    pub async fn from_pool(pool: PgPool) -> Result<Self, StoreError> {
        let store = Self { pool };
        store.ensure_schema().await?;
        Ok(store)
    }

    /// Safe to run on every boot.
    async fn ensure_schema(&self) -> Result<(), StoreError> {
        for statement in ENSURE_SCHEMA {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(StoreError::Schema)?;
        }
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn save_record(&self, url: &str, content: &str) -> Result<JsonRecord, StoreError> {
        ensure_non_empty(url, content)?;

        let record = sqlx::query_as::<_, JsonRecord>(
            "INSERT INTO json_records (url, content) VALUES ($1, $2) \
             RETURNING id, url, content, created_at",
        )
        .bind(url)
        .bind(content)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    async fn list_recent_records(&self, limit: i64) -> Result<Vec<JsonRecord>, StoreError> {
        let records = sqlx::query_as::<_, JsonRecord>(
            "SELECT id, url, content, created_at FROM json_records \
             ORDER BY created_at DESC, id DESC LIMIT $1",
        )
        .bind(effective_limit(limit))
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }
}
