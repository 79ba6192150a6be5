//! Persistence for fetched JSON documents.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::StoreError;

#[cfg(test)]
pub mod memory;
pub mod postgres;

pub use postgres::PgRecordStore;

/// Number of records returned when a caller passes a non-positive limit.
pub const DEFAULT_LIST_LIMIT: i64 = 10;

/// A persisted document together with the URL it was fetched from.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct JsonRecord {
    pub id: i64,
    pub url: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Inserts a record, letting the store assign its id and creation time.
    async fn save_record(&self, url: &str, content: &str) -> Result<JsonRecord, StoreError>;

    /// Most recent records first. Limits below one mean [`DEFAULT_LIST_LIMIT`].
    async fn list_recent_records(&self, limit: i64) -> Result<Vec<JsonRecord>, StoreError>;
}

pub(crate) fn effective_limit(limit: i64) -> i64 {
    if limit <= 0 { DEFAULT_LIST_LIMIT } else { limit }
}

pub(crate) fn ensure_non_empty(url: &str, content: &str) -> Result<(), StoreError> {
    if url.is_empty() {
        return Err(StoreError::EmptyField("url"));
    }
    if content.is_empty() {
        return Err(StoreError::EmptyField("content"));
    }
    Ok(())
}
