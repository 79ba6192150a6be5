use async_trait::async_trait;
use chrono::Utc;
use std::sync::Mutex;

use super::{effective_limit, ensure_non_empty, JsonRecord, RecordStore};
use crate::error::StoreError;

/// In-process [`RecordStore`] for tests.
#[derive(Default)]
pub struct MemoryRecordStore {
    records: Mutex<Vec<JsonRecord>>,
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn save_record(&self, url: &str, content: &str) -> Result<JsonRecord, StoreError> {
        ensure_non_empty(url, content)?;

        let mut records = self.records.lock().unwrap();
        let record = JsonRecord {
            id: records.len() as i64 + 1,
            url: url.to_string(),
            content: content.to_string(),
            created_at: Utc::now(),
        };
        records.push(record.clone());
        Ok(record)
    }

    async fn list_recent_records(&self, limit: i64) -> Result<Vec<JsonRecord>, StoreError> {
        let records = self.records.lock().unwrap();
        Ok(records
            .iter()
            .rev()
            .take(effective_limit(limit) as usize)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn saved_record_is_listed_first() {
        let store = MemoryRecordStore::default();
        let started = Utc::now();

        store.save_record("http://example.com/old", "[]").await.unwrap();
        let saved = store
            .save_record("http://example.com/x", r#"{"a":1}"#)
            .await
            .unwrap();

        let listed = store.list_recent_records(10).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0], saved);
        assert!(listed[0].id > 0);
        assert!(listed[0].created_at >= started);
    }

    #[tokio::test]
    async fn zero_limit_matches_default_limit() {
        let store = MemoryRecordStore::default();
        for i in 0..12 {
            store
                .save_record(&format!("http://example.com/{i}"), "{}")
                .await
                .unwrap();
        }

        let zero = store.list_recent_records(0).await.unwrap();
        let ten = store.list_recent_records(10).await.unwrap();
        assert_eq!(zero.len(), 10);
        assert_eq!(zero, ten);
        assert_eq!(zero[0].url, "http://example.com/11");
    }

    #[tokio::test]
    async fn empty_store_lists_nothing() {
        let store = MemoryRecordStore::default();
        assert!(store.list_recent_records(5).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn rejects_empty_fields() {
        let store = MemoryRecordStore::default();
        assert!(matches!(
            store.save_record("", "{}").await,
            Err(StoreError::EmptyField("url"))
        ));
        assert!(matches!(
            store.save_record("http://example.com", "").await,
            Err(StoreError::EmptyField("content"))
        ));
    }
}
