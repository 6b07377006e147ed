//! In-process document store
//!
//! Thread-safe collection storage on DashMap, selected with a
//! `memory://<name>` DATABASE_URL. Nothing survives a restart.

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::{Map, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

use super::DocumentStore;
use crate::models::errors::{AppError, AppResult};
use crate::utils::constants::DOCUMENT_ID_FIELD;

/// Collection name -> documents in insertion order
#[derive(Clone)]
pub struct MemoryStore {
    name: String,
    collections: Arc<DashMap<String, Vec<Value>>>,
    writes: Arc<AtomicU64>,
}

impl MemoryStore {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            collections: Arc::new(DashMap::new()),
            writes: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Total documents written since startup
    pub fn write_count(&self) -> u64 {
        self.writes.load(Ordering::Relaxed)
    }

    fn matches(document: &Value, filter: &Map<String, Value>) -> bool {
        filter
            .iter()
            .all(|(field, expected)| document.get(field) == Some(expected))
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn name(&self) -> &str {
        &self.name
    }

    async fn create(&self, collection: &str, document: Value) -> AppResult<String> {
        let Value::Object(mut fields) = document else {
            return Err(AppError::store_write_failed(format!(
                "Cannot insert non-object document into {}",
                collection
            )));
        };

        let id = uuid::Uuid::new_v4().to_string();
        fields.insert(DOCUMENT_ID_FIELD.to_string(), Value::String(id.clone()));

        self.collections
            .entry(collection.to_string())
            .or_default()
            .push(Value::Object(fields));
        self.writes.fetch_add(1, Ordering::Relaxed);

        debug!(collection = %collection, id = %id, "Document created");
        Ok(id)
    }

    async fn query(
        &self,
        collection: &str,
        filter: Map<String, Value>,
        limit: usize,
    ) -> AppResult<Vec<Value>> {
        let docs = match self.collections.get(collection) {
            Some(entries) => entries
                .iter()
                .filter(|doc| Self::matches(doc, &filter))
                .take(limit)
                .cloned()
                .collect(),
            None => Vec::new(),
        };

        debug!(collection = %collection, returned = docs.len(), "Documents queried");
        Ok(docs)
    }

    async fn list_collections(&self) -> AppResult<Vec<String>> {
        let mut names: Vec<String> = self
            .collections
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_create_assigns_unique_ids() {
        let store = MemoryStore::new("test");
        let a = store.create("order", json!({"game": "HSR"})).await.unwrap();
        let b = store.create("order", json!({"game": "HSR"})).await.unwrap();
        assert_ne!(a, b);
        assert_eq!(store.write_count(), 2);
    }

    #[tokio::test]
    async fn test_query_filter_and_limit() {
        let store = MemoryStore::new("test");
        for (name, game) in [("a", "HSR"), ("b", "Genshin Impact"), ("c", "HSR"), ("d", "HSR")] {
            store
                .create("testimonial", json!({"name": name, "game": game}))
                .await
                .unwrap();
        }

        let mut filter = Map::new();
        filter.insert("game".to_string(), json!("HSR"));
        let docs = store.query("testimonial", filter, 2).await.unwrap();
        let names: Vec<_> = docs.iter().map(|d| d["name"].clone()).collect();
        assert_eq!(names, vec![json!("a"), json!("c")]);

        let all = store.query("testimonial", Map::new(), 100).await.unwrap();
        assert_eq!(all.len(), 4);

        let none = store.query("testimonial", Map::new(), 0).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_collection_is_empty() {
        let store = MemoryStore::new("test");
        assert!(store.query("missing", Map::new(), 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_collections_sorted() {
        let store = MemoryStore::new("test");
        store.create("testimonial", json!({})).await.unwrap();
        store.create("order", json!({})).await.unwrap();
        assert_eq!(
            store.list_collections().await.unwrap(),
            vec!["order".to_string(), "testimonial".to_string()]
        );
    }

    #[tokio::test]
    async fn test_rejects_non_object() {
        let store = MemoryStore::new("test");
        assert!(store.create("order", json!([1, 2])).await.is_err());
    }
}
