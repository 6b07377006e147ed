//! Document Store Module
//!
//! Persistence is an external collaborator: anything that can create a
//! document in a named collection and query a collection back.

pub mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::models::errors::{AppError, AppResult};

/// Create/query access to named document collections
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Database name (diagnostics only)
    fn name(&self) -> &str;

    /// Insert a document and return its generated id
    async fn create(&self, collection: &str, document: Value) -> AppResult<String>;

    /// Documents whose top-level fields equal every entry of `filter`,
    /// in insertion order, at most `limit`
    async fn query(
        &self,
        collection: &str,
        filter: Map<String, Value>,
        limit: usize,
    ) -> AppResult<Vec<Value>>;

    /// Collection names, sorted
    async fn list_collections(&self) -> AppResult<Vec<String>>;
}

/// Serialize a record, stamp timestamps and insert it
pub async fn create_document<T: Serialize>(
    store: &dyn DocumentStore,
    collection: &str,
    record: &T,
) -> AppResult<String> {
    let mut document = match serde_json::to_value(record)? {
        Value::Object(map) => map,
        other => {
            return Err(AppError::bad_request(format!(
                "Documents must be JSON objects, got {}",
                other
            )))
        }
    };

    let now = Value::String(chrono::Utc::now().to_rfc3339());
    document.insert("created_at".to_string(), now.clone());
    document.insert("updated_at".to_string(), now);

    store.create(collection, Value::Object(document)).await
}

/// Query a collection
pub async fn get_documents(
    store: &dyn DocumentStore,
    collection: &str,
    filter: Map<String, Value>,
    limit: usize,
) -> AppResult<Vec<Value>> {
    store.query(collection, filter, limit).await
}
