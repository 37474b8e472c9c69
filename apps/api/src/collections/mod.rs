//! Cloud document store wrapper.
//!
//! `DocumentStore` is the seam: collection-level get/add/set/update/delete and
//! equality queries, nothing more. The entity modules group pass-through calls
//! per collection (`users`, `goals`, `progress`, `chats`, `documents`) and only
//! construct queries; there are no retries, no offline queue and no conflict
//! resolution. `AppState` carries an `Arc<dyn DocumentStore>`.

pub mod chats;
pub mod goals;
pub mod handlers;
pub mod memory;
pub mod profiles;
pub mod progress;
pub mod saved_documents;

use std::fmt;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

pub use memory::InMemoryDocumentStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{collection}/{id} does not exist")]
    NotFound { collection: String, id: String },

    #[error("Documents must be JSON objects, got {0}")]
    NotAnObject(&'static str),

    #[error("Stored document could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Users,
    Goals,
    Progress,
    Chats,
    Documents,
}

impl Collection {
    pub fn as_str(self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Goals => "goals",
            Collection::Progress => "progress",
            Collection::Chats => "chats",
            Collection::Documents => "documents",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A document as held by the store: its id plus schemaless fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredDocument {
    pub id: String,
    #[serde(flatten)]
    pub data: Map<String, Value>,
}

impl StoredDocument {
    /// Decodes into a typed record, exposing the document id as `id`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, StoreError> {
        let mut fields = self.data.clone();
        fields.insert("id".to_string(), Value::String(self.id.clone()));
        Ok(serde_json::from_value(Value::Object(fields))?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// Equality filters, an optional single ordering field and a limit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub filters: Vec<(String, Value)>,
    pub order_by: Option<(String, Direction)>,
    pub limit: Option<usize>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn where_eq(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.filters.push((field.to_string(), value.into()));
        self
    }

    pub fn order_by(mut self, field: &str, direction: Direction) -> Self {
        self.order_by = Some((field.to_string(), direction));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<Option<StoredDocument>, StoreError>;

    /// Stores `data` under a generated id and returns that id.
    async fn add(&self, collection: Collection, data: Value) -> Result<String, StoreError>;

    /// Creates or replaces the document at `id`.
    async fn set(&self, collection: Collection, id: &str, data: Value) -> Result<(), StoreError>;

    /// Shallow-merges `fields` into an existing document.
    async fn update(
        &self,
        collection: Collection,
        id: &str,
        fields: Value,
    ) -> Result<(), StoreError>;

    /// Deleting a missing document is not an error.
    async fn delete(&self, collection: Collection, id: &str) -> Result<(), StoreError>;

    async fn query(
        &self,
        collection: Collection,
        query: &Query,
    ) -> Result<Vec<StoredDocument>, StoreError>;
}

/// Serializes `record` without its `id` field, ready for `add`/`set`.
pub(crate) fn to_fields<T: Serialize>(record: &T) -> Result<Value, StoreError> {
    match serde_json::to_value(record)? {
        Value::Object(mut fields) => {
            fields.remove("id");
            Ok(Value::Object(fields))
        }
        _ => Err(StoreError::NotAnObject("a non-object record")),
    }
}

/// Fetches and decodes a document that must exist.
pub(crate) async fn get_required<T: DeserializeOwned>(
    store: &dyn DocumentStore,
    collection: Collection,
    id: &str,
) -> Result<T, StoreError> {
    store
        .get(collection, id)
        .await?
        .ok_or_else(|| StoreError::NotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        })?
        .decode()
}

pub(crate) fn decode_all<T: DeserializeOwned>(
    documents: Vec<StoredDocument>,
) -> Result<Vec<T>, StoreError> {
    documents.iter().map(StoredDocument::decode).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_injects_id() {
        #[derive(Deserialize)]
        struct Row {
            id: String,
            title: String,
        }
        let doc = StoredDocument {
            id: "abc".to_string(),
            data: json!({"title": "Ship it"}).as_object().cloned().unwrap(),
        };
        let row: Row = doc.decode().unwrap();
        assert_eq!(row.id, "abc");
        assert_eq!(row.title, "Ship it");
    }

    #[test]
    fn test_to_fields_strips_id() {
        let fields = to_fields(&json!({"id": "x", "title": "t"})).unwrap();
        assert_eq!(fields, json!({"title": "t"}));
    }

    #[test]
    fn test_to_fields_rejects_scalars() {
        assert!(matches!(to_fields(&3), Err(StoreError::NotAnObject(_))));
    }

    #[test]
    fn test_query_builder() {
        let q = Query::new()
            .where_eq("userId", "1")
            .order_by("createdAt", Direction::Descending)
            .limit(5);
        assert_eq!(q.filters, vec![("userId".to_string(), json!("1"))]);
        assert_eq!(q.limit, Some(5));
    }
}
