use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::DateTime;
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::collections::{
    Collection, Direction, DocumentStore, Query, StoreError, StoredDocument,
};

type Documents = BTreeMap<String, Map<String, Value>>;

/// Process-local document store. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    collections: RwLock<HashMap<Collection, Documents>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn into_object(value: Value) -> Result<Map<String, Value>, StoreError> {
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Err(StoreError::NotAnObject("null")),
        Value::Bool(_) => Err(StoreError::NotAnObject("a boolean")),
        Value::Number(_) => Err(StoreError::NotAnObject("a number")),
        Value::String(_) => Err(StoreError::NotAnObject("a string")),
        Value::Array(_) => Err(StoreError::NotAnObject("an array")),
    }
}

/// Orders values of the same JSON type; mixed types fall back to a type rank.
fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => {
            // timestamps carry a variable number of fractional digits
            match (DateTime::parse_from_rfc3339(x), DateTime::parse_from_rfc3339(y)) {
                (Ok(x), Ok(y)) => x.cmp(&y),
                _ => x.cmp(y),
            }
        }
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn get(
        &self,
        collection: Collection,
        id: &str,
    ) -> Result<Option<StoredDocument>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .and_then(|docs| docs.get(id))
            .map(|data| StoredDocument {
                id: id.to_string(),
                data: data.clone(),
            }))
    }

    async fn add(&self, collection: Collection, data: Value) -> Result<String, StoreError> {
        let fields = into_object(data)?;
        let id = Uuid::new_v4().simple().to_string();
        self.collections
            .write()
            .await
            .entry(collection)
            .or_default()
            .insert(id.clone(), fields);
        debug!("Added {collection}/{id}");
        Ok(id)
    }

    async fn set(&self, collection: Collection, id: &str, data: Value) -> Result<(), StoreError> {
        let fields = into_object(data)?;
        self.collections
            .write()
            .await
            .entry(collection)
            .or_default()
            .insert(id.to_string(), fields);
        debug!("Set {collection}/{id}");
        Ok(())
    }

    async fn update(
        &self,
        collection: Collection,
        id: &str,
        fields: Value,
    ) -> Result<(), StoreError> {
        let fields = into_object(fields)?;
        let mut collections = self.collections.write().await;
        let existing = collections
            .get_mut(&collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })?;
        existing.extend(fields);
        debug!("Updated {collection}/{id}");
        Ok(())
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<(), StoreError> {
        if let Some(docs) = self.collections.write().await.get_mut(&collection) {
            docs.remove(id);
        }
        debug!("Deleted {collection}/{id}");
        Ok(())
    }

    async fn query(
        &self,
        collection: Collection,
        query: &Query,
    ) -> Result<Vec<StoredDocument>, StoreError> {
        let collections = self.collections.read().await;
        let Some(docs) = collections.get(&collection) else {
            return Ok(Vec::new());
        };

        let mut matches: Vec<StoredDocument> = docs
            .iter()
            .filter(|(_, data)| {
                query
                    .filters
                    .iter()
                    .all(|(field, value)| data.get(field) == Some(value))
            })
            // documents missing the ordering field are left out
            .filter(|(_, data)| {
                query
                    .order_by
                    .as_ref()
                    .map_or(true, |(field, _)| data.contains_key(field))
            })
            .map(|(id, data)| StoredDocument {
                id: id.clone(),
                data: data.clone(),
            })
            .collect();

        if let Some((field, direction)) = &query.order_by {
            matches.sort_by(|a, b| {
                let ordering = compare_values(&a.data[field], &b.data[field]);
                match direction {
                    Direction::Ascending => ordering,
                    Direction::Descending => ordering.reverse(),
                }
            });
        }
        if let Some(limit) = query.limit {
            matches.truncate(limit);
        }
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_add_then_get() {
        let store = InMemoryDocumentStore::new();
        let id = store
            .add(Collection::Goals, json!({"title": "Learn Rust"}))
            .await
            .unwrap();
        let doc = store.get(Collection::Goals, &id).await.unwrap().unwrap();
        assert_eq!(doc.data["title"], "Learn Rust");
        assert!(store.get(Collection::Chats, &id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_merges_shallowly() {
        let store = InMemoryDocumentStore::new();
        store
            .set(Collection::Users, "u1", json!({"name": "A", "title": "Dev"}))
            .await
            .unwrap();
        store
            .update(Collection::Users, "u1", json!({"title": "Lead"}))
            .await
            .unwrap();
        let doc = store.get(Collection::Users, "u1").await.unwrap().unwrap();
        assert_eq!(doc.data["name"], "A");
        assert_eq!(doc.data["title"], "Lead");
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let store = InMemoryDocumentStore::new();
        let err = store
            .update(Collection::Goals, "nope", json!({"x": 1}))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_non_object_rejected() {
        let store = InMemoryDocumentStore::new();
        assert!(matches!(
            store.add(Collection::Chats, json!([1, 2])).await,
            Err(StoreError::NotAnObject("an array"))
        ));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = InMemoryDocumentStore::new();
        store.set(Collection::Goals, "g", json!({})).await.unwrap();
        store.delete(Collection::Goals, "g").await.unwrap();
        store.delete(Collection::Goals, "g").await.unwrap();
        assert!(store.get(Collection::Goals, "g").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_query_filters_orders_and_limits() {
        let store = InMemoryDocumentStore::new();
        for (user, rank) in [("1", 3), ("2", 1), ("1", 1), ("1", 2)] {
            store
                .add(Collection::Progress, json!({"userId": user, "rank": rank}))
                .await
                .unwrap();
        }
        store
            .add(Collection::Progress, json!({"userId": "1"}))
            .await
            .unwrap();

        let query = Query::new()
            .where_eq("userId", "1")
            .order_by("rank", Direction::Descending)
            .limit(2);
        let docs = store.query(Collection::Progress, &query).await.unwrap();
        let ranks: Vec<_> = docs.iter().map(|d| d.data["rank"].clone()).collect();
        assert_eq!(ranks, vec![json!(3), json!(2)]);
    }

    #[test]
    fn test_timestamps_compare_as_instants() {
        let whole = json!("2024-03-05T08:12:00Z");
        let fraction = json!("2024-03-05T08:12:00.500Z");
        assert_eq!(compare_values(&whole, &fraction), Ordering::Less);
    }

    #[tokio::test]
    async fn test_query_empty_collection() {
        let store = InMemoryDocumentStore::new();
        let docs = store.query(Collection::Chats, &Query::new()).await.unwrap();
        assert!(docs.is_empty());
    }
}
