//! `users` collection: free-form profile documents keyed by user id.

use chrono::Utc;
use serde_json::{json, Value};

use crate::collections::{Collection, DocumentStore, StoreError, StoredDocument};

pub async fn get_user_profile(
    store: &dyn DocumentStore,
    user_id: &str,
) -> Result<Option<StoredDocument>, StoreError> {
    store.get(Collection::Users, user_id).await
}

/// Creates or replaces the profile, stamping `createdAt`/`updatedAt`.
pub async fn save_user_profile(
    store: &dyn DocumentStore,
    user_id: &str,
    profile: Value,
) -> Result<StoredDocument, StoreError> {
    let Value::Object(mut fields) = profile else {
        return Err(StoreError::NotAnObject("a non-object profile"));
    };
    let now = json!(Utc::now());
    fields.entry("createdAt").or_insert_with(|| now.clone());
    fields.insert("updatedAt".to_string(), now);
    store
        .set(Collection::Users, user_id, Value::Object(fields.clone()))
        .await?;
    Ok(StoredDocument {
        id: user_id.to_string(),
        data: fields,
    })
}

pub async fn update_user_profile(
    store: &dyn DocumentStore,
    user_id: &str,
    changes: Value,
) -> Result<StoredDocument, StoreError> {
    let Value::Object(mut fields) = changes else {
        return Err(StoreError::NotAnObject("a non-object update"));
    };
    fields.insert("updatedAt".to_string(), json!(Utc::now()));
    store
        .update(Collection::Users, user_id, Value::Object(fields))
        .await?;
    store
        .get(Collection::Users, user_id)
        .await?
        .ok_or_else(|| StoreError::NotFound {
            collection: Collection::Users.to_string(),
            id: user_id.to_string(),
        })
}
