//! `documents` collection: persisted resumes and cover letters.

use chrono::Utc;

use crate::collections::{decode_all, to_fields, Collection, Direction, DocumentStore, Query, StoreError};
use crate::models::{Document, NewDocument};

pub async fn save_document(
    store: &dyn DocumentStore,
    new: NewDocument,
) -> Result<Document, StoreError> {
    let mut document = new.into_document(String::new(), Utc::now());
    document.id = store.add(Collection::Documents, to_fields(&document)?).await?;
    Ok(document)
}

/// Documents for `user_id`, newest first.
pub async fn get_user_documents(
    store: &dyn DocumentStore,
    user_id: &str,
) -> Result<Vec<Document>, StoreError> {
    let query = Query::new()
        .where_eq("userId", user_id)
        .order_by("createdAt", Direction::Descending);
    decode_all(store.query(Collection::Documents, &query).await?)
}

pub async fn delete_document(store: &dyn DocumentStore, id: &str) -> Result<(), StoreError> {
    store.delete(Collection::Documents, id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::InMemoryDocumentStore;
    use crate::models::document::{DocumentContent, DocumentKind};
    use serde_json::json;

    #[tokio::test]
    async fn test_structured_content_survives_storage() {
        let store = InMemoryDocumentStore::new();
        let content = DocumentContent::Structured(
            json!({"summary": "Engineer", "skills": ["Rust"]})
                .as_object()
                .cloned()
                .unwrap(),
        );
        let saved = save_document(
            &store,
            NewDocument {
                user_id: "1".to_string(),
                kind: DocumentKind::Resume,
                template: "modern".to_string(),
                content: content.clone(),
                based_on_achievements: 3,
            },
        )
        .await
        .unwrap();

        let docs = get_user_documents(&store, "1").await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, saved.id);
        assert_eq!(docs[0].content, content);

        delete_document(&store, &saved.id).await.unwrap();
        assert!(get_user_documents(&store, "1").await.unwrap().is_empty());
    }
}
