use chrono::Utc;
use tracing::info;

use crate::errors::AppError;
use crate::mock_api::{new_id, require_non_empty, MockApi};
use crate::models::{Document, DocumentPatch, NewDocument};

impl MockApi {
    pub async fn get_documents(&self, user_id: &str) -> Result<Vec<Document>, AppError> {
        self.network
            .simulate(&format!("GET /documents?userId={user_id}"))
            .await?;
        let tables = self.tables.read().await;
        let mut owned: Vec<Document> = tables
            .documents
            .iter()
            .filter(|d| d.user_id == user_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }

    pub async fn get_document(&self, id: &str) -> Result<Document, AppError> {
        self.network.simulate(&format!("GET /documents/{id}")).await?;
        let tables = self.tables.read().await;
        tables
            .documents
            .iter()
            .find(|d| d.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Document {id} not found")))
    }

    pub async fn create_document(&self, new: NewDocument) -> Result<Document, AppError> {
        require_non_empty("template", &new.template)?;
        self.network.simulate("POST /documents").await?;

        let mut tables = self.tables.write().await;
        if !tables.users.iter().any(|u| u.id == new.user_id) {
            return Err(AppError::NotFound(format!("User {} not found", new.user_id)));
        }
        let document = new.into_document(new_id(), Utc::now());
        tables.documents.push(document.clone());
        info!(
            "Created {:?} document {} for user {}",
            document.kind, document.id, document.user_id
        );
        Ok(document)
    }

    pub async fn update_document(
        &self,
        id: &str,
        patch: DocumentPatch,
    ) -> Result<Document, AppError> {
        if let Some(rating) = patch.rating {
            if !(0.0..=5.0).contains(&rating) {
                return Err(AppError::Validation(format!(
                    "rating must be between 0 and 5, got {rating}"
                )));
            }
        }
        self.network.simulate(&format!("PUT /documents/{id}")).await?;
        let mut tables = self.tables.write().await;
        let document = tables
            .documents
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Document {id} not found")))?;
        patch.apply(document);
        Ok(document.clone())
    }

    pub async fn delete_document(&self, id: &str) -> Result<Document, AppError> {
        self.network
            .simulate(&format!("DELETE /documents/{id}"))
            .await?;
        let mut tables = self.tables.write().await;
        let index = tables
            .documents
            .iter()
            .position(|d| d.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Document {id} not found")))?;
        let removed = tables.documents.remove(index);
        info!("Deleted document {id}");
        Ok(removed)
    }

    pub async fn record_download(&self, id: &str) -> Result<Document, AppError> {
        self.network
            .simulate(&format!("POST /documents/{id}/download"))
            .await?;
        let mut tables = self.tables.write().await;
        let document = tables
            .documents
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Document {id} not found")))?;
        document.downloads += 1;
        Ok(document.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_api::test_support::instant_api;
    use crate::models::document::{DocumentContent, DocumentKind};

    fn cover_letter(user_id: &str) -> NewDocument {
        NewDocument {
            user_id: user_id.to_string(),
            kind: DocumentKind::CoverLetter,
            template: "classic".to_string(),
            content: DocumentContent::Text("Dear team,".to_string()),
            based_on_achievements: 1,
        }
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let api = instant_api();
        let created = api.create_document(cover_letter("1")).await.unwrap();
        let docs = api.get_documents("1").await.unwrap();
        assert_eq!(docs.len(), 3);
        assert_eq!(docs[0].id, created.id);
        assert!(docs.iter().all(|d| d.user_id == "1"));
    }

    #[tokio::test]
    async fn test_create_for_unknown_user() {
        assert!(matches!(
            instant_api().create_document(cover_letter("ghost")).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_download_counter_and_dashboard_agree() {
        let api = instant_api();
        api.record_download("1").await.unwrap();
        let stats = api.get_dashboard_stats("1").await.unwrap();
        let docs = api.get_documents("1").await.unwrap();
        assert_eq!(
            stats.total_downloads,
            docs.iter().map(|d| u64::from(d.downloads)).sum::<u64>()
        );
        assert_eq!(stats.total_downloads, 10);
    }

    #[tokio::test]
    async fn test_rating_out_of_range() {
        let err = instant_api()
            .update_document(
                "1",
                DocumentPatch {
                    rating: Some(9.0),
                    ..DocumentPatch::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_delete_removes_from_dashboard() {
        let api = instant_api();
        api.delete_document("2").await.unwrap();
        let stats = api.get_dashboard_stats("1").await.unwrap();
        assert_eq!(stats.documents_created, 1);
        assert_eq!(stats.cover_letters, 0);
    }
}
