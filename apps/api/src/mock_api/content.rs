//! Stories, interview questions and notifications.
//!
//! Questions are read-only. Stories and notifications are append-only; the
//! only in-place change is flipping a notification's `read` flag.

use chrono::Utc;

use crate::errors::AppError;
use crate::mock_api::{new_id, require_non_empty, MockApi};
use crate::models::{
    Category, InterviewQuestion, NewNotification, NewStory, Notification, Story,
};

impl MockApi {
    pub async fn get_stories(&self, user_id: &str) -> Result<Vec<Story>, AppError> {
        self.network
            .simulate(&format!("GET /stories?userId={user_id}"))
            .await?;
        let tables = self.tables.read().await;
        Ok(tables
            .stories
            .iter()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect())
    }

    pub async fn create_story(&self, new: NewStory) -> Result<Story, AppError> {
        require_non_empty("title", &new.title)?;
        self.network.simulate("POST /stories").await?;
        let story = new.into_story(new_id(), Utc::now());
        self.tables.write().await.stories.push(story.clone());
        Ok(story)
    }

    /// All questions, or only those in `category`.
    pub async fn get_interview_questions(
        &self,
        category: Option<Category>,
    ) -> Result<Vec<InterviewQuestion>, AppError> {
        self.network.simulate("GET /interview-questions").await?;
        let tables = self.tables.read().await;
        Ok(tables
            .interview_questions
            .iter()
            .filter(|q| category.map_or(true, |c| q.category == c))
            .cloned()
            .collect())
    }

    /// Notifications for `user_id`, newest first.
    pub async fn get_notifications(&self, user_id: &str) -> Result<Vec<Notification>, AppError> {
        self.network
            .simulate(&format!("GET /notifications?userId={user_id}"))
            .await?;
        let tables = self.tables.read().await;
        let mut owned: Vec<Notification> = tables
            .notifications
            .iter()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }

    pub async fn create_notification(
        &self,
        new: NewNotification,
    ) -> Result<Notification, AppError> {
        require_non_empty("title", &new.title)?;
        self.network.simulate("POST /notifications").await?;
        let notification = new.into_notification(new_id(), Utc::now());
        self.tables
            .write()
            .await
            .notifications
            .push(notification.clone());
        Ok(notification)
    }

    pub async fn mark_notification_read(&self, id: &str) -> Result<Notification, AppError> {
        self.network
            .simulate(&format!("PUT /notifications/{id}/read"))
            .await?;
        let mut tables = self.tables.write().await;
        let notification = tables
            .notifications
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Notification {id} not found")))?;
        notification.read = true;
        Ok(notification.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_api::test_support::instant_api;
    use crate::models::content::NotificationKind;

    #[tokio::test]
    async fn test_questions_filter_by_category() {
        let api = instant_api();
        let all = api.get_interview_questions(None).await.unwrap();
        let technical = api
            .get_interview_questions(Some(Category::Technical))
            .await
            .unwrap();
        assert!(technical.len() < all.len());
        assert!(technical.iter().all(|q| q.category == Category::Technical));
    }

    #[tokio::test]
    async fn test_story_append() {
        let api = instant_api();
        let story = api
            .create_story(NewStory {
                user_id: "2".to_string(),
                title: "Design crit turnaround".to_string(),
                situation: "Crits ran long".to_string(),
                task: "Shorten them".to_string(),
                action: "Introduced a written pre-read".to_string(),
                result: "Crits dropped to 30 minutes".to_string(),
                tags: vec![],
                achievement_id: None,
            })
            .await
            .unwrap();
        let stories = api.get_stories("2").await.unwrap();
        assert_eq!(stories.len(), 2);
        assert_eq!(stories.last().map(|s| &s.id), Some(&story.id));
    }

    #[tokio::test]
    async fn test_notification_lifecycle() {
        let api = instant_api();
        let created = api
            .create_notification(NewNotification {
                user_id: "1".to_string(),
                kind: NotificationKind::Achievement,
                title: "Achievement logged".to_string(),
                message: "+50 points".to_string(),
            })
            .await
            .unwrap();
        assert!(!created.read);

        let listed = api.get_notifications("1").await.unwrap();
        assert_eq!(listed[0].id, created.id);

        let read = api.mark_notification_read(&created.id).await.unwrap();
        assert!(read.read);
    }

    #[tokio::test]
    async fn test_mark_unknown_notification() {
        assert!(matches!(
            instant_api().mark_notification_read("nope").await,
            Err(AppError::NotFound(_))
        ));
    }
}
