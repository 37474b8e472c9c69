use chrono::Utc;
use tracing::info;

use crate::errors::AppError;
use crate::mock_api::network::NetworkSimulator;
use crate::mock_data::fixtures::{FixtureFile, FixtureSource};
use crate::models::{Achievement, Document, InterviewQuestion, Notification, Story, User};
use crate::stats::{compute_dashboard_stats, level_progress, DashboardStats, LevelProgress};

/// Serves the fixtures as if they were a remote read-only API.
pub struct MockDataService {
    source: FixtureSource,
    network: NetworkSimulator,
}

impl MockDataService {
    pub fn new(source: FixtureSource, network: NetworkSimulator) -> Self {
        info!("Mock data service reading fixtures from {source:?}");
        Self { source, network }
    }

    async fn fetch<T: serde::de::DeserializeOwned>(
        &self,
        file: FixtureFile,
    ) -> Result<Vec<T>, AppError> {
        self.network
            .simulate(&format!("GET /mocked/{}", file.file_name()))
            .await?;
        self.source.read(file).await
    }

    pub async fn get_user(&self, user_id: &str) -> Result<User, AppError> {
        self.fetch::<User>(FixtureFile::Users)
            .await?
            .into_iter()
            .find(|u| u.id == user_id)
            .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))
    }

    pub async fn get_achievements(&self, user_id: &str) -> Result<Vec<Achievement>, AppError> {
        let mut achievements: Vec<Achievement> = self
            .fetch::<Achievement>(FixtureFile::Achievements)
            .await?
            .into_iter()
            .filter(|a| a.user_id == user_id)
            .collect();
        achievements.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(achievements)
    }

    pub async fn get_documents(&self, user_id: &str) -> Result<Vec<Document>, AppError> {
        Ok(self
            .fetch::<Document>(FixtureFile::Documents)
            .await?
            .into_iter()
            .filter(|d| d.user_id == user_id)
            .collect())
    }

    pub async fn get_stories(&self, user_id: &str) -> Result<Vec<Story>, AppError> {
        Ok(self
            .fetch::<Story>(FixtureFile::Stories)
            .await?
            .into_iter()
            .filter(|s| s.user_id == user_id)
            .collect())
    }

    pub async fn get_interview_questions(&self) -> Result<Vec<InterviewQuestion>, AppError> {
        self.fetch(FixtureFile::InterviewQuestions).await
    }

    pub async fn get_notifications(&self, user_id: &str) -> Result<Vec<Notification>, AppError> {
        Ok(self
            .fetch::<Notification>(FixtureFile::Notifications)
            .await?
            .into_iter()
            .filter(|n| n.user_id == user_id)
            .collect())
    }

    /// One simulated round trip; the three fixtures are read behind it.
    pub async fn get_dashboard_stats(&self, user_id: &str) -> Result<DashboardStats, AppError> {
        self.network
            .simulate(&format!("GET /mocked/dashboard/{user_id}"))
            .await?;
        let user = self
            .source
            .read::<User>(FixtureFile::Users)
            .await?
            .into_iter()
            .find(|u| u.id == user_id)
            .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))?;
        let achievements = self
            .source
            .read::<Achievement>(FixtureFile::Achievements)
            .await?;
        let documents = self.source.read::<Document>(FixtureFile::Documents).await?;
        Ok(compute_dashboard_stats(
            &user,
            &achievements,
            &documents,
            Utc::now().date_naive(),
        ))
    }

    pub async fn get_level_progress(&self, user_id: &str) -> Result<LevelProgress, AppError> {
        let user = self.get_user(user_id).await?;
        Ok(level_progress(user.total_points))
    }
}
