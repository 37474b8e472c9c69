//! In-memory stand-in for the REST backend.
//!
//! Tables are plain vectors scanned linearly; they only ever hold a handful
//! of seed rows plus whatever a session appends. Each operation first passes
//! through the [`NetworkSimulator`], so callers see latency and occasional
//! `Network error` failures exactly as they would from a remote API.

pub mod achievements;
pub mod content;
pub mod documents;
pub mod handlers;
pub mod network;
pub mod users;

use chrono::Utc;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::mock_data::Fixtures;
use crate::models::{Achievement, Document, InterviewQuestion, Notification, Story, User};
use crate::stats::{compute_dashboard_stats, DashboardStats};

pub use network::{ApiEnvelope, NetworkProfile, NetworkSimulator};

#[derive(Debug, Default)]
pub(crate) struct Tables {
    pub users: Vec<User>,
    pub achievements: Vec<Achievement>,
    pub documents: Vec<Document>,
    pub stories: Vec<Story>,
    pub interview_questions: Vec<InterviewQuestion>,
    pub notifications: Vec<Notification>,
}

impl From<Fixtures> for Tables {
    fn from(fixtures: Fixtures) -> Self {
        Self {
            users: fixtures.users,
            achievements: fixtures.achievements,
            documents: fixtures.documents,
            stories: fixtures.stories,
            interview_questions: fixtures.interview_questions,
            notifications: fixtures.notifications,
        }
    }
}

pub struct MockApi {
    network: NetworkSimulator,
    tables: RwLock<Tables>,
}

impl MockApi {
    pub fn new(seed: Fixtures, network: NetworkSimulator) -> Self {
        let tables = Tables::from(seed);
        info!(
            "Mock API seeded: {} users, {} achievements, {} documents",
            tables.users.len(),
            tables.achievements.len(),
            tables.documents.len()
        );
        Self {
            network,
            tables: RwLock::new(tables),
        }
    }

    /// Generic round-trip: waits, maybe fails, otherwise echoes `options`.
    pub async fn api_call(
        &self,
        endpoint: &str,
        options: Value,
    ) -> Result<ApiEnvelope<Value>, AppError> {
        self.network.simulate(endpoint).await?;
        Ok(ApiEnvelope::ok(options))
    }

    pub async fn get_dashboard_stats(&self, user_id: &str) -> Result<DashboardStats, AppError> {
        self.network
            .simulate(&format!("GET /dashboard/{user_id}"))
            .await?;
        let tables = self.tables.read().await;
        let user = find_user(&tables.users, user_id)?;
        Ok(compute_dashboard_stats(
            user,
            &tables.achievements,
            &tables.documents,
            Utc::now().date_naive(),
        ))
    }
}

pub(crate) fn new_id() -> String {
    Uuid::new_v4().to_string()
}

pub(crate) fn find_user<'a>(users: &'a [User], user_id: &str) -> Result<&'a User, AppError> {
    users
        .iter()
        .find(|u| u.id == user_id)
        .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))
}

pub(crate) fn require_non_empty(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Seeded from the embedded fixtures with an instant, never-failing network.
    pub fn instant_api() -> MockApi {
        MockApi::new(
            Fixtures::embedded().expect("embedded fixtures parse"),
            NetworkSimulator::new(NetworkProfile::instant()),
        )
    }
}
