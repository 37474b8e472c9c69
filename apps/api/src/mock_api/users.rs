use tracing::info;

use crate::errors::AppError;
use crate::mock_api::{find_user, require_non_empty, MockApi};
use crate::models::{User, UserPatch};

impl MockApi {
    pub async fn get_user(&self, user_id: &str) -> Result<User, AppError> {
        self.network
            .simulate(&format!("GET /users/{user_id}"))
            .await?;
        let tables = self.tables.read().await;
        find_user(&tables.users, user_id).cloned()
    }

    /// Case-insensitive email lookup, used by the login flow.
    pub async fn find_user_by_email(&self, email: &str) -> Result<User, AppError> {
        self.network.simulate("GET /users?email").await?;
        let tables = self.tables.read().await;
        tables
            .users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email.trim()))
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("No user with email {email}")))
    }

    pub async fn update_user(&self, user_id: &str, patch: UserPatch) -> Result<User, AppError> {
        if let Some(name) = &patch.name {
            require_non_empty("name", name)?;
        }
        if let Some(email) = &patch.email {
            require_non_empty("email", email)?;
        }
        self.network
            .simulate(&format!("PUT /users/{user_id}"))
            .await?;

        let mut tables = self.tables.write().await;
        let user = tables
            .users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))?;
        patch.apply(user);
        info!("Updated profile for user {user_id}");
        Ok(user.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_api::test_support::instant_api;

    #[tokio::test]
    async fn test_get_seed_user() {
        let user = instant_api().get_user("1").await.unwrap();
        assert_eq!(user.total_points, 1250);
        assert_eq!(user.level, 3);
    }

    #[tokio::test]
    async fn test_email_lookup_ignores_case() {
        let user = instant_api()
            .find_user_by_email("Alex.Rivera@Example.com")
            .await
            .unwrap();
        assert_eq!(user.id, "1");
    }

    #[tokio::test]
    async fn test_patch_leaves_points_alone() {
        let api = instant_api();
        let user = api
            .update_user(
                "1",
                UserPatch {
                    title: Some("Staff Engineer".to_string()),
                    skills: Some(vec!["Rust".to_string()]),
                    ..UserPatch::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(user.title, "Staff Engineer");
        assert_eq!(user.skills, vec!["Rust"]);
        assert_eq!(user.total_points, 1250);
        assert_eq!(api.get_user("1").await.unwrap().title, "Staff Engineer");
    }

    #[tokio::test]
    async fn test_blank_name_rejected() {
        let err = instant_api()
            .update_user(
                "1",
                UserPatch {
                    name: Some(String::new()),
                    ..UserPatch::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
