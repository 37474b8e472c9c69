use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::mock_api::MockApi;
use crate::models::User;
use crate::session::storage::LocalStorage;

const USER_KEY: &str = "user";

/// Current signed-in user, mirrored to local storage under `user`.
/// There is no password check: any seeded email signs in.
pub struct AuthContext {
    storage: Arc<LocalStorage>,
    current: RwLock<Option<User>>,
}

impl AuthContext {
    /// Restores the persisted user, if any. A corrupt entry is dropped.
    pub async fn restore(storage: Arc<LocalStorage>) -> Self {
        let current = match storage.get_item::<User>(USER_KEY).await {
            Ok(user) => user,
            Err(e) => {
                warn!("Ignoring unreadable persisted user: {e}");
                None
            }
        };
        if let Some(user) = &current {
            info!("Restored session for user {}", user.id);
        }
        Self {
            storage,
            current: RwLock::new(current),
        }
    }

    pub async fn current_user(&self) -> Option<User> {
        self.current.read().await.clone()
    }

    pub async fn login(&self, api: &MockApi, email: &str) -> Result<User, AppError> {
        if email.trim().is_empty() {
            return Err(AppError::Validation("email cannot be empty".to_string()));
        }
        let user = match api.find_user_by_email(email).await {
            Ok(user) => user,
            Err(AppError::NotFound(_)) => return Err(AppError::Unauthorized),
            Err(e) => return Err(e),
        };
        let mut current = self.current.write().await;
        self.storage.set_item(USER_KEY, &user).await?;
        *current = Some(user.clone());
        info!("User {} signed in", user.id);
        Ok(user)
    }

    pub async fn logout(&self) -> Result<(), AppError> {
        let mut current = self.current.write().await;
        self.storage.remove_item(USER_KEY).await?;
        if let Some(user) = current.take() {
            info!("User {} signed out", user.id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_api::test_support::instant_api;

    async fn storage(dir: &tempfile::TempDir) -> Arc<LocalStorage> {
        Arc::new(
            LocalStorage::open(dir.path().join("storage.json"))
                .await
                .unwrap(),
        )
    }

    #[tokio::test]
    async fn test_login_persists_and_restores() {
        let dir = tempfile::tempdir().unwrap();
        let api = instant_api();

        let auth = AuthContext::restore(storage(&dir).await).await;
        assert!(auth.current_user().await.is_none());
        let user = auth.login(&api, "alex.rivera@example.com").await.unwrap();
        assert_eq!(user.id, "1");

        let restored = AuthContext::restore(storage(&dir).await).await;
        assert_eq!(restored.current_user().await.map(|u| u.id), Some("1".to_string()));
    }

    #[tokio::test]
    async fn test_unknown_email_is_unauthorized() {
        let dir = tempfile::tempdir().unwrap();
        let auth = AuthContext::restore(storage(&dir).await).await;
        let err = auth
            .login(&instant_api(), "nobody@example.com")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));
        assert!(auth.current_user().await.is_none());
    }

    #[tokio::test]
    async fn test_logout_clears_persisted_user() {
        let dir = tempfile::tempdir().unwrap();
        let auth = AuthContext::restore(storage(&dir).await).await;
        auth.login(&instant_api(), "sam.okafor@example.com")
            .await
            .unwrap();
        auth.logout().await.unwrap();
        assert!(auth.current_user().await.is_none());

        let restored = AuthContext::restore(storage(&dir).await).await;
        assert!(restored.current_user().await.is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_login_logout_keeps_storage_in_step() {
        let dir = tempfile::tempdir().unwrap();
        let api = Arc::new(instant_api());
        let auth = Arc::new(AuthContext::restore(storage(&dir).await).await);

        for _ in 0..25 {
            let login = {
                let (auth, api) = (auth.clone(), api.clone());
                tokio::spawn(async move {
                    auth.login(&api, "alex.rivera@example.com").await.unwrap();
                })
            };
            let logout = {
                let auth = auth.clone();
                tokio::spawn(async move { auth.logout().await.unwrap() })
            };
            login.await.unwrap();
            logout.await.unwrap();

            let in_memory = auth.current_user().await.map(|u| u.id);
            let on_disk = AuthContext::restore(storage(&dir).await)
                .await
                .current_user()
                .await
                .map(|u| u.id);
            assert_eq!(in_memory, on_disk);
        }
    }
}
