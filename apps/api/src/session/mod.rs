//! Process-wide session state: who is signed in and which theme is active.
//! Both survive restarts through [`LocalStorage`].

pub mod auth;
pub mod handlers;
pub mod storage;
pub mod theme;

use std::sync::Arc;

pub use auth::AuthContext;
pub use storage::LocalStorage;
pub use theme::{ThemeContext, ThemeMode};

pub struct SessionContext {
    pub auth: AuthContext,
    pub theme: ThemeContext,
}

impl SessionContext {
    pub async fn restore(storage: Arc<LocalStorage>) -> Self {
        Self {
            auth: AuthContext::restore(storage.clone()).await,
            theme: ThemeContext::restore(storage).await,
        }
    }
}
