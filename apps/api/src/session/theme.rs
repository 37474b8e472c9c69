use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::session::storage::LocalStorage;

const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

/// Dark/light flag, mirrored to local storage under `theme`.
pub struct ThemeContext {
    storage: Arc<LocalStorage>,
    mode: RwLock<ThemeMode>,
}

impl ThemeContext {
    pub async fn restore(storage: Arc<LocalStorage>) -> Self {
        let mode = match storage.get_item::<ThemeMode>(THEME_KEY).await {
            Ok(mode) => mode.unwrap_or_default(),
            Err(e) => {
                warn!("Ignoring unreadable persisted theme: {e}");
                ThemeMode::default()
            }
        };
        Self {
            storage,
            mode: RwLock::new(mode),
        }
    }

    pub async fn mode(&self) -> ThemeMode {
        *self.mode.read().await
    }

    pub async fn set(&self, mode: ThemeMode) -> Result<ThemeMode, AppError> {
        let mut current = self.mode.write().await;
        self.storage.set_item(THEME_KEY, &mode).await?;
        *current = mode;
        info!("Theme set to {mode:?}");
        Ok(mode)
    }

    pub async fn toggle(&self) -> Result<ThemeMode, AppError> {
        let mut current = self.mode.write().await;
        let next = current.toggled();
        self.storage.set_item(THEME_KEY, &next).await?;
        *current = next;
        info!("Theme toggled to {next:?}");
        Ok(next)
    }
}
