//! Axum route handlers for the session (auth + theme) context.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::User;
use crate::session::ThemeMode;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user: Option<User>,
    pub theme: ThemeMode,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ThemeBody {
    pub mode: ThemeMode,
}

/// GET /api/v1/session
pub async fn handle_get_session(State(state): State<AppState>) -> Json<SessionResponse> {
    Json(SessionResponse {
        user: state.session.auth.current_user().await,
        theme: state.session.theme.mode().await,
    })
}

/// GET /api/v1/session/me
pub async fn handle_me(State(state): State<AppState>) -> Result<Json<User>, AppError> {
    state
        .session
        .auth
        .current_user()
        .await
        .map(Json)
        .ok_or(AppError::Unauthorized)
}

/// POST /api/v1/session/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<User>, AppError> {
    Ok(Json(state.session.auth.login(&state.api, &req.email).await?))
}

/// POST /api/v1/session/logout
pub async fn handle_logout(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.session.auth.logout().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/preferences/theme
pub async fn handle_set_theme(
    State(state): State<AppState>,
    Json(body): Json<ThemeBody>,
) -> Result<Json<ThemeBody>, AppError> {
    let mode = state.session.theme.set(body.mode).await?;
    Ok(Json(ThemeBody { mode }))
}

/// POST /api/v1/preferences/theme/toggle
pub async fn handle_toggle_theme(
    State(state): State<AppState>,
) -> Result<Json<ThemeBody>, AppError> {
    let mode = state.session.theme.toggle().await?;
    Ok(Json(ThemeBody { mode }))
}
