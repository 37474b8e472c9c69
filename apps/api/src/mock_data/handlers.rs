//! Axum route handlers for the read-only fixture API under `/api/v1/mocked`.

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::errors::AppError;
use crate::mock_api::handlers::UserIdQuery;
use crate::models::{Achievement, Document, InterviewQuestion, Notification, Story, User};
use crate::state::AppState;
use crate::stats::{DashboardStats, LevelProgress};

/// GET /api/v1/mocked/users/:id
pub async fn handle_get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<User>, AppError> {
    Ok(Json(state.data.get_user(&id).await?))
}

/// GET /api/v1/mocked/achievements?user_id=
pub async fn handle_list_achievements(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<Achievement>>, AppError> {
    Ok(Json(state.data.get_achievements(&params.user_id).await?))
}

/// GET /api/v1/mocked/documents?user_id=
pub async fn handle_list_documents(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<Document>>, AppError> {
    Ok(Json(state.data.get_documents(&params.user_id).await?))
}

/// GET /api/v1/mocked/stories?user_id=
pub async fn handle_list_stories(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<Story>>, AppError> {
    Ok(Json(state.data.get_stories(&params.user_id).await?))
}

/// GET /api/v1/mocked/interview-questions
pub async fn handle_list_questions(
    State(state): State<AppState>,
) -> Result<Json<Vec<InterviewQuestion>>, AppError> {
    Ok(Json(state.data.get_interview_questions().await?))
}

/// GET /api/v1/mocked/notifications?user_id=
pub async fn handle_list_notifications(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<Notification>>, AppError> {
    Ok(Json(state.data.get_notifications(&params.user_id).await?))
}

/// GET /api/v1/mocked/dashboard/:user_id
pub async fn handle_dashboard(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<DashboardStats>, AppError> {
    Ok(Json(state.data.get_dashboard_stats(&user_id).await?))
}

/// GET /api/v1/mocked/progress/:user_id
pub async fn handle_level_progress(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<LevelProgress>, AppError> {
    Ok(Json(state.data.get_level_progress(&user_id).await?))
}
