//! Axum route handlers for the mock API tables.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::mock_api::ApiEnvelope;
use crate::models::{
    Achievement, AchievementPatch, Category, Document, DocumentPatch, InterviewQuestion,
    NewAchievement, NewDocument, NewNotification, NewStory, Notification, Story, User, UserPatch,
};
use crate::state::AppState;
use crate::stats::DashboardStats;

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    #[serde(alias = "userId")]
    pub user_id: String,
}

#[derive(Debug, Deserialize)]
pub struct CategoryQuery {
    pub category: Option<Category>,
}

/// POST /api/v1/call/*endpoint
///
/// Echoes the body back in `{success, data}` after the simulated round-trip.
pub async fn handle_api_call(
    State(state): State<AppState>,
    Path(endpoint): Path<String>,
    Json(options): Json<Value>,
) -> Result<Json<ApiEnvelope<Value>>, AppError> {
    let envelope = state.api.api_call(&format!("/{endpoint}"), options).await?;
    Ok(Json(envelope))
}

/// GET /api/v1/users/:id
pub async fn handle_get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<User>, AppError> {
    Ok(Json(state.api.get_user(&id).await?))
}

/// PATCH /api/v1/users/:id
pub async fn handle_update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<UserPatch>,
) -> Result<Json<User>, AppError> {
    Ok(Json(state.api.update_user(&id, patch).await?))
}

/// GET /api/v1/achievements?user_id=
pub async fn handle_list_achievements(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<Achievement>>, AppError> {
    Ok(Json(state.api.get_achievements(&params.user_id).await?))
}

/// POST /api/v1/achievements
pub async fn handle_create_achievement(
    State(state): State<AppState>,
    Json(new): Json<NewAchievement>,
) -> Result<(StatusCode, Json<Achievement>), AppError> {
    let achievement = state.api.create_achievement(new).await?;
    Ok((StatusCode::CREATED, Json(achievement)))
}

/// GET /api/v1/achievements/:id
pub async fn handle_get_achievement(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Achievement>, AppError> {
    Ok(Json(state.api.get_achievement(&id).await?))
}

/// PATCH /api/v1/achievements/:id
pub async fn handle_update_achievement(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<AchievementPatch>,
) -> Result<Json<Achievement>, AppError> {
    Ok(Json(state.api.update_achievement(&id, patch).await?))
}

/// DELETE /api/v1/achievements/:id
pub async fn handle_delete_achievement(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.api.delete_achievement(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/achievements/:id/like
pub async fn handle_like_achievement(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Achievement>, AppError> {
    Ok(Json(state.api.like_achievement(&id).await?))
}

/// GET /api/v1/documents?user_id=
pub async fn handle_list_documents(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<Document>>, AppError> {
    Ok(Json(state.api.get_documents(&params.user_id).await?))
}

/// POST /api/v1/documents
pub async fn handle_create_document(
    State(state): State<AppState>,
    Json(new): Json<NewDocument>,
) -> Result<(StatusCode, Json<Document>), AppError> {
    let document = state.api.create_document(new).await?;
    Ok((StatusCode::CREATED, Json(document)))
}

/// GET /api/v1/documents/:id
pub async fn handle_get_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Document>, AppError> {
    Ok(Json(state.api.get_document(&id).await?))
}

/// PATCH /api/v1/documents/:id
pub async fn handle_update_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<DocumentPatch>,
) -> Result<Json<Document>, AppError> {
    Ok(Json(state.api.update_document(&id, patch).await?))
}

/// DELETE /api/v1/documents/:id
pub async fn handle_delete_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.api.delete_document(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/documents/:id/download
pub async fn handle_download_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Document>, AppError> {
    Ok(Json(state.api.record_download(&id).await?))
}

/// GET /api/v1/stories?user_id=
pub async fn handle_list_stories(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<Story>>, AppError> {
    Ok(Json(state.api.get_stories(&params.user_id).await?))
}

/// POST /api/v1/stories
pub async fn handle_create_story(
    State(state): State<AppState>,
    Json(new): Json<NewStory>,
) -> Result<(StatusCode, Json<Story>), AppError> {
    let story = state.api.create_story(new).await?;
    Ok((StatusCode::CREATED, Json(story)))
}

/// GET /api/v1/interview-questions?category=
pub async fn handle_list_questions(
    State(state): State<AppState>,
    Query(params): Query<CategoryQuery>,
) -> Result<Json<Vec<InterviewQuestion>>, AppError> {
    Ok(Json(state.api.get_interview_questions(params.category).await?))
}

/// GET /api/v1/notifications?user_id=
pub async fn handle_list_notifications(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<Notification>>, AppError> {
    Ok(Json(state.api.get_notifications(&params.user_id).await?))
}

/// POST /api/v1/notifications
pub async fn handle_create_notification(
    State(state): State<AppState>,
    Json(new): Json<NewNotification>,
) -> Result<(StatusCode, Json<Notification>), AppError> {
    let notification = state.api.create_notification(new).await?;
    Ok((StatusCode::CREATED, Json(notification)))
}

/// POST /api/v1/notifications/:id/read
pub async fn handle_mark_notification_read(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Notification>, AppError> {
    Ok(Json(state.api.mark_notification_read(&id).await?))
}

/// GET /api/v1/dashboard/:user_id
pub async fn handle_dashboard(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<DashboardStats>, AppError> {
    Ok(Json(state.api.get_dashboard_stats(&user_id).await?))
}
