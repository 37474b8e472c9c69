//! Axum route handlers for the document-store collections.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::collections::goals::{self, GoalChanges};
use crate::collections::progress::{self, NewProgress};
use crate::collections::{chats, profiles, saved_documents, StoredDocument};
use crate::errors::AppError;
use crate::mock_api::handlers::UserIdQuery;
use crate::models::{ChatMessage, ChatRole, Document, Goal, NewDocument, NewGoal, ProgressEntry};
use crate::state::AppState;

const DEFAULT_CHAT_HISTORY: usize = 50;

#[derive(Debug, Deserialize)]
pub struct ProgressQuery {
    #[serde(alias = "userId")]
    pub user_id: String,
    #[serde(alias = "goalId")]
    pub goal_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct NewChatMessage {
    pub role: ChatRole,
    pub content: String,
}

/// GET /api/v1/profiles/:user_id
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<StoredDocument>, AppError> {
    profiles::get_user_profile(state.store.as_ref(), &user_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Profile {user_id} not found")))
}

/// PUT /api/v1/profiles/:user_id
pub async fn handle_save_profile(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(profile): Json<Value>,
) -> Result<Json<StoredDocument>, AppError> {
    Ok(Json(
        profiles::save_user_profile(state.store.as_ref(), &user_id, profile).await?,
    ))
}

/// PATCH /api/v1/profiles/:user_id
pub async fn handle_update_profile(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(changes): Json<Value>,
) -> Result<Json<StoredDocument>, AppError> {
    Ok(Json(
        profiles::update_user_profile(state.store.as_ref(), &user_id, changes).await?,
    ))
}

/// GET /api/v1/goals?user_id=
pub async fn handle_list_goals(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<Goal>>, AppError> {
    Ok(Json(
        goals::get_user_goals(state.store.as_ref(), &params.user_id).await?,
    ))
}

/// POST /api/v1/goals
pub async fn handle_add_goal(
    State(state): State<AppState>,
    Json(new): Json<NewGoal>,
) -> Result<(StatusCode, Json<Goal>), AppError> {
    if new.title.trim().is_empty() {
        return Err(AppError::Validation("title cannot be empty".to_string()));
    }
    let goal = goals::add_goal(state.store.as_ref(), new).await?;
    Ok((StatusCode::CREATED, Json(goal)))
}

/// PATCH /api/v1/goals/:id
pub async fn handle_update_goal(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(changes): Json<GoalChanges>,
) -> Result<Json<Goal>, AppError> {
    if changes.progress.is_some_and(|p| p > 100) {
        return Err(AppError::Validation(
            "progress must be between 0 and 100".to_string(),
        ));
    }
    Ok(Json(
        goals::update_goal(state.store.as_ref(), &id, changes).await?,
    ))
}

/// DELETE /api/v1/goals/:id
pub async fn handle_delete_goal(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    goals::delete_goal(state.store.as_ref(), &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/progress?user_id=&goal_id=
pub async fn handle_list_progress(
    State(state): State<AppState>,
    Query(params): Query<ProgressQuery>,
) -> Result<Json<Vec<ProgressEntry>>, AppError> {
    Ok(Json(
        progress::get_user_progress(
            state.store.as_ref(),
            &params.user_id,
            params.goal_id.as_deref(),
        )
        .await?,
    ))
}

/// POST /api/v1/progress
pub async fn handle_record_progress(
    State(state): State<AppState>,
    Json(new): Json<NewProgress>,
) -> Result<(StatusCode, Json<ProgressEntry>), AppError> {
    let entry = progress::record_progress(state.store.as_ref(), new).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// GET /api/v1/chats/:user_id?limit=
pub async fn handle_chat_history(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(params): Query<HistoryQuery>,
) -> Result<Json<Vec<ChatMessage>>, AppError> {
    let limit = params.limit.unwrap_or(DEFAULT_CHAT_HISTORY);
    Ok(Json(
        chats::get_chat_history(state.store.as_ref(), &user_id, limit).await?,
    ))
}

/// POST /api/v1/chats/:user_id
pub async fn handle_save_chat_message(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(message): Json<NewChatMessage>,
) -> Result<(StatusCode, Json<ChatMessage>), AppError> {
    if message.content.trim().is_empty() {
        return Err(AppError::Validation("content cannot be empty".to_string()));
    }
    let saved =
        chats::save_chat_message(state.store.as_ref(), &user_id, message.role, &message.content)
            .await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

/// GET /api/v1/saved-documents?user_id=
pub async fn handle_list_saved_documents(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<Document>>, AppError> {
    Ok(Json(
        saved_documents::get_user_documents(state.store.as_ref(), &params.user_id).await?,
    ))
}

/// POST /api/v1/saved-documents
pub async fn handle_save_document(
    State(state): State<AppState>,
    Json(new): Json<NewDocument>,
) -> Result<(StatusCode, Json<Document>), AppError> {
    let document = saved_documents::save_document(state.store.as_ref(), new).await?;
    Ok((StatusCode::CREATED, Json(document)))
}

/// DELETE /api/v1/saved-documents/:id
pub async fn handle_delete_saved_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    saved_documents::delete_document(state.store.as_ref(), &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
