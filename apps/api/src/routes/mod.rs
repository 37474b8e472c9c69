pub mod health;

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::collections::handlers as store;
use crate::mock_api::handlers as api;
use crate::mock_data::handlers as mocked;
use crate::session::handlers as session;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Mock API tables
        .route("/api/v1/call/*endpoint", post(api::handle_api_call))
        .route(
            "/api/v1/users/:id",
            get(api::handle_get_user).patch(api::handle_update_user),
        )
        .route(
            "/api/v1/achievements",
            get(api::handle_list_achievements).post(api::handle_create_achievement),
        )
        .route(
            "/api/v1/achievements/:id",
            get(api::handle_get_achievement)
                .patch(api::handle_update_achievement)
                .delete(api::handle_delete_achievement),
        )
        .route(
            "/api/v1/achievements/:id/like",
            post(api::handle_like_achievement),
        )
        .route(
            "/api/v1/documents",
            get(api::handle_list_documents).post(api::handle_create_document),
        )
        .route(
            "/api/v1/documents/:id",
            get(api::handle_get_document)
                .patch(api::handle_update_document)
                .delete(api::handle_delete_document),
        )
        .route(
            "/api/v1/documents/:id/download",
            post(api::handle_download_document),
        )
        .route(
            "/api/v1/stories",
            get(api::handle_list_stories).post(api::handle_create_story),
        )
        .route(
            "/api/v1/interview-questions",
            get(api::handle_list_questions),
        )
        .route(
            "/api/v1/notifications",
            get(api::handle_list_notifications).post(api::handle_create_notification),
        )
        .route(
            "/api/v1/notifications/:id/read",
            post(api::handle_mark_notification_read),
        )
        .route("/api/v1/dashboard/:user_id", get(api::handle_dashboard))
        // Read-only fixtures
        .route("/api/v1/mocked/users/:id", get(mocked::handle_get_user))
        .route(
            "/api/v1/mocked/achievements",
            get(mocked::handle_list_achievements),
        )
        .route("/api/v1/mocked/documents", get(mocked::handle_list_documents))
        .route("/api/v1/mocked/stories", get(mocked::handle_list_stories))
        .route(
            "/api/v1/mocked/interview-questions",
            get(mocked::handle_list_questions),
        )
        .route(
            "/api/v1/mocked/notifications",
            get(mocked::handle_list_notifications),
        )
        .route(
            "/api/v1/mocked/dashboard/:user_id",
            get(mocked::handle_dashboard),
        )
        .route(
            "/api/v1/mocked/progress/:user_id",
            get(mocked::handle_level_progress),
        )
        // Document store collections
        .route(
            "/api/v1/profiles/:user_id",
            get(store::handle_get_profile)
                .put(store::handle_save_profile)
                .patch(store::handle_update_profile),
        )
        .route(
            "/api/v1/goals",
            get(store::handle_list_goals).post(store::handle_add_goal),
        )
        .route(
            "/api/v1/goals/:id",
            patch(store::handle_update_goal).delete(store::handle_delete_goal),
        )
        .route(
            "/api/v1/progress",
            get(store::handle_list_progress).post(store::handle_record_progress),
        )
        .route(
            "/api/v1/chats/:user_id",
            get(store::handle_chat_history).post(store::handle_save_chat_message),
        )
        .route(
            "/api/v1/saved-documents",
            get(store::handle_list_saved_documents).post(store::handle_save_document),
        )
        .route(
            "/api/v1/saved-documents/:id",
            delete(store::handle_delete_saved_document),
        )
        // Session context
        .route("/api/v1/session", get(session::handle_get_session))
        .route("/api/v1/session/me", get(session::handle_me))
        .route("/api/v1/session/login", post(session::handle_login))
        .route("/api/v1/session/logout", post(session::handle_logout))
        .route("/api/v1/preferences/theme", put(session::handle_set_theme))
        .route(
            "/api/v1/preferences/theme/toggle",
            post(session::handle_toggle_theme),
        )
        .with_state(state)
}
