// ABOUTME: HTTP API layer for TaskMind providing REST endpoints and routing
// ABOUTME: Integration layer over the task, category, context and AI packages

use axum::{
    routing::{get, patch, post},
    Json, Router,
};

pub mod categories_handlers;
pub mod context_handlers;
pub mod drafts_handlers;
pub mod response;
pub mod state;
pub mod tasks_handlers;

pub use response::{ApiError, ApiResponse};
pub use state::AppState;

/// Creates the tasks API router (nested under /api/tasks)
pub fn create_tasks_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(tasks_handlers::list_tasks).post(tasks_handlers::create_task),
        )
        .route("/stats", get(tasks_handlers::get_stats))
        .route("/ai-suggestions", post(tasks_handlers::ai_suggestions))
        .route(
            "/{task_id}",
            get(tasks_handlers::get_task)
                .patch(tasks_handlers::update_task)
                .delete(tasks_handlers::delete_task),
        )
        .route("/{task_id}/toggle-status", patch(tasks_handlers::toggle_status))
}

/// Creates the drafts API router (nested under /api/drafts)
pub fn create_drafts_router() -> Router<AppState> {
    Router::new()
        .route("/apply-suggestion", post(drafts_handlers::apply_suggestion))
        .route("/validate", post(drafts_handlers::validate_draft))
}

/// Creates the categories API router (nested under /api/categories)
pub fn create_categories_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(categories_handlers::list_categories).post(categories_handlers::create_category),
        )
        .route("/defaults", post(categories_handlers::create_default_categories))
        .route(
            "/{category_id}",
            get(categories_handlers::get_category)
                .patch(categories_handlers::update_category)
                .delete(categories_handlers::delete_category),
        )
}

/// Creates the context API router (nested under /api/context)
pub fn create_context_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(context_handlers::list_entries).post(context_handlers::create_entry),
        )
        .route("/submit", post(context_handlers::submit_context))
        .route("/{entry_id}/process", post(context_handlers::process_entry))
}

async fn health() -> Json<ApiResponse<serde_json::Value>> {
    Json(ApiResponse::success(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "taskmind"
    })))
}

/// Full `/api` surface with state applied
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .nest("/api/tasks", create_tasks_router())
        .nest("/api/drafts", create_drafts_router())
        .nest("/api/categories", create_categories_router())
        .nest("/api/context", create_context_router())
        .with_state(state)
}
