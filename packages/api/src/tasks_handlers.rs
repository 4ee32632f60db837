// ABOUTME: HTTP request handlers for task operations
// ABOUTME: CRUD, filtering, status toggling, statistics and AI suggestions

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tracing::info;

use taskmind_tasks::{PriorityBand, TaskDraft, TaskFilter, TaskStatus, TaskUpdateInput};

use crate::response::{ok, ApiError};
use crate::state::AppState;

/// Query string for listing tasks. `all` or an empty value means no filter.
#[derive(Debug, Default, Deserialize)]
pub struct ListTasksQuery {
    pub status: Option<String>,
    pub category: Option<String>,
    pub priority: Option<String>,
    pub search: Option<String>,
}

fn active(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && v != "all")
}

impl ListTasksQuery {
    fn into_filter(self) -> Result<TaskFilter, ApiError> {
        let status = active(self.status)
            .map(|s| s.parse::<TaskStatus>())
            .transpose()
            .map_err(ApiError::BadRequest)?;
        let priority = active(self.priority)
            .map(|p| p.parse::<PriorityBand>())
            .transpose()
            .map_err(ApiError::BadRequest)?;

        Ok(TaskFilter {
            status,
            category_id: active(self.category),
            priority,
            search: active(self.search),
        })
    }
}

/// List tasks, newest first
pub async fn list_tasks(
    State(state): State<AppState>,
    Query(params): Query<ListTasksQuery>,
) -> impl IntoResponse {
    info!("Listing tasks: {:?}", params);

    let filter = match params.into_filter() {
        Ok(filter) => filter,
        Err(e) => return e.into_response(),
    };

    match state.task_storage.list_tasks(&state.user_id, &filter).await {
        Ok(tasks) => ok(StatusCode::OK, tasks),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Get a single task
pub async fn get_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> impl IntoResponse {
    info!("Getting task: {}", task_id);

    match state.task_storage.get_task(&state.user_id, &task_id).await {
        Ok(task) => ok(StatusCode::OK, task),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Create a task from draft fields; invalid drafts never reach storage
pub async fn create_task(
    State(state): State<AppState>,
    Json(draft): Json<TaskDraft>,
) -> impl IntoResponse {
    info!("Creating task: {}", draft.title);

    let submission = match draft.to_submission() {
        Ok(submission) => submission,
        Err(errors) => return ApiError::from(errors).into_response(),
    };

    match state
        .task_storage
        .create_task(&state.user_id, submission.into_create_input())
        .await
    {
        Ok(task) => ok(StatusCode::CREATED, task),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Partially update a task
pub async fn update_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
    Json(input): Json<TaskUpdateInput>,
) -> impl IntoResponse {
    info!("Updating task: {}", task_id);

    match state
        .task_storage
        .update_task(&state.user_id, &task_id, input)
        .await
    {
        Ok(task) => ok(StatusCode::OK, task),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Delete a task
pub async fn delete_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> impl IntoResponse {
    info!("Deleting task: {}", task_id);

    match state.task_storage.delete_task(&state.user_id, &task_id).await {
        Ok(()) => ok(StatusCode::OK, "Task deleted successfully"),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Flip a task between completed and pending
pub async fn toggle_status(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> impl IntoResponse {
    info!("Toggling status of task: {}", task_id);

    match state.task_storage.toggle_status(&state.user_id, &task_id).await {
        Ok(task) => ok(StatusCode::OK, task),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Counts by status plus overdue tasks
pub async fn get_stats(State(state): State<AppState>) -> impl IntoResponse {
    match state.task_storage.get_stats(&state.user_id).await {
        Ok(stats) => ok(StatusCode::OK, stats),
        Err(e) => ApiError::from(e).into_response(),
    }
}

#[derive(Debug, Deserialize)]
pub struct SuggestionRequest {
    pub title: String,
    #[serde(default)]
    pub context: Option<String>,
}

/// Ask the provider for task suggestions. Provider failures yield default suggestions.
pub async fn ai_suggestions(
    State(state): State<AppState>,
    Json(request): Json<SuggestionRequest>,
) -> impl IntoResponse {
    let title = request.title.trim();
    if title.is_empty() {
        return ApiError::BadRequest("Task title is required".to_string()).into_response();
    }

    info!("Requesting AI suggestions for: {}", title);

    let suggestion = state
        .suggestion_client
        .request_suggestions(title, request.context.as_deref().unwrap_or_default())
        .await;

    ok(StatusCode::OK, suggestion)
}
