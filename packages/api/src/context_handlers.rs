// ABOUTME: HTTP request handlers for context entries
// ABOUTME: Stores raw context and runs the extraction workflow over it

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::info;

use taskmind_context::ContextCreateInput;

use crate::response::{ok, ApiError};
use crate::state::AppState;

/// List context entries, newest first
pub async fn list_entries(State(state): State<AppState>) -> impl IntoResponse {
    info!("Listing context entries");

    match state.context_storage.list_entries(&state.user_id).await {
        Ok(entries) => ok(StatusCode::OK, entries),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Store an entry without processing it
pub async fn create_entry(
    State(state): State<AppState>,
    Json(input): Json<ContextCreateInput>,
) -> impl IntoResponse {
    info!("Creating context entry ({})", input.entry_type);

    match state
        .context_storage
        .create_entry(&state.user_id, input)
        .await
    {
        Ok(entry) => ok(StatusCode::CREATED, entry),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Run extraction on a stored entry
pub async fn process_entry(
    State(state): State<AppState>,
    Path(entry_id): Path<String>,
) -> impl IntoResponse {
    info!("Processing context entry: {}", entry_id);

    match state.context_workflow.process_entry(&entry_id).await {
        Ok(outcome) => ok(StatusCode::OK, outcome),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Store an entry and extract tasks from it in one step
pub async fn submit_context(
    State(state): State<AppState>,
    Json(input): Json<ContextCreateInput>,
) -> impl IntoResponse {
    info!("Submitting context ({})", input.entry_type);

    match state
        .context_workflow
        .submit_context(&input.content, input.entry_type)
        .await
    {
        Ok(outcome) => ok(StatusCode::CREATED, outcome),
        Err(e) => ApiError::from(e).into_response(),
    }
}
