// ABOUTME: HTTP request handlers for task drafts
// ABOUTME: Applies AI suggestions to drafts and validates drafts before submission

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use taskmind_ai::SuggestionResult;
use taskmind_tasks::{apply_suggestion as reconcile, TaskDraft, ValidationError};

use crate::response::{ok, ApiError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ApplySuggestionRequest {
    #[serde(default)]
    pub draft: TaskDraft,
    pub suggestion: SuggestionResult,
}

/// Merge a suggestion into a draft against the user's current categories
pub async fn apply_suggestion(
    State(state): State<AppState>,
    Json(request): Json<ApplySuggestionRequest>,
) -> impl IntoResponse {
    info!(
        "Applying suggestion (category: {}) to draft",
        request.suggestion.suggested_category
    );

    match state.category_storage.list_categories(&state.user_id).await {
        Ok(known) => ok(
            StatusCode::OK,
            reconcile(request.draft, &request.suggestion, &known),
        ),
        Err(e) => ApiError::from(e).into_response(),
    }
}

#[derive(Debug, Deserialize)]
pub struct ValidateDraftRequest {
    pub draft: TaskDraft,
}

#[derive(Debug, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
}

/// Report draft problems without submitting anything
pub async fn validate_draft(Json(request): Json<ValidateDraftRequest>) -> impl IntoResponse {
    let errors = request.draft.validate().err().unwrap_or_default();

    ok(
        StatusCode::OK,
        ValidationReport {
            valid: errors.is_empty(),
            errors,
        },
    )
}
