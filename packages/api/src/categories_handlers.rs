// ABOUTME: HTTP request handlers for category operations
// ABOUTME: Handles CRUD and default seeding for categories

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::info;

use taskmind_categories::{CategoryCreateInput, CategoryUpdateInput};

use crate::response::{ok, ApiError};
use crate::state::AppState;

/// List categories, seeding the defaults on first use
pub async fn list_categories(State(state): State<AppState>) -> impl IntoResponse {
    info!("Listing categories");

    match state.category_storage.ensure_defaults(&state.user_id).await {
        Ok(categories) => ok(StatusCode::OK, categories),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Get a single category
pub async fn get_category(
    State(state): State<AppState>,
    Path(category_id): Path<String>,
) -> impl IntoResponse {
    info!("Getting category: {}", category_id);

    match state
        .category_storage
        .get_category(&state.user_id, &category_id)
        .await
    {
        Ok(category) => ok(StatusCode::OK, category),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Create a new category
pub async fn create_category(
    State(state): State<AppState>,
    Json(input): Json<CategoryCreateInput>,
) -> impl IntoResponse {
    info!("Creating category: {}", input.name);

    if input.name.trim().is_empty() {
        return ApiError::BadRequest("Category name is required".to_string()).into_response();
    }

    match state
        .category_storage
        .create_category(&state.user_id, input)
        .await
    {
        Ok(category) => ok(StatusCode::CREATED, category),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Update a category
pub async fn update_category(
    State(state): State<AppState>,
    Path(category_id): Path<String>,
    Json(input): Json<CategoryUpdateInput>,
) -> impl IntoResponse {
    info!("Updating category: {}", category_id);

    if input.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
        return ApiError::BadRequest("Category name cannot be empty".to_string()).into_response();
    }

    match state
        .category_storage
        .update_category(&state.user_id, &category_id, input)
        .await
    {
        Ok(category) => ok(StatusCode::OK, category),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Delete a category (only if unused)
pub async fn delete_category(
    State(state): State<AppState>,
    Path(category_id): Path<String>,
) -> impl IntoResponse {
    info!("Deleting category: {}", category_id);

    match state
        .category_storage
        .delete_category(&state.user_id, &category_id)
        .await
    {
        Ok(()) => ok(StatusCode::OK, "Category deleted successfully"),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Create whichever default categories are missing
pub async fn create_default_categories(State(state): State<AppState>) -> impl IntoResponse {
    info!("Creating default categories");

    match state.category_storage.create_defaults(&state.user_id).await {
        Ok(created) => ok(StatusCode::CREATED, created),
        Err(e) => ApiError::from(e).into_response(),
    }
}
