// ABOUTME: Shared application state for API handlers
// ABOUTME: Storage layers, the suggestion client and the context workflow over one SQLite pool

use std::sync::Arc;

use sqlx::SqlitePool;

use taskmind_ai::{AIConfig, SuggestionClient, TaskExtractionClient};
use taskmind_categories::CategoryStorage;
use taskmind_context::{AiTaskExtractor, ContextStorage, ContextWorkflow, TaskExtractor};
use taskmind_core::DEFAULT_USER_ID;
use taskmind_tasks::TaskStorage;

#[derive(Clone)]
pub struct AppState {
    pub user_id: String,
    pub task_storage: Arc<TaskStorage>,
    pub category_storage: Arc<CategoryStorage>,
    pub context_storage: Arc<ContextStorage>,
    pub suggestion_client: SuggestionClient,
    pub context_workflow: Arc<ContextWorkflow>,
}

impl AppState {
    /// Wire every component to `pool`, using one provider configuration for
    /// both suggestions and context extraction
    pub fn new(pool: SqlitePool, ai_config: AIConfig) -> Self {
        let task_storage = Arc::new(TaskStorage::new(pool.clone()));
        let category_storage = Arc::new(CategoryStorage::new(pool.clone()));
        let context_storage = Arc::new(ContextStorage::new(pool));

        let extractor = Arc::new(AiTaskExtractor::new(
            TaskExtractionClient::with_config(ai_config.clone()),
            context_storage.clone(),
            category_storage.clone(),
            task_storage.clone(),
        ));

        Self::assemble(
            task_storage,
            category_storage,
            context_storage,
            SuggestionClient::with_config(ai_config),
            extractor,
        )
    }

    /// Same wiring with a caller-supplied extractor
    pub fn with_extractor(
        pool: SqlitePool,
        suggestion_client: SuggestionClient,
        extractor: Arc<dyn TaskExtractor>,
    ) -> Self {
        Self::assemble(
            Arc::new(TaskStorage::new(pool.clone())),
            Arc::new(CategoryStorage::new(pool.clone())),
            Arc::new(ContextStorage::new(pool)),
            suggestion_client,
            extractor,
        )
    }

    fn assemble(
        task_storage: Arc<TaskStorage>,
        category_storage: Arc<CategoryStorage>,
        context_storage: Arc<ContextStorage>,
        suggestion_client: SuggestionClient,
        extractor: Arc<dyn TaskExtractor>,
    ) -> Self {
        let context_workflow = Arc::new(ContextWorkflow::new(context_storage.clone(), extractor));

        Self {
            user_id: DEFAULT_USER_ID.to_string(),
            task_storage,
            category_storage,
            context_storage,
            suggestion_client,
            context_workflow,
        }
    }
}
