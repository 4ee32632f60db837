// ABOUTME: Extraction trait and the AI-backed implementation
// ABOUTME: Claims a stored context entry and turns it into tasks

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::{info, warn};

use taskmind_ai::{ExtractedTask, TaskExtractionClient};
use taskmind_categories::{CategoryIcon, CategoryStorage, DEFAULT_COLOR};
use taskmind_core::title_case;
use taskmind_storage::StorageError;
use taskmind_tasks::{Task, TaskCreateInput, TaskStatus, TaskStorage};

use crate::storage::ContextStorage;

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("Context entry not found: {0}")]
    NotFound(String),

    #[error("Context entry already processed: {0}")]
    AlreadyProcessed(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Extraction service failed: {0}")]
    Service(String),
}

/// What an extraction run produced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractionOutcome {
    pub tasks: Vec<Task>,
    pub summary: String,
    pub confidence: i32,
}

/// Converts a persisted context entry into tasks.
///
/// Implementations must leave the entry unprocessed when they return an error.
#[async_trait]
pub trait TaskExtractor: Send + Sync {
    async fn extract(
        &self,
        user_id: &str,
        entry_id: &str,
    ) -> Result<ExtractionOutcome, ExtractionError>;
}

/// Extractor backed by the AI extraction client
pub struct AiTaskExtractor {
    client: TaskExtractionClient,
    contexts: Arc<ContextStorage>,
    categories: Arc<CategoryStorage>,
    tasks: Arc<TaskStorage>,
}

impl AiTaskExtractor {
    pub fn new(
        client: TaskExtractionClient,
        contexts: Arc<ContextStorage>,
        categories: Arc<CategoryStorage>,
        tasks: Arc<TaskStorage>,
    ) -> Self {
        Self {
            client,
            contexts,
            categories,
            tasks,
        }
    }

    pub fn from_pool(client: TaskExtractionClient, pool: SqlitePool) -> Self {
        Self::new(
            client,
            Arc::new(ContextStorage::new(pool.clone())),
            Arc::new(CategoryStorage::new(pool.clone())),
            Arc::new(TaskStorage::new(pool)),
        )
    }

    async fn create_task(
        &self,
        user_id: &str,
        extracted: &ExtractedTask,
    ) -> Result<Task, StorageError> {
        let category_name = title_case(&extracted.suggested_category);
        let category = self
            .categories
            .get_or_create(user_id, &category_name, DEFAULT_COLOR, CategoryIcon::Folder)
            .await?;

        self.tasks
            .create_task(
                user_id,
                TaskCreateInput {
                    title: extracted.title.clone(),
                    description: Some(extracted.description.clone()),
                    priority: Some(extracted.priority_score),
                    status: Some(TaskStatus::Pending),
                    category_id: category.id,
                    due_date: None,
                    ai_suggested: true,
                },
            )
            .await
    }
}

#[async_trait]
impl TaskExtractor for AiTaskExtractor {
    async fn extract(
        &self,
        user_id: &str,
        entry_id: &str,
    ) -> Result<ExtractionOutcome, ExtractionError> {
        let entry = self
            .contexts
            .get_entry(user_id, entry_id)
            .await
            .map_err(|e| match e {
                StorageError::NotFound => ExtractionError::NotFound(entry_id.to_string()),
                other => ExtractionError::Storage(other),
            })?;

        // Claim the entry before any task exists so concurrent runs cannot both insert
        if entry.processed || !self.contexts.mark_processed(user_id, entry_id).await? {
            return Err(ExtractionError::AlreadyProcessed(entry_id.to_string()));
        }

        let result = self
            .client
            .extract_tasks(&entry.content, entry.entry_type.as_str())
            .await;

        let mut tasks = Vec::with_capacity(result.extracted_tasks.len());
        for extracted in &result.extracted_tasks {
            match self.create_task(user_id, extracted).await {
                Ok(task) => tasks.push(task),
                Err(e) => warn!("Skipping extracted task '{}': {}", extracted.title, e),
            }
        }

        info!(
            "Context entry {} produced {} tasks",
            entry_id,
            tasks.len()
        );

        Ok(ExtractionOutcome {
            tasks,
            summary: result.summary,
            confidence: result.confidence,
        })
    }
}
