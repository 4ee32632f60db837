// ABOUTME: Context ingestion workflow
// ABOUTME: Persists an entry, triggers extraction and reports how many tasks were created

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use taskmind_core::DEFAULT_USER_ID;
use taskmind_storage::StorageError;
use taskmind_tasks::Task;

use crate::extractor::{ExtractionError, TaskExtractor};
use crate::storage::ContextStorage;
use crate::types::{ContextCreateInput, ContextType};

#[derive(Error, Debug)]
pub enum ContextProcessingError {
    #[error("Context content cannot be empty")]
    EmptyContent,

    #[error("Context entry not found: {0}")]
    NotFound(String),

    #[error("Context entry already processed: {0}")]
    AlreadyProcessed(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Extraction failed: {0}")]
    Extraction(String),
}

impl From<ExtractionError> for ContextProcessingError {
    fn from(err: ExtractionError) -> Self {
        match err {
            ExtractionError::NotFound(id) => ContextProcessingError::NotFound(id),
            ExtractionError::AlreadyProcessed(id) => ContextProcessingError::AlreadyProcessed(id),
            ExtractionError::Storage(e) => ContextProcessingError::Storage(e),
            ExtractionError::Service(msg) => ContextProcessingError::Extraction(msg),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmitOutcome {
    pub entry_id: String,
    pub created_task_count: usize,
    pub summary: String,
    pub confidence: i32,
    pub tasks: Vec<Task>,
}

pub struct ContextWorkflow {
    storage: Arc<ContextStorage>,
    extractor: Arc<dyn TaskExtractor>,
    user_id: String,
}

impl ContextWorkflow {
    pub fn new(storage: Arc<ContextStorage>, extractor: Arc<dyn TaskExtractor>) -> Self {
        Self {
            storage,
            extractor,
            user_id: DEFAULT_USER_ID.to_string(),
        }
    }

    pub fn for_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    /// Store `content` and extract tasks from it.
    ///
    /// The entry is always persisted before extraction runs. If extraction fails
    /// the entry stays unprocessed and can be retried with [`Self::process_entry`].
    pub async fn submit_context(
        &self,
        content: &str,
        entry_type: ContextType,
    ) -> Result<SubmitOutcome, ContextProcessingError> {
        if content.trim().is_empty() {
            return Err(ContextProcessingError::EmptyContent);
        }

        let entry = self
            .storage
            .create_entry(
                &self.user_id,
                ContextCreateInput {
                    content: content.to_string(),
                    entry_type,
                },
            )
            .await?;

        info!("Stored context entry {} ({})", entry.id, entry_type);

        self.process_entry(&entry.id).await
    }

    /// Run extraction on an entry that is already stored
    pub async fn process_entry(
        &self,
        entry_id: &str,
    ) -> Result<SubmitOutcome, ContextProcessingError> {
        let outcome = self
            .extractor
            .extract(&self.user_id, entry_id)
            .await
            .map_err(|e| {
                warn!("Extraction failed for context entry {}: {}", entry_id, e);
                ContextProcessingError::from(e)
            })?;

        info!(
            "Context entry {} created {} tasks",
            entry_id,
            outcome.tasks.len()
        );

        Ok(SubmitOutcome {
            entry_id: entry_id.to_string(),
            created_task_count: outcome.tasks.len(),
            summary: outcome.summary,
            confidence: outcome.confidence,
            tasks: outcome.tasks,
        })
    }
}
