// ABOUTME: Context ingestion for TaskMind
// ABOUTME: Stores raw notes, emails and messages and turns them into tasks

pub mod extractor;
pub mod storage;
pub mod types;
pub mod workflow;

pub use extractor::{AiTaskExtractor, ExtractionError, ExtractionOutcome, TaskExtractor};
pub use storage::ContextStorage;
pub use types::{ContextCreateInput, ContextEntry, ContextType};
pub use workflow::{ContextProcessingError, ContextWorkflow, SubmitOutcome};
