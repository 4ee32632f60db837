// ABOUTME: Task management for TaskMind
// ABOUTME: Task records and storage, editable drafts, and merging AI suggestions into drafts

pub mod draft;
pub mod reconcile;
pub mod storage;
pub mod types;

pub use draft::{DraftField, TaskDraft, TaskSubmission, ValidationError};
pub use reconcile::apply_suggestion;
pub use storage::TaskStorage;
pub use types::{
    priority_label, PriorityBand, Task, TaskCreateInput, TaskFilter, TaskStats, TaskStatus,
    TaskUpdateInput,
};
