// ABOUTME: Editable in-memory task drafts
// ABOUTME: Field edits, validation before submission and conversion to storage inputs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use taskmind_core::{clamp_score, DEFAULT_PRIORITY};

use crate::types::{Task, TaskCreateInput, TaskStatus, TaskUpdateInput};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationError {
    #[error("Title is required")]
    MissingTitle,
    #[error("Category is required")]
    MissingCategory,
}

/// A task being edited. `id` is set when the draft edits an existing task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskDraft {
    pub id: Option<String>,
    pub title: String,
    pub description: String,
    pub priority: i32,
    pub status: TaskStatus,
    pub category_id: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub ai_suggested: bool,
}

/// One user edit to a draft
#[derive(Debug, Clone, PartialEq)]
pub enum DraftField {
    Title(String),
    Description(String),
    Priority(i64),
    Status(TaskStatus),
    /// An empty or blank id unsets the category
    Category(String),
    DueDate(Option<NaiveDate>),
}

/// A validated draft, ready for storage
#[derive(Debug, Clone, PartialEq)]
pub struct TaskSubmission {
    pub id: Option<String>,
    pub title: String,
    pub description: String,
    pub priority: i32,
    pub status: TaskStatus,
    pub category_id: String,
    pub due_date: Option<NaiveDate>,
    pub ai_suggested: bool,
}

impl TaskDraft {
    pub fn new() -> Self {
        Self {
            id: None,
            title: String::new(),
            description: String::new(),
            priority: DEFAULT_PRIORITY,
            status: TaskStatus::Pending,
            category_id: None,
            due_date: None,
            ai_suggested: false,
        }
    }

    pub fn from_task(task: &Task) -> Self {
        Self {
            id: Some(task.id.clone()),
            title: task.title.clone(),
            description: task.description.clone(),
            priority: task.priority,
            status: task.status,
            category_id: Some(task.category_id.clone()),
            due_date: task.due_date,
            ai_suggested: task.ai_suggested,
        }
    }

    pub fn set_field(&mut self, field: DraftField) {
        match field {
            DraftField::Title(title) => self.title = title,
            DraftField::Description(description) => self.description = description,
            DraftField::Priority(priority) => self.priority = clamp_score(priority),
            DraftField::Status(status) => self.status = status,
            DraftField::Category(category_id) => {
                let category_id = category_id.trim();
                self.category_id = (!category_id.is_empty()).then(|| category_id.to_string());
            }
            DraftField::DueDate(due_date) => self.due_date = due_date,
        }
    }

    /// Builder-style variant of [`TaskDraft::set_field`]
    pub fn with_field(mut self, field: DraftField) -> Self {
        self.set_field(field);
        self
    }

    /// Reports every problem, not just the first
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.title.trim().is_empty() {
            errors.push(ValidationError::MissingTitle);
        }
        if self.category_id.as_deref().map_or(true, |c| c.trim().is_empty()) {
            errors.push(ValidationError::MissingCategory);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn to_submission(&self) -> Result<TaskSubmission, Vec<ValidationError>> {
        self.validate()?;

        Ok(TaskSubmission {
            id: self.id.clone(),
            title: self.title.trim().to_string(),
            description: self.description.clone(),
            priority: clamp_score(self.priority as i64),
            status: self.status,
            category_id: self.category_id.clone().unwrap_or_default(),
            due_date: self.due_date,
            ai_suggested: self.ai_suggested,
        })
    }
}

impl Default for TaskDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskSubmission {
    pub fn into_create_input(self) -> TaskCreateInput {
        TaskCreateInput {
            title: self.title,
            description: Some(self.description),
            priority: Some(self.priority),
            status: Some(self.status),
            category_id: self.category_id,
            due_date: self.due_date,
            ai_suggested: self.ai_suggested,
        }
    }

    /// Every field is written, so clearing the due date in the draft clears it in storage
    pub fn into_update_input(self) -> TaskUpdateInput {
        TaskUpdateInput {
            title: Some(self.title),
            description: Some(self.description),
            priority: Some(self.priority),
            status: Some(self.status),
            category_id: Some(self.category_id),
            due_date: Some(self.due_date),
            ai_suggested: Some(self.ai_suggested),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_draft_defaults() {
        let draft = TaskDraft::new();
        assert_eq!(draft.priority, 50);
        assert_eq!(draft.status, TaskStatus::Pending);
        assert_eq!(draft.category_id, None);
        assert!(!draft.ai_suggested);
    }

    #[test]
    fn test_blank_title_and_missing_category_both_reported() {
        let draft = TaskDraft::new().with_field(DraftField::Title("   ".to_string()));
        assert_eq!(
            draft.validate(),
            Err(vec![ValidationError::MissingTitle, ValidationError::MissingCategory])
        );
        assert!(draft.to_submission().is_err());
    }

    #[test]
    fn test_priority_is_clamped_on_set() {
        let mut draft = TaskDraft::new();
        draft.set_field(DraftField::Priority(150));
        assert_eq!(draft.priority, 100);
        draft.set_field(DraftField::Priority(-5));
        assert_eq!(draft.priority, 0);
    }

    #[test]
    fn test_empty_category_unsets() {
        let mut draft = TaskDraft::new().with_field(DraftField::Category("cat-1".to_string()));
        assert_eq!(draft.category_id.as_deref(), Some("cat-1"));
        draft.set_field(DraftField::Category(String::new()));
        assert_eq!(draft.category_id, None);
    }

    #[test]
    fn test_submission_trims_title() {
        let submission = TaskDraft::new()
            .with_field(DraftField::Title("  Buy milk ".to_string()))
            .with_field(DraftField::Category("cat-1".to_string()))
            .to_submission()
            .unwrap();
        assert_eq!(submission.title, "Buy milk");
        assert_eq!(submission.category_id, "cat-1");

        let input = submission.into_create_input();
        assert_eq!(input.priority, Some(50));
        assert_eq!(input.status, Some(TaskStatus::Pending));
    }

    #[test]
    fn test_from_task_preserves_status() {
        let now = Utc::now();
        let task = Task {
            id: "t1".to_string(),
            user_id: "default-user".to_string(),
            title: "Write report".to_string(),
            description: "Q3".to_string(),
            priority: 70,
            priority_label: "Medium".to_string(),
            status: TaskStatus::InProgress,
            category_id: "cat-1".to_string(),
            category_name: Some("Work".to_string()),
            category_color: None,
            due_date: None,
            ai_suggested: true,
            created_at: now,
            updated_at: now,
        };

        let title = DraftField::Title("Write Q3 report".to_string());
        let draft = TaskDraft::from_task(&task).with_field(title);
        let update = draft.to_submission().unwrap().into_update_input();
        assert_eq!(update.status, Some(TaskStatus::InProgress));
        assert_eq!(update.ai_suggested, Some(true));
        assert_eq!(update.due_date, Some(None));
    }

    #[test]
    fn test_draft_deserializes_with_missing_fields() {
        let draft: TaskDraft = serde_json::from_str(r#"{"title": "Call mom"}"#).unwrap();
        assert_eq!(draft.title, "Call mom");
        assert_eq!(draft.priority, 50);
        assert_eq!(draft.category_id, None);
    }
}
