// ABOUTME: Task type definitions
// ABOUTME: Task records, status lifecycle, priority bands, list filters and statistics

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
        }
    }

    /// Completed tasks reopen as pending; anything else completes
    pub fn toggled(self) -> Self {
        match self {
            TaskStatus::Completed => TaskStatus::Pending,
            TaskStatus::Pending | TaskStatus::InProgress => TaskStatus::Completed,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TaskStatus::Pending),
            "in_progress" => Ok(TaskStatus::InProgress),
            "completed" => Ok(TaskStatus::Completed),
            other => Err(format!("Unknown task status: {}", other)),
        }
    }
}

/// Coarse priority buckets used for display and filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityBand {
    High,
    Medium,
    Low,
}

impl PriorityBand {
    pub fn of(priority: i32) -> Self {
        if priority >= 80 {
            PriorityBand::High
        } else if priority >= 60 {
            PriorityBand::Medium
        } else {
            PriorityBand::Low
        }
    }

    /// Inclusive lower and exclusive upper bound
    pub fn range(&self) -> (i32, i32) {
        match self {
            PriorityBand::High => (80, 101),
            PriorityBand::Medium => (60, 80),
            PriorityBand::Low => (0, 60),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PriorityBand::High => "High",
            PriorityBand::Medium => "Medium",
            PriorityBand::Low => "Low",
        }
    }
}

impl FromStr for PriorityBand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high" => Ok(PriorityBand::High),
            "medium" => Ok(PriorityBand::Medium),
            "low" => Ok(PriorityBand::Low),
            other => Err(format!("Unknown priority band: {}", other)),
        }
    }
}

pub fn priority_label(priority: i32) -> &'static str {
    PriorityBand::of(priority).label()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub priority: i32,
    pub priority_label: String,
    pub status: TaskStatus,

    // Category, joined for display
    pub category_id: String,
    pub category_name: Option<String>,
    pub category_color: Option<String>,

    pub due_date: Option<NaiveDate>,
    pub ai_suggested: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskCreateInput {
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<i32>,
    pub status: Option<TaskStatus>,
    pub category_id: String,
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub ai_suggested: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskUpdateInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<i32>,
    pub status: Option<TaskStatus>,
    pub category_id: Option<String>,
    /// `None` leaves the date alone, `Some(None)` clears it
    #[serde(default, deserialize_with = "double_option")]
    pub due_date: Option<Option<NaiveDate>>,
    pub ai_suggested: Option<bool>,
}

fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub category_id: Option<String>,
    pub priority: Option<PriorityBand>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskStats {
    pub total: i64,
    pub pending: i64,
    pub in_progress: i64,
    pub completed: i64,
    pub overdue: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_priority_label_thresholds() {
        assert_eq!(priority_label(100), "High");
        assert_eq!(priority_label(80), "High");
        assert_eq!(priority_label(79), "Medium");
        assert_eq!(priority_label(60), "Medium");
        assert_eq!(priority_label(59), "Low");
        assert_eq!(priority_label(0), "Low");
    }

    #[test]
    fn test_toggle_cycle() {
        assert_eq!(TaskStatus::Pending.toggled(), TaskStatus::Completed);
        assert_eq!(TaskStatus::InProgress.toggled(), TaskStatus::Completed);
        assert_eq!(TaskStatus::Completed.toggled(), TaskStatus::Pending);
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
        assert_eq!("in_progress".parse::<TaskStatus>(), Ok(TaskStatus::InProgress));
        assert!("done".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn test_update_input_due_date_states() {
        let absent: TaskUpdateInput = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.due_date, None);

        let cleared: TaskUpdateInput = serde_json::from_str(r#"{"due_date": null}"#).unwrap();
        assert_eq!(cleared.due_date, Some(None));

        let set: TaskUpdateInput = serde_json::from_str(r#"{"due_date": "2025-05-01"}"#).unwrap();
        assert_eq!(set.due_date, Some(NaiveDate::from_ymd_opt(2025, 5, 1)));
    }
}
