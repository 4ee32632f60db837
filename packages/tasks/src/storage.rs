// ABOUTME: Task storage layer using SQLite
// ABOUTME: Handles CRUD operations, filtered listing, status toggling and statistics

use chrono::{NaiveDate, Utc};
use sqlx::{Row, SqlitePool};
use tracing::debug;

use taskmind_core::{clamp_score, generate_id, DEFAULT_PRIORITY};
use taskmind_storage::{StorageError, StorageResult};

use crate::types::{priority_label, Task, TaskCreateInput, TaskFilter, TaskStats, TaskUpdateInput};

const SELECT_TASK: &str = r#"
    SELECT
        t.*,
        c.name AS category_name,
        c.color AS category_color
    FROM tasks t
    LEFT JOIN categories c ON t.category_id = c.id
"#;

pub struct TaskStorage {
    pool: SqlitePool,
}

impl TaskStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List a user's tasks, newest first
    pub async fn list_tasks(&self, user_id: &str, filter: &TaskFilter) -> StorageResult<Vec<Task>> {
        debug!("Fetching tasks for user: {} (filter: {:?})", user_id, filter);

        let mut query_str = format!("{} WHERE t.user_id = ?", SELECT_TASK);

        if filter.status.is_some() {
            query_str.push_str(" AND t.status = ?");
        }
        if filter.category_id.is_some() {
            query_str.push_str(" AND t.category_id = ?");
        }
        if filter.priority.is_some() {
            query_str.push_str(" AND t.priority >= ? AND t.priority < ?");
        }
        let search = filter
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(like_pattern);
        if search.is_some() {
            query_str.push_str(
                " AND (lower(t.title) LIKE ? ESCAPE '\\' OR lower(t.description) LIKE ? ESCAPE '\\')",
            );
        }
        query_str.push_str(" ORDER BY t.created_at DESC, t.rowid DESC");

        // Bind parameters in the same order
        let mut query = sqlx::query(&query_str).bind(user_id);
        if let Some(status) = filter.status {
            query = query.bind(status);
        }
        if let Some(category_id) = &filter.category_id {
            query = query.bind(category_id);
        }
        if let Some(band) = filter.priority {
            let (low, high) = band.range();
            query = query.bind(low).bind(high);
        }
        if let Some(pattern) = &search {
            query = query.bind(pattern).bind(pattern);
        }

        let rows = query.fetch_all(&self.pool).await?;
        rows.iter().map(|row| self.row_to_task(row)).collect()
    }

    /// Get a single task by ID
    pub async fn get_task(&self, user_id: &str, task_id: &str) -> StorageResult<Task> {
        debug!("Fetching task: {}", task_id);

        let query = format!("{} WHERE t.id = ? AND t.user_id = ?", SELECT_TASK);
        let row = sqlx::query(&query)
            .bind(task_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        self.row_to_task(&row)
    }

    /// Create a new task
    pub async fn create_task(&self, user_id: &str, input: TaskCreateInput) -> StorageResult<Task> {
        let task_id = generate_id(None);
        let now = Utc::now();
        let title = input.title.trim().to_string();
        let priority = clamp_score(input.priority.unwrap_or(DEFAULT_PRIORITY) as i64);
        let status = input.status.unwrap_or_default();

        debug!("Creating task: {} for user: {}", task_id, user_id);

        if title.is_empty() {
            return Err(StorageError::Validation("Task title cannot be empty".to_string()));
        }
        self.ensure_category(user_id, &input.category_id).await?;

        sqlx::query(
            r#"
            INSERT INTO tasks (
                id, user_id, title, description, priority, status,
                category_id, due_date, ai_suggested, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&task_id)
        .bind(user_id)
        .bind(&title)
        .bind(input.description.unwrap_or_default())
        .bind(priority)
        .bind(status)
        .bind(&input.category_id)
        .bind(input.due_date)
        .bind(input.ai_suggested)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::from_write(e, &input.category_id))?;

        self.get_task(user_id, &task_id).await
    }

    /// Update the provided fields of a task
    pub async fn update_task(
        &self,
        user_id: &str,
        task_id: &str,
        input: TaskUpdateInput,
    ) -> StorageResult<Task> {
        debug!("Updating task: {}", task_id);

        let title = input.title.map(|t| t.trim().to_string());
        if title.as_deref().is_some_and(str::is_empty) {
            return Err(StorageError::Validation("Task title cannot be empty".to_string()));
        }
        if let Some(category_id) = &input.category_id {
            self.ensure_category(user_id, category_id).await?;
        }

        // Build update query dynamically based on provided fields
        let mut query_parts = vec!["updated_at = ?"];

        if title.is_some() {
            query_parts.push("title = ?");
        }
        if input.description.is_some() {
            query_parts.push("description = ?");
        }
        if input.priority.is_some() {
            query_parts.push("priority = ?");
        }
        if input.status.is_some() {
            query_parts.push("status = ?");
        }
        if input.category_id.is_some() {
            query_parts.push("category_id = ?");
        }
        if input.due_date.is_some() {
            query_parts.push("due_date = ?");
        }
        if input.ai_suggested.is_some() {
            query_parts.push("ai_suggested = ?");
        }

        let query_str = format!(
            "UPDATE tasks SET {} WHERE id = ? AND user_id = ?",
            query_parts.join(", ")
        );
        let mut query = sqlx::query(&query_str).bind(Utc::now());

        if let Some(title) = &title {
            query = query.bind(title);
        }
        if let Some(description) = input.description {
            query = query.bind(description);
        }
        if let Some(priority) = input.priority {
            query = query.bind(clamp_score(priority as i64));
        }
        if let Some(status) = input.status {
            query = query.bind(status);
        }
        if let Some(category_id) = &input.category_id {
            query = query.bind(category_id);
        }
        if let Some(due_date) = input.due_date {
            query = query.bind(due_date);
        }
        if let Some(ai_suggested) = input.ai_suggested {
            query = query.bind(ai_suggested);
        }

        let result = query
            .bind(task_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::from_write(e, task_id))?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        self.get_task(user_id, task_id).await
    }

    /// Delete a task
    pub async fn delete_task(&self, user_id: &str, task_id: &str) -> StorageResult<()> {
        debug!("Deleting task: {}", task_id);

        let result = sqlx::query("DELETE FROM tasks WHERE id = ? AND user_id = ?")
            .bind(task_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    /// Flip a task between completed and pending
    pub async fn toggle_status(&self, user_id: &str, task_id: &str) -> StorageResult<Task> {
        let task = self.get_task(user_id, task_id).await?;
        let next = task.status.toggled();

        debug!("Toggling task {}: {} -> {}", task_id, task.status, next);

        self.update_task(
            user_id,
            task_id,
            TaskUpdateInput {
                status: Some(next),
                ..Default::default()
            },
        )
        .await
    }

    /// Count tasks by status; overdue is measured against today (UTC)
    pub async fn get_stats(&self, user_id: &str) -> StorageResult<TaskStats> {
        self.get_stats_as_of(user_id, Utc::now().date_naive()).await
    }

    pub async fn get_stats_as_of(
        &self,
        user_id: &str,
        today: NaiveDate,
    ) -> StorageResult<TaskStats> {
        debug!("Computing task stats for user: {}", user_id);

        let row = sqlx::query(
            r#"
            SELECT
                COUNT(*) AS total,
                COALESCE(SUM(CASE WHEN status = 'pending' THEN 1 ELSE 0 END), 0) AS pending,
                COALESCE(SUM(CASE WHEN status = 'in_progress' THEN 1 ELSE 0 END), 0) AS in_progress,
                COALESCE(SUM(CASE WHEN status = 'completed' THEN 1 ELSE 0 END), 0) AS completed,
                COALESCE(SUM(CASE
                    WHEN due_date IS NOT NULL AND due_date < ? AND status != 'completed' THEN 1
                    ELSE 0
                END), 0) AS overdue
            FROM tasks
            WHERE user_id = ?
            "#,
        )
        .bind(today)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(TaskStats {
            total: row.try_get("total")?,
            pending: row.try_get("pending")?,
            in_progress: row.try_get("in_progress")?,
            completed: row.try_get("completed")?,
            overdue: row.try_get("overdue")?,
        })
    }

    /// Tasks may only point at categories owned by the same user
    async fn ensure_category(&self, user_id: &str, category_id: &str) -> StorageResult<()> {
        let exists: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM categories WHERE id = ? AND user_id = ?")
                .bind(category_id)
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?;

        if exists == 0 {
            return Err(StorageError::InvalidReference(category_id.to_string()));
        }
        Ok(())
    }

    /// Convert a database row to a Task
    fn row_to_task(&self, row: &sqlx::sqlite::SqliteRow) -> StorageResult<Task> {
        let priority: i32 = row.try_get("priority")?;

        Ok(Task {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            priority,
            priority_label: priority_label(priority).to_string(),
            status: row.try_get("status")?,
            category_id: row.try_get("category_id")?,
            category_name: row.try_get("category_name")?,
            category_color: row.try_get("category_color")?,
            due_date: row.try_get("due_date")?,
            ai_suggested: row.try_get("ai_suggested")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

/// Lowercased `%term%` with LIKE wildcards escaped
fn like_pattern(term: &str) -> String {
    let escaped = term
        .to_lowercase()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}
