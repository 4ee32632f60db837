// ABOUTME: Context entry storage layer using SQLite
// ABOUTME: Creates, lists and fetches entries and records when extraction completes

use chrono::Utc;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use taskmind_core::generate_id;
use taskmind_storage::{StorageError, StorageResult};

use crate::types::{ContextCreateInput, ContextEntry};

pub struct ContextStorage {
    pool: SqlitePool,
}

impl ContextStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List a user's entries, newest first
    pub async fn list_entries(&self, user_id: &str) -> StorageResult<Vec<ContextEntry>> {
        debug!("Fetching context entries for user: {}", user_id);

        let rows = sqlx::query(
            "SELECT * FROM context_entries WHERE user_id = ? ORDER BY created_at DESC, rowid DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(|row| self.row_to_entry(row)).collect()
    }

    pub async fn get_entry(&self, user_id: &str, entry_id: &str) -> StorageResult<ContextEntry> {
        debug!("Fetching context entry: {}", entry_id);

        let row = sqlx::query("SELECT * FROM context_entries WHERE id = ? AND user_id = ?")
            .bind(entry_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        self.row_to_entry(&row)
    }

    /// Store a new, unprocessed entry
    pub async fn create_entry(
        &self,
        user_id: &str,
        input: ContextCreateInput,
    ) -> StorageResult<ContextEntry> {
        if input.content.trim().is_empty() {
            return Err(StorageError::Validation(
                "Context content cannot be empty".to_string(),
            ));
        }

        let entry_id = generate_id(Some("ctx"));
        debug!(
            "Creating context entry: {} (type: {}, {} chars)",
            entry_id,
            input.entry_type,
            input.content.chars().count()
        );

        sqlx::query(
            r#"
            INSERT INTO context_entries (id, user_id, content, type, processed, created_at)
            VALUES (?, ?, ?, ?, 0, ?)
            "#,
        )
        .bind(&entry_id)
        .bind(user_id)
        .bind(&input.content)
        .bind(input.entry_type)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        self.get_entry(user_id, &entry_id).await
    }

    /// Flip `processed` to true. Returns false when the entry was already processed.
    ///
    /// The conditional update is atomic, so only one caller wins the flip.
    pub async fn mark_processed(&self, user_id: &str, entry_id: &str) -> StorageResult<bool> {
        debug!("Marking context entry processed: {}", entry_id);

        let result = sqlx::query(
            "UPDATE context_entries SET processed = 1 WHERE id = ? AND user_id = ? AND processed = 0",
        )
        .bind(entry_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 1 {
            return Ok(true);
        }

        // Distinguish "already processed" from "missing"
        self.get_entry(user_id, entry_id).await?;
        Ok(false)
    }

    fn row_to_entry(&self, row: &sqlx::sqlite::SqliteRow) -> StorageResult<ContextEntry> {
        Ok(ContextEntry {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            content: row.try_get("content")?,
            entry_type: row.try_get("type")?,
            processed: row.try_get("processed")?,
            created_at: row.try_get("created_at")?,
        })
    }
}
