// ABOUTME: Category storage layer using SQLite
// ABOUTME: Handles CRUD operations, default seeding and get-or-create lookups

use chrono::Utc;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use taskmind_core::generate_id;
use taskmind_storage::{StorageError, StorageResult};

use crate::types::{
    Category, CategoryCreateInput, CategoryIcon, CategoryUpdateInput, DEFAULT_CATEGORIES,
    DEFAULT_COLOR,
};

const SELECT_CATEGORY: &str = r#"
    SELECT
        c.id, c.name, c.color, c.icon, c.created_at,
        (SELECT COUNT(*) FROM tasks t WHERE t.category_id = c.id) AS task_count
    FROM categories c
"#;

pub struct CategoryStorage {
    pool: SqlitePool,
}

impl CategoryStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List a user's categories ordered by name
    pub async fn list_categories(&self, user_id: &str) -> StorageResult<Vec<Category>> {
        debug!("Fetching categories for user: {}", user_id);

        let query = format!(
            "{} WHERE c.user_id = ? ORDER BY c.name, c.created_at",
            SELECT_CATEGORY
        );

        let rows = sqlx::query(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(|row| self.row_to_category(row)).collect()
    }

    /// Get a single category by ID
    pub async fn get_category(&self, user_id: &str, category_id: &str) -> StorageResult<Category> {
        debug!("Fetching category: {}", category_id);

        let query = format!("{} WHERE c.id = ? AND c.user_id = ?", SELECT_CATEGORY);

        let row = sqlx::query(&query)
            .bind(category_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        self.row_to_category(&row)
    }

    /// Get a category by name, ignoring ASCII case
    pub async fn get_category_by_name(
        &self,
        user_id: &str,
        name: &str,
    ) -> StorageResult<Option<Category>> {
        debug!("Fetching category by name: {}", name);

        let query = format!(
            "{} WHERE c.user_id = ? AND lower(c.name) = lower(?) ORDER BY c.name, c.created_at LIMIT 1",
            SELECT_CATEGORY
        );

        let row = sqlx::query(&query)
            .bind(user_id)
            .bind(name.trim())
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(r) => Ok(Some(self.row_to_category(&r)?)),
            None => Ok(None),
        }
    }

    /// Create a new category
    pub async fn create_category(
        &self,
        user_id: &str,
        input: CategoryCreateInput,
    ) -> StorageResult<Category> {
        let category_id = generate_id(Some("cat"));
        let name = input.name.trim().to_string();
        let color = input.color.unwrap_or_else(|| DEFAULT_COLOR.to_string());
        let icon = input.icon.unwrap_or_default();
        let now = Utc::now();

        debug!("Creating category: {} (name: {})", category_id, name);

        sqlx::query(
            r#"
            INSERT INTO categories (id, user_id, name, color, icon, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&category_id)
        .bind(user_id)
        .bind(&name)
        .bind(&color)
        .bind(icon.as_str())
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::from_write(e, &name))?;

        self.get_category(user_id, &category_id).await
    }

    /// Update a category
    pub async fn update_category(
        &self,
        user_id: &str,
        category_id: &str,
        input: CategoryUpdateInput,
    ) -> StorageResult<Category> {
        debug!("Updating category: {}", category_id);

        // Build update query dynamically based on provided fields
        let mut query_parts = Vec::new();

        if input.name.is_some() {
            query_parts.push("name = ?");
        }
        if input.color.is_some() {
            query_parts.push("color = ?");
        }
        if input.icon.is_some() {
            query_parts.push("icon = ?");
        }

        if query_parts.is_empty() {
            return self.get_category(user_id, category_id).await;
        }

        let query_str = format!(
            "UPDATE categories SET {} WHERE id = ? AND user_id = ?",
            query_parts.join(", ")
        );
        let mut query = sqlx::query(&query_str);

        // Bind parameters in the same order
        let name = input.name.map(|n| n.trim().to_string());
        if let Some(name) = &name {
            query = query.bind(name);
        }
        if let Some(color) = input.color {
            query = query.bind(color);
        }
        if let Some(icon) = input.icon {
            query = query.bind(icon.as_str());
        }

        let result = query
            .bind(category_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::from_write(e, name.as_deref().unwrap_or(category_id)))?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        self.get_category(user_id, category_id).await
    }

    /// Delete a category permanently (only if no tasks are using it)
    pub async fn delete_category(&self, user_id: &str, category_id: &str) -> StorageResult<()> {
        debug!("Deleting category: {}", category_id);

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tasks WHERE category_id = ?")
            .bind(category_id)
            .fetch_one(&self.pool)
            .await?;

        if count > 0 {
            return Err(StorageError::InUse(format!(
                "Category '{}' ({} tasks)",
                category_id, count
            )));
        }

        let result = sqlx::query("DELETE FROM categories WHERE id = ? AND user_id = ?")
            .bind(category_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    /// Create whichever default categories the user is missing.
    /// Returns only the ones created by this call.
    pub async fn create_defaults(&self, user_id: &str) -> StorageResult<Vec<Category>> {
        let mut created = Vec::new();

        for default in DEFAULT_CATEGORIES {
            if self
                .get_category_by_name(user_id, default.name)
                .await?
                .is_some()
            {
                continue;
            }
            created.push(self.create_category(user_id, default.into()).await?);
        }

        debug!("Created {} default categories for user: {}", created.len(), user_id);
        Ok(created)
    }

    /// List categories, seeding the defaults first if the user has none
    pub async fn ensure_defaults(&self, user_id: &str) -> StorageResult<Vec<Category>> {
        let existing = self.list_categories(user_id).await?;
        if !existing.is_empty() {
            return Ok(existing);
        }

        self.create_defaults(user_id).await?;
        self.list_categories(user_id).await
    }

    /// Find a category by name (ignoring case) or create it with the given look
    pub async fn get_or_create(
        &self,
        user_id: &str,
        name: &str,
        color: &str,
        icon: CategoryIcon,
    ) -> StorageResult<Category> {
        if let Some(existing) = self.get_category_by_name(user_id, name).await? {
            return Ok(existing);
        }

        self.create_category(
            user_id,
            CategoryCreateInput {
                name: name.to_string(),
                color: Some(color.to_string()),
                icon: Some(icon),
            },
        )
        .await
    }

    /// Convert a database row to a Category
    fn row_to_category(&self, row: &sqlx::sqlite::SqliteRow) -> StorageResult<Category> {
        let icon: String = row.try_get("icon")?;

        Ok(Category {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            color: row.try_get("color")?,
            icon: CategoryIcon::from_name(&icon),
            created_at: row.try_get("created_at")?,
            task_count: row.try_get("task_count")?,
        })
    }
}
