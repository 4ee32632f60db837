// ABOUTME: Integration tests for category storage operations
// ABOUTME: Tests CRUD, default seeding, name lookups and deletion validation

use taskmind_categories::{
    CategoryCreateInput, CategoryIcon, CategoryStorage, CategoryUpdateInput, DEFAULT_CATEGORIES,
};
use taskmind_storage::{connect_in_memory, SqlitePool, StorageError};

const USER: &str = "default-user";

async fn setup() -> (SqlitePool, CategoryStorage) {
    let pool = connect_in_memory().await.unwrap();
    let storage = CategoryStorage::new(pool.clone());
    (pool, storage)
}

fn input(name: &str) -> CategoryCreateInput {
    CategoryCreateInput {
        name: name.to_string(),
        color: None,
        icon: None,
    }
}

#[tokio::test]
async fn test_create_category_applies_defaults() {
    let (_pool, storage) = setup().await;

    let category = storage.create_category(USER, input("  Errands ")).await.unwrap();

    assert!(category.id.starts_with("cat-"));
    assert_eq!(category.name, "Errands");
    assert_eq!(category.color, "#6B7280");
    assert_eq!(category.icon, CategoryIcon::Folder);
    assert_eq!(category.task_count, 0);
}

#[tokio::test]
async fn test_duplicate_name_is_rejected() {
    let (_pool, storage) = setup().await;

    storage.create_category(USER, input("Work")).await.unwrap();
    let err = storage.create_category(USER, input("Work")).await.unwrap_err();

    assert!(matches!(err, StorageError::DuplicateName(name) if name == "Work"));
}

#[tokio::test]
async fn test_same_name_allowed_for_other_user() {
    let (_pool, storage) = setup().await;

    storage.create_category(USER, input("Work")).await.unwrap();
    storage.create_category("someone-else", input("Work")).await.unwrap();

    assert_eq!(storage.list_categories(USER).await.unwrap().len(), 1);
    assert_eq!(storage.list_categories("someone-else").await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_list_categories_sorted_by_name() {
    let (_pool, storage) = setup().await;

    for name in ["Travel", "Finance", "Health"] {
        storage.create_category(USER, input(name)).await.unwrap();
    }

    let names: Vec<String> = storage
        .list_categories(USER)
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();

    assert_eq!(names, vec!["Finance", "Health", "Travel"]);
}

#[tokio::test]
async fn test_get_category_by_name_ignores_case() {
    let (_pool, storage) = setup().await;

    let created = storage.create_category(USER, input("Shopping")).await.unwrap();

    let found = storage.get_category_by_name(USER, "shopping").await.unwrap();
    assert_eq!(found.unwrap().id, created.id);

    let missing = storage.get_category_by_name(USER, "Groceries").await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_get_missing_category_is_not_found() {
    let (_pool, storage) = setup().await;

    let err = storage.get_category(USER, "cat-missing").await.unwrap_err();
    assert!(matches!(err, StorageError::NotFound));
}

#[tokio::test]
async fn test_update_category() {
    let (_pool, storage) = setup().await;

    let created = storage.create_category(USER, input("Hobby")).await.unwrap();
    let updated = storage
        .update_category(
            USER,
            &created.id,
            CategoryUpdateInput {
                name: Some("Hobbies".to_string()),
                color: Some("#000000".to_string()),
                icon: Some(CategoryIcon::Heart),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Hobbies");
    assert_eq!(updated.color, "#000000");
    assert_eq!(updated.icon, CategoryIcon::Heart);

    let unchanged = storage
        .update_category(USER, &created.id, CategoryUpdateInput::default())
        .await
        .unwrap();
    assert_eq!(unchanged.name, "Hobbies");
}

#[tokio::test]
async fn test_update_missing_category_is_not_found() {
    let (_pool, storage) = setup().await;

    let err = storage
        .update_category(
            USER,
            "cat-missing",
            CategoryUpdateInput {
                color: Some("#111111".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, StorageError::NotFound));
}

#[tokio::test]
async fn test_unknown_stored_icon_reads_as_folder() {
    let (pool, storage) = setup().await;

    let created = storage.create_category(USER, input("Misc")).await.unwrap();
    sqlx::query("UPDATE categories SET icon = 'sparkles' WHERE id = ?")
        .bind(&created.id)
        .execute(&pool)
        .await
        .unwrap();

    let fetched = storage.get_category(USER, &created.id).await.unwrap();
    assert_eq!(fetched.icon, CategoryIcon::Folder);
}

#[tokio::test]
async fn test_create_defaults_only_once() {
    let (_pool, storage) = setup().await;

    storage.create_category(USER, input("Work")).await.unwrap();

    let first = storage.create_defaults(USER).await.unwrap();
    assert_eq!(first.len(), DEFAULT_CATEGORIES.len() - 1);
    assert!(first.iter().all(|c| c.name != "Work"));

    let second = storage.create_defaults(USER).await.unwrap();
    assert!(second.is_empty());

    assert_eq!(
        storage.list_categories(USER).await.unwrap().len(),
        DEFAULT_CATEGORIES.len()
    );
}

#[tokio::test]
async fn test_ensure_defaults_seeds_empty_user_only() {
    let (_pool, storage) = setup().await;

    let seeded = storage.ensure_defaults(USER).await.unwrap();
    assert_eq!(seeded.len(), DEFAULT_CATEGORIES.len());

    let travel = seeded.iter().find(|c| c.name == "Travel").unwrap();
    assert_eq!(travel.icon, CategoryIcon::Plane);
    assert_eq!(travel.color, "#06B6D4");

    let other = "other-user";
    storage.create_category(other, input("Only")).await.unwrap();
    let untouched = storage.ensure_defaults(other).await.unwrap();
    assert_eq!(untouched.len(), 1);
}

#[tokio::test]
async fn test_get_or_create_reuses_existing() {
    let (_pool, storage) = setup().await;

    let existing = storage.create_category(USER, input("work")).await.unwrap();
    let found = storage
        .get_or_create(USER, "Work", "#6B7280", CategoryIcon::Folder)
        .await
        .unwrap();
    assert_eq!(found.id, existing.id);

    let created = storage
        .get_or_create(USER, "Learning", "#6B7280", CategoryIcon::Folder)
        .await
        .unwrap();
    assert_ne!(created.id, existing.id);
    assert_eq!(created.name, "Learning");
}

#[tokio::test]
async fn test_delete_category_in_use_is_refused() {
    let (pool, storage) = setup().await;

    let category = storage.create_category(USER, input("Work")).await.unwrap();
    sqlx::query(
        r#"
        INSERT INTO tasks (id, user_id, title, category_id, created_at, updated_at)
        VALUES ('task-1', ?, 'Write report', ?, '2025-01-01T00:00:00Z', '2025-01-01T00:00:00Z')
        "#,
    )
    .bind(USER)
    .bind(&category.id)
    .execute(&pool)
    .await
    .unwrap();

    let counted = storage.get_category(USER, &category.id).await.unwrap();
    assert_eq!(counted.task_count, 1);

    let err = storage.delete_category(USER, &category.id).await.unwrap_err();
    assert!(matches!(err, StorageError::InUse(_)));

    sqlx::query("DELETE FROM tasks").execute(&pool).await.unwrap();
    storage.delete_category(USER, &category.id).await.unwrap();

    let err = storage.get_category(USER, &category.id).await.unwrap_err();
    assert!(matches!(err, StorageError::NotFound));
}
