// ABOUTME: Integration tests for task storage and the draft submission flow
// ABOUTME: Tests CRUD, filters, status toggling, statistics and suggestion round-trips

use chrono::{Duration, NaiveDate, Utc};
use pretty_assertions::assert_eq;
use taskmind_ai::SuggestionResult;
use taskmind_categories::{Category, CategoryCreateInput, CategoryStorage};
use taskmind_storage::{connect_in_memory, StorageError};
use taskmind_tasks::{
    apply_suggestion, DraftField, PriorityBand, TaskCreateInput, TaskDraft, TaskFilter,
    TaskStatus, TaskStorage, TaskUpdateInput,
};

const USER: &str = "default-user";

struct Fixture {
    tasks: TaskStorage,
    categories: CategoryStorage,
    work: Category,
    home: Category,
}

async fn setup() -> Fixture {
    let pool = connect_in_memory().await.unwrap();
    let categories = CategoryStorage::new(pool.clone());
    let work = categories
        .create_category(USER, category_input("Work"))
        .await
        .unwrap();
    let home = categories
        .create_category(USER, category_input("Home"))
        .await
        .unwrap();

    Fixture {
        tasks: TaskStorage::new(pool),
        categories,
        work,
        home,
    }
}

fn category_input(name: &str) -> CategoryCreateInput {
    CategoryCreateInput {
        name: name.to_string(),
        color: None,
        icon: None,
    }
}

fn task_input(title: &str, category_id: &str, priority: i32) -> TaskCreateInput {
    TaskCreateInput {
        title: title.to_string(),
        description: None,
        priority: Some(priority),
        status: None,
        category_id: category_id.to_string(),
        due_date: None,
        ai_suggested: false,
    }
}

#[tokio::test]
async fn test_create_and_get_task() {
    let f = setup().await;

    let created = f
        .tasks
        .create_task(USER, task_input("  Write report ", &f.work.id, 85))
        .await
        .unwrap();

    assert_eq!(created.title, "Write report");
    assert_eq!(created.description, "");
    assert_eq!(created.status, TaskStatus::Pending);
    assert_eq!(created.priority_label, "High");
    assert_eq!(created.category_name.as_deref(), Some("Work"));
    assert_eq!(created.category_color.as_deref(), Some("#6B7280"));

    let fetched = f.tasks.get_task(USER, &created.id).await.unwrap();
    assert_eq!(fetched, created);

    let counted = f.categories.get_category(USER, &f.work.id).await.unwrap();
    assert_eq!(counted.task_count, 1);
}

#[tokio::test]
async fn test_create_clamps_priority() {
    let f = setup().await;
    let task = f
        .tasks
        .create_task(USER, task_input("Overeager", &f.work.id, 150))
        .await
        .unwrap();
    assert_eq!(task.priority, 100);
}

#[tokio::test]
async fn test_create_rejects_blank_title_and_unknown_category() {
    let f = setup().await;

    let blank = f
        .tasks
        .create_task(USER, task_input("   ", &f.work.id, 50))
        .await;
    assert!(matches!(blank, Err(StorageError::Validation(_))));

    let unknown = f
        .tasks
        .create_task(USER, task_input("Orphan", "cat-missing", 50))
        .await;
    assert!(matches!(unknown, Err(StorageError::InvalidReference(_))));

    let foreign = f
        .tasks
        .create_task("someone-else", task_input("Borrowed", &f.work.id, 50))
        .await;
    assert!(matches!(foreign, Err(StorageError::InvalidReference(_))));
}

#[tokio::test]
async fn test_update_task_fields() {
    let f = setup().await;
    let task = f
        .tasks
        .create_task(USER, task_input("Draft", &f.work.id, 50))
        .await
        .unwrap();
    let due = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();

    let updated = f
        .tasks
        .update_task(
            USER,
            &task.id,
            TaskUpdateInput {
                title: Some("Final".to_string()),
                priority: Some(-10),
                category_id: Some(f.home.id.clone()),
                due_date: Some(Some(due)),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.title, "Final");
    assert_eq!(updated.priority, 0);
    assert_eq!(updated.category_name.as_deref(), Some("Home"));
    assert_eq!(updated.due_date, Some(due));
    assert!(updated.updated_at >= task.updated_at);

    let cleared = f
        .tasks
        .update_task(
            USER,
            &task.id,
            TaskUpdateInput {
                due_date: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(cleared.due_date, None);
    assert_eq!(cleared.title, "Final");
}

#[tokio::test]
async fn test_update_rejects_blank_title_and_missing_task() {
    let f = setup().await;
    let task = f
        .tasks
        .create_task(USER, task_input("Keep me", &f.work.id, 50))
        .await
        .unwrap();

    let blank = f
        .tasks
        .update_task(
            USER,
            &task.id,
            TaskUpdateInput {
                title: Some("  ".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(blank, Err(StorageError::Validation(_))));

    let missing = f
        .tasks
        .update_task(USER, "nope", TaskUpdateInput::default())
        .await;
    assert!(matches!(missing, Err(StorageError::NotFound)));
}

#[tokio::test]
async fn test_delete_task() {
    let f = setup().await;
    let task = f
        .tasks
        .create_task(USER, task_input("Temporary", &f.work.id, 50))
        .await
        .unwrap();

    f.tasks.delete_task(USER, &task.id).await.unwrap();

    assert!(matches!(
        f.tasks.get_task(USER, &task.id).await,
        Err(StorageError::NotFound)
    ));
    assert!(matches!(
        f.tasks.delete_task(USER, &task.id).await,
        Err(StorageError::NotFound)
    ));

    // Category is free again once its last task is gone
    f.categories.delete_category(USER, &f.work.id).await.unwrap();
}

#[tokio::test]
async fn test_toggle_status_cycle() {
    let f = setup().await;
    let task = f
        .tasks
        .create_task(
            USER,
            TaskCreateInput {
                status: Some(TaskStatus::InProgress),
                ..task_input("Cycle", &f.work.id, 50)
            },
        )
        .await
        .unwrap();

    let first = f.tasks.toggle_status(USER, &task.id).await.unwrap();
    assert_eq!(first.status, TaskStatus::Completed);

    let second = f.tasks.toggle_status(USER, &task.id).await.unwrap();
    assert_eq!(second.status, TaskStatus::Pending);

    let third = f.tasks.toggle_status(USER, &task.id).await.unwrap();
    assert_eq!(third.status, TaskStatus::Completed);
}

#[tokio::test]
async fn test_list_filters() {
    let f = setup().await;
    let report = f
        .tasks
        .create_task(
            USER,
            TaskCreateInput {
                description: Some("Quarterly numbers".to_string()),
                ..task_input("Write report", &f.work.id, 90)
            },
        )
        .await
        .unwrap();
    let milk = f
        .tasks
        .create_task(USER, task_input("Buy milk", &f.home.id, 30))
        .await
        .unwrap();
    let review = f
        .tasks
        .create_task(
            USER,
            TaskCreateInput {
                status: Some(TaskStatus::Completed),
                ..task_input("Review PR", &f.work.id, 65)
            },
        )
        .await
        .unwrap();

    let all = f.tasks.list_tasks(USER, &TaskFilter::default()).await.unwrap();
    let ids: Vec<_> = all.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec![review.id.as_str(), milk.id.as_str(), report.id.as_str()]);

    let by_category = f
        .tasks
        .list_tasks(
            USER,
            &TaskFilter {
                category_id: Some(f.home.id.clone()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(by_category.len(), 1);
    assert_eq!(by_category[0].id, milk.id);

    let completed = f
        .tasks
        .list_tasks(
            USER,
            &TaskFilter {
                status: Some(TaskStatus::Completed),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].id, review.id);

    for (band, expected) in [
        (PriorityBand::High, &report.id),
        (PriorityBand::Medium, &review.id),
        (PriorityBand::Low, &milk.id),
    ] {
        let found = f
            .tasks
            .list_tasks(
                USER,
                &TaskFilter {
                    priority: Some(band),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(found.len(), 1, "band {:?}", band);
        assert_eq!(&found[0].id, expected);
    }

    let search = f
        .tasks
        .list_tasks(
            USER,
            &TaskFilter {
                search: Some("QUARTERLY".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(search.len(), 1);
    assert_eq!(search[0].id, report.id);

    let other_user = f
        .tasks
        .list_tasks("someone-else", &TaskFilter::default())
        .await
        .unwrap();
    assert!(other_user.is_empty());
}

#[tokio::test]
async fn test_stats_count_overdue() {
    let f = setup().await;
    let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
    let yesterday = today - Duration::days(1);

    for (title, status, due) in [
        ("Late", TaskStatus::Pending, Some(yesterday)),
        ("Late but done", TaskStatus::Completed, Some(yesterday)),
        ("Due today", TaskStatus::InProgress, Some(today)),
        ("Someday", TaskStatus::Pending, None),
    ] {
        f.tasks
            .create_task(
                USER,
                TaskCreateInput {
                    status: Some(status),
                    due_date: due,
                    ..task_input(title, &f.work.id, 50)
                },
            )
            .await
            .unwrap();
    }

    let stats = f.tasks.get_stats_as_of(USER, today).await.unwrap();
    assert_eq!(stats.total, 4);
    assert_eq!(stats.pending, 2);
    assert_eq!(stats.in_progress, 1);
    assert_eq!(stats.completed, 1);
    assert_eq!(stats.overdue, 1);

    let empty = f.tasks.get_stats("someone-else").await.unwrap();
    assert_eq!(empty.total, 0);
    assert_eq!(empty.overdue, 0);
}

#[tokio::test]
async fn test_suggested_draft_is_submitted() {
    let f = setup().await;
    let known = f.categories.list_categories(USER).await.unwrap();
    let suggestion = SuggestionResult {
        improved_description: "Buy 2L of milk on the way home".to_string(),
        priority_score: 30,
        suggested_deadline: Utc::now() + Duration::days(2),
        suggested_category: "home".to_string(),
        confidence: 75,
    };

    let draft = TaskDraft::new().with_field(DraftField::Title("Buy milk".to_string()));
    let draft = apply_suggestion(draft, &suggestion, &known);
    let submission = draft.to_submission().unwrap();

    let task = f
        .tasks
        .create_task(USER, submission.into_create_input())
        .await
        .unwrap();

    assert_eq!(task.category_id, f.home.id);
    assert_eq!(task.description, "Buy 2L of milk on the way home");
    assert_eq!(task.due_date, Some(suggestion.suggested_deadline.date_naive()));
    assert!(task.ai_suggested);
}

#[tokio::test]
async fn test_edit_existing_task_through_draft() {
    let f = setup().await;
    let task = f
        .tasks
        .create_task(
            USER,
            TaskCreateInput {
                status: Some(TaskStatus::InProgress),
                ..task_input("Plan trip", &f.home.id, 40)
            },
        )
        .await
        .unwrap();

    let mut draft = TaskDraft::from_task(&task);
    draft.set_field(DraftField::Priority(75));
    let submission = draft.to_submission().unwrap();
    let id = submission.id.clone().unwrap();

    let updated = f
        .tasks
        .update_task(USER, &id, submission.into_update_input())
        .await
        .unwrap();

    assert_eq!(updated.priority, 75);
    assert_eq!(updated.status, TaskStatus::InProgress);
    assert_eq!(updated.title, "Plan trip");
}
