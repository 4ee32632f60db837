// ABOUTME: One-shot commands run outside the HTTP server
// ABOUTME: Requests task suggestions and ingests context from the terminal

use std::sync::Arc;

use colored::*;

use taskmind_ai::{AIConfig, SuggestionClient, SuggestionResult, TaskExtractionClient};
use taskmind_context::{
    AiTaskExtractor, ContextStorage, ContextType, ContextWorkflow, SubmitOutcome,
};
use taskmind_storage::SqlitePool;
use taskmind_tasks::priority_label;

/// Ask the provider for suggestions on a single title
pub async fn suggest(title: &str, context: &str) -> SuggestionResult {
    SuggestionClient::with_config(AIConfig::from_env())
        .request_suggestions(title, context)
        .await
}

/// Store `content` and extract tasks from it
pub async fn ingest(
    pool: SqlitePool,
    content: &str,
    entry_type: ContextType,
) -> anyhow::Result<SubmitOutcome> {
    let client = TaskExtractionClient::with_config(AIConfig::from_env());
    let extractor = Arc::new(AiTaskExtractor::from_pool(client, pool.clone()));
    let workflow = ContextWorkflow::new(Arc::new(ContextStorage::new(pool)), extractor);

    Ok(workflow.submit_context(content, entry_type).await?)
}

pub fn print_suggestion(title: &str, result: &SuggestionResult) {
    println!("{} {}", "Suggestions for".bold(), title.cyan());
    println!("{:<12} {}", "Description:".cyan(), result.improved_description);
    println!(
        "{:<12} {} ({})",
        "Priority:".cyan(),
        result.priority_score,
        priority_label(result.priority_score)
    );
    println!(
        "{:<12} {}",
        "Deadline:".cyan(),
        result.suggested_deadline.date_naive()
    );
    println!("{:<12} {}", "Category:".cyan(), result.suggested_category);

    let confidence = format!("{}%", result.confidence);
    let confidence = if result.confidence == 0 {
        format!("{} (provider unavailable, defaults used)", confidence).yellow()
    } else {
        confidence.green()
    };
    println!("{:<12} {}", "Confidence:".cyan(), confidence);
}

pub fn print_outcome(outcome: &SubmitOutcome) {
    println!(
        "{} {} task(s) from entry {}",
        "Created".green().bold(),
        outcome.created_task_count,
        outcome.entry_id.dimmed()
    );
    println!("{:<12} {}", "Summary:".cyan(), outcome.summary);
    println!("{:<12} {}%", "Confidence:".cyan(), outcome.confidence);

    for task in &outcome.tasks {
        println!(
            "  {} {} [{}] {}",
            "•".cyan(),
            task.title,
            task.category_name.as_deref().unwrap_or("-"),
            task.priority_label.dimmed()
        );
    }
}
