// ABOUTME: Merges an AI suggestion into a task draft
// ABOUTME: Category name matching, priority clamping, deadline normalization and provenance

use taskmind_ai::SuggestionResult;
use taskmind_categories::{find_by_name, Category};
use taskmind_core::clamp_score;

use crate::draft::TaskDraft;

/// Apply `result` to `draft`.
///
/// The suggested category only takes effect when it names one of `known`
/// (ignoring case and surrounding whitespace, first match wins); otherwise the
/// draft keeps its category. The result is marked `ai_suggested`, and applying
/// the same suggestion again changes nothing.
pub fn apply_suggestion(
    mut draft: TaskDraft,
    result: &SuggestionResult,
    known: &[Category],
) -> TaskDraft {
    if let Some(category) = find_by_name(known, &result.suggested_category) {
        draft.category_id = Some(category.id.clone());
    }

    draft.description = result.improved_description.clone();
    draft.priority = clamp_score(result.priority_score as i64);
    draft.due_date = Some(result.suggested_deadline.date_naive());
    draft.ai_suggested = true;

    draft
}
