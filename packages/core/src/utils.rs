// ABOUTME: Shared utility functions for TaskMind
// ABOUTME: ID generation, score clamping and text helpers

use crate::constants::{MAX_PRIORITY, MIN_PRIORITY};

/// Generate an opaque row id, optionally namespaced (`cat-`, `ctx-`)
pub fn generate_id(prefix: Option<&str>) -> String {
    match prefix {
        Some(prefix) => format!("{}-{}", prefix, nanoid::nanoid!()),
        None => nanoid::nanoid!(),
    }
}

/// Clamp a 0-100 score coming from user input or a model response
pub fn clamp_score(value: i64) -> i32 {
    value.clamp(MIN_PRIORITY as i64, MAX_PRIORITY as i64) as i32
}

/// Truncate to at most `max_chars` characters, respecting char boundaries
pub fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// "shopping list" -> "Shopping List"
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(|c| c.to_lowercase()))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
