// ABOUTME: Core constants and utilities for TaskMind
// ABOUTME: Foundational package providing shared helpers across all TaskMind packages

pub mod constants;
pub mod utils;

// Re-export constants
pub use constants::{
    database_file, taskmind_dir, DEFAULT_PRIORITY, DEFAULT_USER_ID, MAX_PRIORITY, MIN_PRIORITY,
};

// Re-export utilities
pub use utils::{clamp_score, generate_id, title_case, truncate};
