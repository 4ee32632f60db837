// ABOUTME: Shared constants and well-known paths
// ABOUTME: Data directory resolution, default user scope and priority bounds

use std::env;
use std::path::PathBuf;

/// Every row is scoped to this user until authentication is added.
pub const DEFAULT_USER_ID: &str = "default-user";

pub const MIN_PRIORITY: i32 = 0;
pub const MAX_PRIORITY: i32 = 100;
/// Priority given to fresh drafts and to anything the provider left out
pub const DEFAULT_PRIORITY: i32 = 50;

/// Get the path to the TaskMind directory (~/.taskmind)
pub fn taskmind_dir() -> PathBuf {
    // First try HOME environment variable (useful for tests)
    if let Ok(home) = env::var("HOME") {
        PathBuf::from(home).join(".taskmind")
    } else {
        dirs::home_dir()
            .unwrap_or_else(env::temp_dir)
            .join(".taskmind")
    }
}

/// Get the default database location (~/.taskmind/taskmind.db)
pub fn database_file() -> PathBuf {
    taskmind_dir().join("taskmind.db")
}
