// ABOUTME: Data layer and persistence for TaskMind
// ABOUTME: SQLite pool setup, embedded migrations and the shared storage error type

pub mod db;
pub mod error;

pub use db::{connect, connect_in_memory, run_migrations};
pub use error::{StorageError, StorageResult};

// Re-export so dependents do not need their own sqlx pin for the pool type
pub use sqlx::SqlitePool;
