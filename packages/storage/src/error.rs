// ABOUTME: Storage error type shared by every persistence layer
// ABOUTME: Maps sqlx constraint failures onto domain-level variants

use thiserror::Error;

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Database error: {0}")]
    Database(String),
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("Sqlx error: {0}")]
    Sqlx(sqlx::Error),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Record not found")]
    NotFound,
    #[error("Duplicate name: {0}")]
    DuplicateName(String),
    #[error("{0} is still referenced and cannot be removed")]
    InUse(String),
    #[error("Unknown reference: {0}")]
    InvalidReference(String),
    #[error("Invalid input: {0}")]
    Validation(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StorageError::NotFound,
            other => StorageError::Sqlx(other),
        }
    }
}

impl StorageError {
    /// Classify a failed insert/update, naming the offending value when the
    /// database reports a uniqueness or foreign key violation
    pub fn from_write(err: sqlx::Error, value: &str) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return StorageError::DuplicateName(value.to_string());
            }
            if db_err.is_foreign_key_violation() {
                return StorageError::InvalidReference(value.to_string());
            }
        }
        StorageError::from(err)
    }
}
