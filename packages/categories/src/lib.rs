// ABOUTME: Category management for grouping tasks
// ABOUTME: Provides types, the default category set and the storage layer

pub mod storage;
pub mod types;

// Re-export main types
pub use storage::CategoryStorage;
pub use types::{
    find_by_name, Category, CategoryCreateInput, CategoryIcon, CategoryUpdateInput,
    DefaultCategory, DEFAULT_CATEGORIES, DEFAULT_COLOR,
};
