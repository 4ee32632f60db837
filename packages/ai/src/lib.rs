// ABOUTME: AI service integration for TaskMind
// ABOUTME: Chat completion client, task suggestions and context-to-task extraction

pub mod extraction;
pub mod service;
pub mod suggestions;

// Re-export service types
pub use service::{AIConfig, AIResponse, AIService, AIServiceError, AIServiceResult, Usage};

// Re-export suggestion types
pub use suggestions::{
    SuggestionClient, SuggestionResult, FALLBACK_CATEGORY, FALLBACK_DEADLINE_DAYS,
};

// Re-export extraction types
pub use extraction::{ExtractedTask, ExtractionResult, TaskExtractionClient};
