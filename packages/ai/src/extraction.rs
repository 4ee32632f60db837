// ABOUTME: Context-to-task extraction client built on the chat completion service
// ABOUTME: Turns free text into up to five task proposals with a summary and confidence

use serde::{Deserialize, Serialize};
use taskmind_core::{truncate, DEFAULT_PRIORITY};
use tracing::{info, warn};

use crate::service::{AIConfig, AIService, AIServiceResult};
use crate::suggestions::{score_or, FALLBACK_CATEGORY};

const MAX_TITLE_CHARS: usize = 200;
const MAX_DESCRIPTION_CHARS: usize = 500;
const MAX_SUMMARY_CHARS: usize = 300;
const DEFAULT_SUMMARY: &str = "Content processed";
const DEFAULT_CONFIDENCE: i32 = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedTask {
    pub title: String,
    pub description: String,
    pub priority_score: i32,
    pub suggested_category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub extracted_tasks: Vec<ExtractedTask>,
    pub summary: String,
    pub confidence: i32,
}

impl ExtractionResult {
    /// A single review task standing in for the content when the provider fails
    pub fn fallback(content_type: &str) -> Self {
        Self {
            extracted_tasks: vec![ExtractedTask {
                title: format!("Review {} content", content_type),
                description: format!("Process and act on the {} content provided", content_type),
                priority_score: DEFAULT_PRIORITY,
                suggested_category: FALLBACK_CATEGORY.to_string(),
            }],
            summary: format!("Content from {} needs review", content_type),
            confidence: 0,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawExtraction {
    #[serde(default)]
    extracted_tasks: Vec<RawTask>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    confidence: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawTask {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    priority_score: Option<f64>,
    #[serde(default)]
    suggested_category: Option<String>,
}

impl RawExtraction {
    fn sanitize(self) -> ExtractionResult {
        let extracted_tasks = self
            .extracted_tasks
            .into_iter()
            .filter_map(|task| {
                let title = task.title.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())?;
                Some(ExtractedTask {
                    title: truncate(&title, MAX_TITLE_CHARS),
                    description: truncate(
                        task.description.as_deref().unwrap_or_default(),
                        MAX_DESCRIPTION_CHARS,
                    ),
                    priority_score: score_or(task.priority_score, DEFAULT_PRIORITY),
                    suggested_category: task
                        .suggested_category
                        .map(|c| c.trim().to_string())
                        .filter(|c| !c.is_empty())
                        .unwrap_or_else(|| FALLBACK_CATEGORY.to_string()),
                })
            })
            .collect();

        let summary = self.summary.unwrap_or_else(|| DEFAULT_SUMMARY.to_string());

        ExtractionResult {
            extracted_tasks,
            summary: truncate(&summary, MAX_SUMMARY_CHARS),
            confidence: score_or(self.confidence, DEFAULT_CONFIDENCE),
        }
    }
}

fn build_prompt(content: &str, content_type: &str) -> String {
    format!(
        r#"Analyze the following {content_type} content and extract actionable tasks:

Content: {content}

Please provide a JSON response with:
- extracted_tasks: Array of task objects, each with:
  - title: Clear, actionable task title
  - description: Brief description
  - priority_score: Priority from 0-100
  - suggested_category: One of: work, personal, health, learning, finance, shopping, travel
- summary: Brief summary of the content
- confidence: Your confidence level (0-100) in the extraction

Extract 1-5 most important actionable tasks. Return only valid JSON without any markdown formatting."#
    )
}

#[derive(Debug, Clone)]
pub struct TaskExtractionClient {
    service: AIService,
}

impl TaskExtractionClient {
    pub fn new(service: AIService) -> Self {
        Self { service }
    }

    pub fn from_env() -> Self {
        Self::new(AIService::new())
    }

    pub fn with_config(config: AIConfig) -> Self {
        Self::new(AIService::with_config(config))
    }

    /// Never fails; provider errors produce [`ExtractionResult::fallback`]
    pub async fn extract_tasks(&self, content: &str, content_type: &str) -> ExtractionResult {
        info!(
            "Processing context: type='{}', content length={}",
            content_type,
            content.chars().count()
        );

        match self.try_extract_tasks(content, content_type).await {
            Ok(result) => {
                info!(
                    "Extracted {} tasks (confidence {})",
                    result.extracted_tasks.len(),
                    result.confidence
                );
                result
            }
            Err(e) => {
                warn!("Using default context processing: {}", e);
                ExtractionResult::fallback(content_type)
            }
        }
    }

    pub async fn try_extract_tasks(
        &self,
        content: &str,
        content_type: &str,
    ) -> AIServiceResult<ExtractionResult> {
        let response = self
            .service
            .generate_structured::<RawExtraction>(build_prompt(content, content_type))
            .await?;
        Ok(response.data.sanitize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fallback_for_email() {
        let result = ExtractionResult::fallback("email");
        assert_eq!(result.extracted_tasks.len(), 1);
        assert_eq!(result.extracted_tasks[0].title, "Review email content");
        assert_eq!(
            result.extracted_tasks[0].description,
            "Process and act on the email content provided"
        );
        assert_eq!(result.summary, "Content from email needs review");
        assert_eq!(result.confidence, 0);
    }

    #[test]
    fn test_sanitize_drops_untitled_tasks() {
        let raw: RawExtraction = serde_json::from_str(
            r#"{
                "extracted_tasks": [
                    {"title": "Send invoice", "priority_score": 120, "suggested_category": "finance"},
                    {"title": "  ", "description": "nothing"},
                    {"description": "no title"}
                ],
                "confidence": -3
            }"#,
        )
        .unwrap();

        let result = raw.sanitize();
        assert_eq!(
            result.extracted_tasks,
            vec![ExtractedTask {
                title: "Send invoice".to_string(),
                description: String::new(),
                priority_score: 100,
                suggested_category: "finance".to_string(),
            }]
        );
        assert_eq!(result.summary, "Content processed");
        assert_eq!(result.confidence, 0);
    }

    #[test]
    fn test_sanitize_truncates_long_fields() {
        let raw = RawExtraction {
            extracted_tasks: vec![RawTask {
                title: Some("t".repeat(250)),
                description: Some("d".repeat(600)),
                priority_score: None,
                suggested_category: None,
            }],
            summary: Some("s".repeat(400)),
            confidence: Some(70.0),
        };
        let result = raw.sanitize();
        let task = &result.extracted_tasks[0];
        assert_eq!(task.title.chars().count(), 200);
        assert_eq!(task.description.chars().count(), 500);
        assert_eq!(task.priority_score, 50);
        assert_eq!(task.suggested_category, "personal");
        assert_eq!(result.summary.chars().count(), 300);
        assert_eq!(result.confidence, 70);
    }
}
