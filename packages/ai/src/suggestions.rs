// ABOUTME: Task suggestion client built on the chat completion service
// ABOUTME: Sanitizes provider output and substitutes a deterministic fallback on any failure

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use taskmind_core::{clamp_score, truncate, DEFAULT_PRIORITY};
use tracing::{info, warn};

use crate::service::{AIConfig, AIService, AIServiceResult};

pub const FALLBACK_CATEGORY: &str = "personal";
pub const FALLBACK_DEADLINE_DAYS: i64 = 7;
const MAX_DESCRIPTION_CHARS: usize = 200;
const DEFAULT_CONFIDENCE: i32 = 50;

/// Field proposals for a single task. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionResult {
    pub improved_description: String,
    pub priority_score: i32,
    pub suggested_deadline: DateTime<Utc>,
    pub suggested_category: String,
    pub confidence: i32,
}

impl SuggestionResult {
    /// The result used whenever the provider cannot be reached or understood
    pub fn fallback(title: &str, now: DateTime<Utc>) -> Self {
        Self {
            improved_description: title.to_string(),
            priority_score: DEFAULT_PRIORITY,
            suggested_deadline: now + Duration::days(FALLBACK_DEADLINE_DAYS),
            suggested_category: FALLBACK_CATEGORY.to_string(),
            confidence: 0,
        }
    }
}

/// Provider output before sanitizing. Every field is optional and scores may be floats.
#[derive(Debug, Deserialize)]
struct RawSuggestion {
    #[serde(default)]
    improved_description: Option<String>,
    #[serde(default)]
    priority_score: Option<f64>,
    #[serde(default)]
    suggested_deadline: Option<String>,
    #[serde(default)]
    suggested_category: Option<String>,
    #[serde(default)]
    confidence: Option<f64>,
}

impl RawSuggestion {
    fn sanitize(self, title: &str, now: DateTime<Utc>) -> SuggestionResult {
        let description = self
            .improved_description
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| title.to_string());

        let category = self
            .suggested_category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| FALLBACK_CATEGORY.to_string());

        let deadline = self
            .suggested_deadline
            .as_deref()
            .and_then(parse_deadline)
            .unwrap_or_else(|| now + Duration::days(FALLBACK_DEADLINE_DAYS));

        SuggestionResult {
            improved_description: truncate(&description, MAX_DESCRIPTION_CHARS),
            priority_score: score_or(self.priority_score, DEFAULT_PRIORITY),
            suggested_deadline: deadline,
            suggested_category: category,
            confidence: score_or(self.confidence, DEFAULT_CONFIDENCE),
        }
    }
}

pub(crate) fn score_or(value: Option<f64>, default: i32) -> i32 {
    match value {
        Some(v) if v.is_finite() => clamp_score(v.round() as i64),
        _ => default,
    }
}

/// Accepts RFC 3339, naive `YYYY-MM-DDTHH:MM:SS` (taken as UTC) and plain dates (midnight UTC)
pub(crate) fn parse_deadline(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn build_prompt(title: &str, context: &str) -> String {
    format!(
        r#"You are a smart task management assistant. Analyze the following task and provide suggestions:

Task: {title}
Context: {context}

Please provide a JSON response with:
- improved_description: A more detailed and clear description
- priority_score: A number from 0-100 indicating priority
- suggested_deadline: A suggested deadline in ISO format (within next 30 days)
- suggested_category: One of: work, personal, health, learning, finance, shopping, travel
- confidence: Your confidence level (0-100) in these suggestions

Keep suggestions practical and actionable. Return only valid JSON without any markdown formatting."#
    )
}

/// Requests task suggestions from the provider
#[derive(Debug, Clone)]
pub struct SuggestionClient {
    service: AIService,
}

impl SuggestionClient {
    pub fn new(service: AIService) -> Self {
        Self { service }
    }

    pub fn from_env() -> Self {
        Self::new(AIService::new())
    }

    pub fn with_api_key(api_key: String) -> Self {
        Self::new(AIService::with_api_key(api_key))
    }

    pub fn with_config(config: AIConfig) -> Self {
        Self::new(AIService::with_config(config))
    }

    pub fn is_configured(&self) -> bool {
        self.service.is_configured()
    }

    /// Always yields a result. Provider errors are logged and replaced by
    /// [`SuggestionResult::fallback`].
    pub async fn request_suggestions(&self, title: &str, context: &str) -> SuggestionResult {
        match self.try_request_suggestions(title, context).await {
            Ok(result) => {
                info!(
                    "Suggestion received: category={}, priority={}, confidence={}",
                    result.suggested_category, result.priority_score, result.confidence
                );
                result
            }
            Err(e) => {
                warn!("Using default suggestions for '{}': {}", title, e);
                SuggestionResult::fallback(title, Utc::now())
            }
        }
    }

    pub async fn try_request_suggestions(
        &self,
        title: &str,
        context: &str,
    ) -> AIServiceResult<SuggestionResult> {
        let response = self
            .service
            .generate_structured::<RawSuggestion>(build_prompt(title, context))
            .await?;

        Ok(response.data.sanitize(title, Utc::now()))
    }
}
