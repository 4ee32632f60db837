// ABOUTME: AI service for making structured generation calls to an OpenAI-compatible API
// ABOUTME: Handles API requests, response parsing, and usage reporting

use std::env;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, info};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_MAX_TOKENS: u32 = 500;
const DEFAULT_TEMPERATURE: f32 = 0.7;
const REQUEST_TIMEOUT_SECS: u64 = 60;
const CONNECT_TIMEOUT_SECS: u64 = 10;
const SYSTEM_PROMPT: &str =
    "You are a helpful task management assistant. Always respond with valid JSON.";

#[derive(Debug, Error)]
pub enum AIServiceError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("No API key configured")]
    NoApiKey,

    #[error("Invalid response format")]
    InvalidResponse,
}

pub type AIServiceResult<T> = Result<T, AIServiceError>;

/// Provider settings. A missing key is a valid configuration: callers fall
/// back to their default results.
#[derive(Debug, Clone)]
pub struct AIConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

impl AIConfig {
    /// Read `OPENAI_API_KEY`, `OPENAI_MODEL` and `OPENAI_BASE_URL`
    pub fn from_env() -> Self {
        let api_key = env::var("OPENAI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());
        let model = env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let base_url = env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        Self {
            api_key,
            model,
            base_url,
        }
    }
}

impl Default for AIConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl Usage {
    pub fn total_tokens(&self) -> u32 {
        self.prompt_tokens + self.completion_tokens
    }
}

#[derive(Debug)]
pub struct AIResponse<T> {
    pub data: T,
    pub usage: Usage,
}

/// Chat completion client shared by the suggestion and extraction clients
#[derive(Debug, Clone)]
pub struct AIService {
    client: Client,
    config: AIConfig,
}

impl AIService {
    /// Create HTTP client with timeout configuration
    fn create_client() -> Client {
        Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .unwrap_or_default()
    }

    /// Creates a new AI service instance from environment variables
    pub fn new() -> Self {
        let config = AIConfig::from_env();
        if config.api_key.is_none() {
            info!("OPENAI_API_KEY not set - AI features will return default suggestions");
        }
        if config.model != DEFAULT_MODEL {
            info!("Using custom model: {}", config.model);
        }

        Self::with_config(config)
    }

    /// Creates a new AI service instance with a specific API key
    pub fn with_api_key(api_key: String) -> Self {
        Self::with_config(AIConfig {
            api_key: Some(api_key),
            ..AIConfig::default()
        })
    }

    pub fn with_config(config: AIConfig) -> Self {
        Self {
            client: Self::create_client(),
            config,
        }
    }

    /// Get the model being used by this service
    pub fn model(&self) -> &str {
        &self.config.model
    }

    pub fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    /// Makes a structured generation call.
    /// The prompt should request JSON output and the response will be parsed.
    pub async fn generate_structured<T: for<'de> Deserialize<'de>>(
        &self,
        prompt: String,
    ) -> AIServiceResult<AIResponse<T>> {
        let api_key = self
            .config
            .api_key
            .as_ref()
            .ok_or(AIServiceError::NoApiKey)?;

        let request = ChatRequest {
            model: self.config.model.clone(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            messages: vec![
                Message {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                Message {
                    role: "user".to_string(),
                    content: prompt,
                },
            ],
        };

        info!(
            "Making chat completion request: model={}, max_tokens={}",
            request.model, request.max_tokens
        );

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    error!("Chat completion request timed out after {}s", REQUEST_TIMEOUT_SECS);
                    AIServiceError::ApiError(format!(
                        "Request timed out after {} seconds",
                        REQUEST_TIMEOUT_SECS
                    ))
                } else if e.is_connect() {
                    error!("Failed to connect to AI provider: {}", e);
                    AIServiceError::ApiError(format!("Connection failed: {}", e))
                } else {
                    error!("Chat completion request failed: {}", e);
                    AIServiceError::RequestFailed(e)
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("AI provider error: {} - {}", status, error_text);
            return Err(AIServiceError::ApiError(format!(
                "API returned {}: {}",
                status, error_text
            )));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| AIServiceError::ParseError(e.to_string()))?;

        let text = chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(AIServiceError::InvalidResponse)?;

        let json_text = strip_code_fences(&text);
        debug!(
            "Raw JSON response (first 500 chars): {}",
            json_text.chars().take(500).collect::<String>()
        );

        let data: T = serde_json::from_str(json_text).map_err(|e| {
            error!("JSON parsing failed: {}", e);
            AIServiceError::ParseError(format!("Failed to parse JSON: {}", e))
        })?;

        let usage = chat_response.usage.unwrap_or_default();
        info!("Chat completion used {} tokens", usage.total_tokens());

        Ok(AIResponse { data, usage })
    }
}

impl Default for AIService {
    fn default() -> Self {
        Self::new()
    }
}

/// Strip markdown code fences if present (```json ... ```)
pub(crate) fn strip_code_fences(text: &str) -> &str {
    let cleaned = text.trim();
    if !cleaned.starts_with("```") {
        return cleaned;
    }

    // Skip the opening fence line, then cut at the closing fence
    let start = cleaned.find('\n').map(|i| i + 1).unwrap_or(cleaned.len());
    let body = &cleaned[start..];
    let end = body.rfind("```").unwrap_or(body.len());
    body[..end].trim()
}
