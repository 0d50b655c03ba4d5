use super::CompletionService;
use crate::config::Config;
use crate::error::{completion_error, AppResult};
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// OpenAI chat completions API endpoint URL
pub const CHAT_COMPLETIONS_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// Instruction prompt for event extraction.
///
/// The field names, null-for-unknown policy, full-day default span and the
/// embedded example are a contract: the extraction behavior lives entirely in
/// the model's interpretation of this text.
pub const SYSTEM_PROMPT: &str = r#"Extract event details from text. Return a JSON object with these keys: "title", "start", "end", and "description".
* "start" and "end" MUST be ISO 8601 datetime strings (e.g., "2024-10-27T10:00:00Z" or "2024-10-27T10:00:00-07:00"). Include the time even if it's all-day.
* If no time is specified, the event should be from 00:00:00 to 23:59:59 of the specified date.
* If any field (title, start, end, or description) cannot be reasonably determined, use null as the value.
* Ensure the JSON is valid and parsable.
* Optionally, if you can identify the timezone, include it
* Example:
  ```json
  {
    "title": "Meeting with John",
    "start": "2024-10-28T14:00:00-05:00",
    "end": "2024-10-28T15:00:00-05:00",
    "timezone": "America/New_York",
    "description": "Discuss project updates"
  }
  ```
"#;

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

/// Constrains the model to emit a single JSON object
#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

/// Completion service backed by the OpenAI chat completions API
pub struct OpenAiCompletion {
    client: Client,
    api_key: String,
    model: String,
}

impl OpenAiCompletion {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            api_key: config.openai_api_key.clone(),
            model: config.openai_model.clone(),
        }
    }
}

#[async_trait::async_trait]
impl CompletionService for OpenAiCompletion {
    async fn complete(&self, text: &str) -> AppResult<String> {
        info!("Requesting event extraction with model {}", self.model);

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: text.to_string(),
                },
            ],
            response_format: ResponseFormat {
                kind: "json_object".to_string(),
            },
        };

        let res = self
            .client
            .post(CHAT_COMPLETIONS_ENDPOINT)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(header::ACCEPT, "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| completion_error(&format!("Failed to reach completion service: {e}")))?;

        if !res.status().is_success() {
            let status = res.status();
            let error_body = res.text().await.unwrap_or_default();
            return Err(completion_error(&format!(
                "Completion service returned status {status}: {error_body}"
            )));
        }

        let response: ChatResponse = res
            .json()
            .await
            .map_err(|e| completion_error(&format!("Failed to parse completion response: {e}")))?;

        let content = response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| completion_error("Completion response contained no choices"))?;

        debug!("Model output: {}", content);
        Ok(content)
    }
}
