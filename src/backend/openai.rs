//! OpenAI-compatible API backend
//!
//! Implements both collaborator traits by making HTTP calls to any
//! OpenAI-compatible chat-completions endpoint (OpenAI, Ollama, vLLM,
//! LM Studio, etc.). One instance can serve as the response generator,
//! the trait scorer, or both.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::BackendSettings;
use crate::error::{Error, Result};
use crate::types::{Dimension, PersonaProfile};

use super::{ResponseGenerator, TraitScorer};

// ─────────────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────────────

/// Configuration for the OpenAI-compatible backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    /// API base URL (e.g., "https://api.openai.com/v1", "http://localhost:11434/v1")
    pub base_url: String,

    /// API key (empty string for local servers like Ollama)
    pub api_key: String,

    /// Model identifier (e.g., "gpt-4o-mini", "llama3")
    pub model: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Maximum retries on transient errors
    pub max_retries: u32,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: String::new(),
            model: "gpt-4o-mini".to_string(),
            timeout_secs: 120,
            max_retries: 2,
        }
    }
}

impl From<&BackendSettings> for OpenAiConfig {
    fn from(settings: &BackendSettings) -> Self {
        Self {
            base_url: settings.base_url.clone(),
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
            timeout_secs: settings.timeout_secs,
            max_retries: settings.max_retries,
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// API types (request/response)
// ─────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// Outcome of a failed request, kept until retries are exhausted.
struct RequestFailure {
    timed_out: bool,
    message: String,
}

// ─────────────────────────────────────────────────────────────────
// Backend
// ─────────────────────────────────────────────────────────────────

/// OpenAI-compatible backend serving both collaborator roles
pub struct OpenAiBackend {
    config: OpenAiConfig,
    client: Client,
}

impl OpenAiBackend {
    /// Create a new backend with the given configuration
    pub fn new(config: OpenAiConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();

        debug!(
            base_url = %config.base_url,
            model = %config.model,
            "OpenAI-compatible backend created"
        );

        Self { config, client }
    }

    /// Build the authorization header value (if API key is set)
    fn auth_header(&self) -> Option<String> {
        if self.config.api_key.is_empty() {
            None
        } else {
            Some(format!("Bearer {}", self.config.api_key))
        }
    }

    /// Make a chat completion request with bounded retry on transient errors
    async fn chat_completion(
        &self,
        messages: Vec<ChatMessage>,
        max_tokens: Option<u32>,
    ) -> std::result::Result<String, RequestFailure> {
        let url = format!("{}/chat/completions", self.config.base_url);
        let request_body = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages,
            max_tokens,
            temperature: None,
        };

        let mut last_failure: Option<RequestFailure> = None;

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                let backoff = Duration::from_millis(500 * attempt as u64);
                warn!(attempt, backoff_ms = backoff.as_millis() as u64, "Retrying request");
                tokio::time::sleep(backoff).await;
            }

            let mut request = self.client.post(&url).json(&request_body);
            if let Some(auth) = self.auth_header() {
                request = request.header("Authorization", auth);
            }

            match request.send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        match response.json::<ChatCompletionResponse>().await {
                            Ok(body) => {
                                let content = body
                                    .choices
                                    .into_iter()
                                    .next()
                                    .and_then(|c| c.message.content)
                                    .unwrap_or_default();
                                return Ok(content.trim().to_string());
                            }
                            Err(e) => {
                                last_failure = Some(RequestFailure {
                                    timed_out: false,
                                    message: format!("malformed response body: {}", e),
                                });
                            }
                        }
                    } else if status.is_server_error() || status.as_u16() == 429 {
                        // Transient; retry
                        last_failure = Some(RequestFailure {
                            timed_out: false,
                            message: format!("HTTP {} from {}", status, url),
                        });
                    } else {
                        // Client error; retrying won't help
                        return Err(RequestFailure {
                            timed_out: false,
                            message: format!("HTTP {} from {}", status, url),
                        });
                    }
                }
                Err(e) => {
                    last_failure = Some(RequestFailure {
                        timed_out: e.is_timeout(),
                        message: e.to_string(),
                    });
                }
            }
        }

        Err(last_failure.unwrap_or(RequestFailure {
            timed_out: false,
            message: "request failed with no recorded error".to_string(),
        }))
    }

    /// Build the in-character system prompt from a persona profile.
    fn persona_system_prompt(persona: &PersonaProfile) -> String {
        let mut prompt = format!(
            "You are {}. Answer every question in character, in the first person, \
             drawing on the identity below. Keep answers to a few sentences.",
            persona.name
        );

        for (key, value) in &persona.identity {
            if let Some(text) = value.as_str() {
                prompt.push_str(&format!("\n{}: {}", key, text));
            }
        }

        prompt
    }
}

#[async_trait]
impl ResponseGenerator for OpenAiBackend {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn respond(&self, persona: &PersonaProfile, question: &str) -> Result<String> {
        let messages = vec![
            ChatMessage {
                role: "system".to_string(),
                content: Self::persona_system_prompt(persona),
            },
            ChatMessage {
                role: "user".to_string(),
                content: question.to_string(),
            },
        ];

        self.chat_completion(messages, None)
            .await
            .map_err(|f| {
                if f.timed_out {
                    Error::GeneratorTimeout {
                        persona: persona.name.clone(),
                        timeout_secs: self.config.timeout_secs,
                    }
                } else {
                    Error::GeneratorRequest { message: f.message }
                }
            })
    }
}

#[async_trait]
impl TraitScorer for OpenAiBackend {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn rate(&self, response: &str, dimension: Dimension) -> Result<String> {
        let prompt = format!(
            "Rate the following response on a scale of 1-5 for the trait {}: {}\n\
             Reply with a single integer.",
            dimension, response
        );

        let messages = vec![ChatMessage {
            role: "user".to_string(),
            content: prompt,
        }];

        self.chat_completion(messages, Some(10))
            .await
            .map_err(|f| {
                if f.timed_out {
                    Error::ScorerTimeout {
                        dimension,
                        timeout_secs: self.config.timeout_secs,
                    }
                } else {
                    Error::ScorerRequest { message: f.message }
                }
            })
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────
