//! Chat-completions guidance client.
//!
//! Sends the trip context to an OpenAI-compatible chat-completions endpoint
//! and asks for a JSON-only answer. The reply is validated by
//! [`parse_reply`](super::reply::parse_reply).

use std::future::Future;
use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};

use super::context::GuidanceContext;
use super::error::GuidanceError;
use super::reply::{Guidance, parse_reply};

/// Default chat-completions endpoint.
const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Default model.
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Instructions sent with every request.
const SYSTEM_PROMPT: &str = "You help rail passengers in Tokyo reach a station toilet as fast \
as possible. Answer with JSON only, no prose, matching exactly: \
{\"minutes\": number, \"steps\": string[], \"toilet_info\": string, \"message\": string, \
\"congestion_emoji\": string, \"congestion_level\": number}. Keep the message short and calm.";

/// Produces guidance from a context.
pub trait GuidanceGenerator: Send + Sync {
    fn generate(
        &self,
        ctx: &GuidanceContext,
    ) -> impl Future<Output = Result<Guidance, GuidanceError>> + Send;
}

/// Configuration for the chat guidance client.
#[derive(Debug, Clone)]
pub struct GuidanceConfig {
    /// Bearer token for the API
    pub api_key: String,
    /// Chat-completions endpoint
    pub api_url: String,
    /// Model name
    pub model: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl GuidanceConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: 20,
        }
    }

    /// Set a custom endpoint.
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Set the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    response_format: ResponseFormat,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}

/// Guidance client for an OpenAI-compatible API.
#[derive(Debug, Clone)]
pub struct ChatGuidanceClient {
    http: reqwest::Client,
    api_url: String,
    model: String,
}

impl ChatGuidanceClient {
    /// Create a new client.
    pub fn new(config: GuidanceConfig) -> Result<Self, GuidanceError> {
        if config.api_key.trim().is_empty() {
            return Err(GuidanceError::NotConfigured);
        }

        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|_| GuidanceError::Invalid("API key is not a valid header value"))?;
        headers.insert(AUTHORIZATION, bearer);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            api_url: config.api_url,
            model: config.model,
        })
    }

    /// Ask the API for guidance.
    pub async fn generate(&self, ctx: &GuidanceContext) -> Result<Guidance, GuidanceError> {
        let prompt = ctx.prompt();
        let request = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt,
                },
            ],
            response_format: ResponseFormat {
                kind: "json_object",
            },
            temperature: 0.3,
        };

        let response = self.http.post(&self.api_url).json(&request).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GuidanceError::Api {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        let body = response.text().await?;
        let chat: ChatResponse = serde_json::from_str(&body).map_err(|e| GuidanceError::Json {
            message: e.to_string(),
        })?;

        let content = chat
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(GuidanceError::EmptyReply)?;

        parse_reply(&content)
    }
}

impl GuidanceGenerator for ChatGuidanceClient {
    fn generate(
        &self,
        ctx: &GuidanceContext,
    ) -> impl Future<Output = Result<Guidance, GuidanceError>> + Send {
        ChatGuidanceClient::generate(self, ctx)
    }
}
