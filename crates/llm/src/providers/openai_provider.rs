use super::{build_client, LlmError, LlmProvider, LlmRequest, LlmResponse, LlmResult, ProviderId, TokenUsage};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// OpenAI-compatible `chat/completions` backend (also LM Studio, vLLM, ...)
#[derive(Debug, Clone)]
pub struct OpenAIProvider {
    api_key: String,
    model: String,
    endpoint: String,
    client: Client,
}

impl OpenAIProvider {
    pub fn new(api_key: String, model: String, endpoint: Option<String>) -> LlmResult<Self> {
        if api_key.is_empty() {
            return Err(LlmError::MissingApiKey("openai".to_string()));
        }

        Ok(Self {
            api_key,
            model,
            endpoint: endpoint
                .map(|e| e.trim_end_matches('/').to_string())
                .unwrap_or_else(|| "https://api.openai.com/v1".to_string()),
            client: build_client(None)?,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> LlmResult<Self> {
        self.client = build_client(Some(timeout))?;
        Ok(self)
    }

    fn build_request(&self, request: &LlmRequest) -> OpenAIRequest {
        OpenAIRequest {
            model: self.model.clone(),
            messages: vec![OpenAIMessage {
                role: "user".to_string(),
                content: request.prompt.clone(),
            }],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }
}

#[async_trait]
impl LlmProvider for OpenAIProvider {
    fn id(&self) -> ProviderId {
        ProviderId::new("openai", &self.model)
    }

    async fn complete(&self, request: LlmRequest) -> LlmResult<LlmResponse> {
        let start_time = Instant::now();
        let openai_request = self.build_request(&request);

        info!(model = %self.model, "Sending request to OpenAI-compatible endpoint");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.endpoint))
            .bearer_auth(&self.api_key)
            .json(&openai_request)
            .send()
            .await
            .map_err(LlmError::from_reqwest)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error response".to_string());
            warn!(status, "OpenAI-compatible endpoint returned an error status");
            return Err(LlmError::Http { status, message });
        }

        let openai_response: OpenAIResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Parse(e.to_string()))?;
        let elapsed = start_time.elapsed();

        let choice = openai_response
            .choices
            .into_iter()
            .next()
            .ok_or(LlmError::EmptyResponse)?;

        let content = choice.message.content.unwrap_or_default();
        if content.is_empty() {
            return Err(LlmError::EmptyResponse);
        }

        let usage = openai_response
            .usage
            .map(|u| TokenUsage::new(u.prompt_tokens, u.completion_tokens))
            .unwrap_or_default();

        debug!(
            elapsed_ms = elapsed.as_millis() as u64,
            total_tokens = usage.total_tokens,
            "Received response from OpenAI-compatible endpoint"
        );

        Ok(LlmResponse {
            content,
            usage,
            model: self.model.clone(),
            finish_reason: choice.finish_reason.unwrap_or_else(|| "stop".to_string()),
            response_time: elapsed,
        })
    }
}

// OpenAI-specific request/response types
#[derive(Debug, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct OpenAIMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
    usage: Option<OpenAIUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}
