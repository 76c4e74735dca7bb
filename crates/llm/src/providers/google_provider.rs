use super::{build_client, LlmError, LlmProvider, LlmRequest, LlmResponse, LlmResult, ProviderId, TokenUsage};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

const GOOGLE_API_BASE: &str = "https://generativelanguage.googleapis.com";

/// Gemini `generateContent` backend
#[derive(Debug, Clone)]
pub struct GoogleProvider {
    api_key: String,
    model: String,
    base_url: String,
    client: Client,
}

impl GoogleProvider {
    pub fn new(api_key: String, model: String) -> LlmResult<Self> {
        if api_key.is_empty() {
            return Err(LlmError::MissingApiKey("google".to_string()));
        }

        Ok(Self {
            api_key,
            model,
            base_url: GOOGLE_API_BASE.to_string(),
            client: build_client(None)?,
        })
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> LlmResult<Self> {
        self.client = build_client(Some(timeout))?;
        Ok(self)
    }

    fn get_api_endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    fn build_request(request: &LlmRequest) -> GoogleRequest {
        GoogleRequest {
            contents: vec![GoogleContent {
                parts: vec![GooglePart {
                    text: request.prompt.clone(),
                }],
                role: "user".to_string(),
            }],
            generation_config: Some(GoogleGenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_tokens,
            }),
        }
    }
}

#[async_trait]
impl LlmProvider for GoogleProvider {
    fn id(&self) -> ProviderId {
        ProviderId::new("google", &self.model)
    }

    async fn complete(&self, request: LlmRequest) -> LlmResult<LlmResponse> {
        let start_time = Instant::now();
        let google_request = Self::build_request(&request);

        info!(
            model = %self.model,
            prompt_chars = request.prompt.chars().count(),
            "Sending request to Google AI"
        );

        let response = self
            .client
            .post(self.get_api_endpoint())
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&google_request)
            .send()
            .await
            .map_err(LlmError::from_reqwest)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error response".to_string());
            warn!(status, "Google AI returned an error status");
            return Err(LlmError::Http { status, message });
        }

        let google_response: GoogleResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Parse(e.to_string()))?;
        let elapsed = start_time.elapsed();

        let candidate = google_response
            .candidates
            .first()
            .ok_or(LlmError::EmptyResponse)?;

        let text: String = candidate
            .content
            .as_ref()
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|part| part.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(LlmError::EmptyResponse);
        }

        let usage = match &google_response.usage_metadata {
            Some(usage_metadata) => TokenUsage::new(
                usage_metadata.prompt_token_count.unwrap_or(0),
                usage_metadata.candidates_token_count.unwrap_or(0),
            ),
            // Rough estimate when the API omits counts
            None => TokenUsage::new(
                request.prompt.len() as u32 / 4,
                text.len() as u32 / 4,
            ),
        };

        let finish_reason = candidate
            .finish_reason
            .as_ref()
            .map(|r| r.to_lowercase())
            .unwrap_or_else(|| "stop".to_string());

        debug!(
            elapsed_ms = elapsed.as_millis() as u64,
            total_tokens = usage.total_tokens,
            "Received response from Google AI"
        );

        Ok(LlmResponse {
            content: text,
            usage,
            model: self.model.clone(),
            finish_reason,
            response_time: elapsed,
        })
    }
}

// Google AI API specific request/response types
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct GoogleRequest {
    contents: Vec<GoogleContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GoogleGenerationConfig>,
}

#[derive(Debug, Clone, Serialize)]
struct GoogleContent {
    parts: Vec<GooglePart>,
    role: String,
}

#[derive(Debug, Clone, Serialize)]
struct GooglePart {
    text: String,
}

#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
struct GoogleGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoogleResponse {
    #[serde(default)]
    candidates: Vec<GoogleCandidate>,
    usage_metadata: Option<GoogleUsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoogleCandidate {
    content: Option<GoogleResponseContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GoogleResponseContent {
    #[serde(default)]
    parts: Vec<GoogleResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GoogleResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoogleUsageMetadata {
    prompt_token_count: Option<u32>,
    candidates_token_count: Option<u32>,
}
