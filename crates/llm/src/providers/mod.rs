use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

pub mod google_provider;
pub mod openai_provider;

pub use google_provider::GoogleProvider;
pub use openai_provider::OpenAIProvider;

pub const DEFAULT_GOOGLE_MODEL: &str = "gemini-1.5-pro";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

/// Failure of a single generation call
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("API key is missing for provider {0}")]
    MissingApiKey(String),

    #[error("Failed to create HTTP client: {0}")]
    ClientBuild(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Failed to parse provider response: {0}")]
    Parse(String),

    #[error("Provider returned no text")]
    EmptyResponse,

    #[error("Unknown provider type: {0}")]
    UnknownProvider(String),
}

impl LlmError {
    /// Short stable label for log fields
    pub fn category(&self) -> &'static str {
        match self {
            LlmError::MissingApiKey(_) => "missing_api_key",
            LlmError::ClientBuild(_) => "client_build",
            LlmError::Network(_) => "network",
            LlmError::Http { status, .. } if *status == 401 || *status == 403 => "auth",
            LlmError::Http { .. } => "http",
            LlmError::Parse(_) => "parse",
            LlmError::EmptyResponse => "empty_response",
            LlmError::UnknownProvider(_) => "unknown_provider",
        }
    }

    /// Request URLs are stripped so credentials never reach the message
    pub(crate) fn from_reqwest(error: reqwest::Error) -> Self {
        let error = error.without_url();
        match error.status() {
            Some(status) => LlmError::Http {
                status: status.as_u16(),
                message: error.to_string(),
            },
            None => LlmError::Network(error.to_string()),
        }
    }
}

pub type LlmResult<T> = Result<T, LlmError>;

/// Request object for LLM providers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmRequest {
    pub prompt: String,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

impl LlmRequest {
    pub fn new(prompt: &str) -> Self {
        Self {
            prompt: prompt.to_string(),
            max_tokens: None,
            temperature: None,
        }
    }

    pub fn with_parameters(mut self, max_tokens: Option<u32>, temperature: Option<f32>) -> Self {
        self.max_tokens = max_tokens;
        self.temperature = temperature;
        self
    }
}

/// Response object from LLM providers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmResponse {
    pub content: String,
    pub usage: TokenUsage,
    pub model: String,
    pub finish_reason: String,
    pub response_time: Duration,
}

/// Token usage statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl TokenUsage {
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }
}

/// Provider identification
#[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderId {
    pub provider_type: String,
    pub model: String,
}

impl ProviderId {
    pub fn new(provider_type: &str, model: &str) -> Self {
        Self {
            provider_type: provider_type.to_string(),
            model: model.to_string(),
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.provider_type, self.model)
    }
}

/// Hosted text-generation backend
///
/// One call per request; implementations never retry.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    fn id(&self) -> ProviderId;

    async fn complete(&self, request: LlmRequest) -> LlmResult<LlmResponse>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Google,
    OpenAI,
}

impl ProviderKind {
    pub fn name(&self) -> &'static str {
        match self {
            ProviderKind::Google => "google",
            ProviderKind::OpenAI => "openai",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::Google => DEFAULT_GOOGLE_MODEL,
            ProviderKind::OpenAI => DEFAULT_OPENAI_MODEL,
        }
    }
}

impl FromStr for ProviderKind {
    type Err = LlmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "google" | "gemini" => Ok(ProviderKind::Google),
            "openai" => Ok(ProviderKind::OpenAI),
            other => Err(LlmError::UnknownProvider(other.to_string())),
        }
    }
}

/// Configuration for provider creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub provider_type: ProviderKind,
    pub model: String,
    pub api_key: Option<String>,
    /// Overrides the provider's public API base URL
    pub endpoint: Option<String>,
    /// Client timeout; `None` keeps the HTTP client default
    pub timeout: Option<Duration>,
}

impl ProviderConfig {
    pub fn new(provider_type: ProviderKind, model: &str) -> Self {
        Self {
            provider_type,
            model: model.to_string(),
            api_key: None,
            endpoint: None,
            timeout: None,
        }
    }

    pub fn with_api_key(mut self, api_key: String) -> Self {
        self.api_key = Some(api_key);
        self
    }

    pub fn with_endpoint(mut self, endpoint: String) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Provider factory for creating instances
pub struct ProviderFactory;

impl ProviderFactory {
    pub fn create_provider(config: &ProviderConfig) -> LlmResult<Arc<dyn LlmProvider>> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| LlmError::MissingApiKey(config.provider_type.name().to_string()))?;

        match config.provider_type {
            ProviderKind::Google => {
                let mut provider = GoogleProvider::new(api_key, config.model.clone())?;
                if let Some(endpoint) = &config.endpoint {
                    provider = provider.with_base_url(endpoint);
                }
                if let Some(timeout) = config.timeout {
                    provider = provider.with_timeout(timeout)?;
                }
                Ok(Arc::new(provider))
            }
            ProviderKind::OpenAI => {
                let mut provider =
                    OpenAIProvider::new(api_key, config.model.clone(), config.endpoint.clone())?;
                if let Some(timeout) = config.timeout {
                    provider = provider.with_timeout(timeout)?;
                }
                Ok(Arc::new(provider))
            }
        }
    }
}

pub(crate) fn build_client(timeout: Option<Duration>) -> LlmResult<reqwest::Client> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|e| LlmError::ClientBuild(e.to_string()))
}
