//! AnalysisClient - one generation call per review, never fails outward
//!
//! The backend is asked for a strict JSON object with `user_response`,
//! `admin_summary` and `recommended_action`. Anything short of that (no
//! backend, transport error, bad status, unparseable text) yields
//! [`AnalysisResult::fallback`].

use common::OperationTimer;
use domain::{AnalysisResult, Rating};
use llm::{LlmError, LlmProvider, LlmRequest, ProviderConfig, ProviderFactory};
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Why an analysis call fell back
#[derive(Debug, Error)]
pub enum AnalysisFailure {
    #[error("no generation backend configured")]
    NotConfigured,

    #[error("backend call failed: {0}")]
    Backend(#[from] LlmError),

    #[error("response is not the expected JSON object: {0}")]
    Parse(String),
}

impl AnalysisFailure {
    pub fn category(&self) -> &'static str {
        match self {
            AnalysisFailure::NotConfigured => "not_configured",
            AnalysisFailure::Backend(e) => e.category(),
            AnalysisFailure::Parse(_) => "parse",
        }
    }
}

#[derive(Debug, Deserialize)]
struct AnalysisPayload {
    user_response: String,
    admin_summary: String,
    recommended_action: String,
}

pub struct AnalysisClient {
    provider: Option<Arc<dyn LlmProvider>>,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
}

impl AnalysisClient {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            provider: Some(provider),
            max_tokens: None,
            temperature: None,
        }
    }

    /// Client without a backend; every call returns the fallback
    pub fn unconfigured() -> Self {
        Self {
            provider: None,
            max_tokens: None,
            temperature: None,
        }
    }

    /// Build from provider settings; a missing key leaves the client unconfigured
    pub fn from_config(config: &ProviderConfig) -> Self {
        match ProviderFactory::create_provider(config) {
            Ok(provider) => Self::new(provider),
            Err(e) => {
                warn!(
                    provider = config.provider_type.name(),
                    category = e.category(),
                    "Generation backend unavailable, replies will use the fallback: {}",
                    e
                );
                Self::unconfigured()
            }
        }
    }

    pub fn with_parameters(mut self, max_tokens: Option<u32>, temperature: Option<f32>) -> Self {
        self.max_tokens = max_tokens;
        self.temperature = temperature;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    /// Analyze one review; always returns a fully populated result
    pub async fn analyze(&self, rating: Rating, review_text: &str) -> AnalysisResult {
        let mut timer = OperationTimer::new("analysis_client.analyze");
        timer.add_field("rating", rating.value());

        match self.try_analyze(rating, review_text).await {
            Ok(result) => {
                timer.finish();
                result
            }
            Err(failure) => {
                warn!(
                    category = failure.category(),
                    rating = rating.value(),
                    duration_ms = timer.elapsed_ms(),
                    "Analysis fell back to default reply: {}",
                    failure
                );
                AnalysisResult::fallback()
            }
        }
    }

    /// Single attempt without the fallback
    pub async fn try_analyze(
        &self,
        rating: Rating,
        review_text: &str,
    ) -> Result<AnalysisResult, AnalysisFailure> {
        let provider = self.provider.as_ref().ok_or(AnalysisFailure::NotConfigured)?;

        let prompt = build_prompt(rating, review_text);
        let request =
            LlmRequest::new(&prompt).with_parameters(self.max_tokens, self.temperature);
        debug!(
            provider = %provider.id(),
            prompt_chars = prompt.chars().count(),
            "Requesting review analysis"
        );

        let response = provider.complete(request).await?;
        debug!(
            model = %response.model,
            response_chars = response.content.chars().count(),
            prompt_tokens = response.usage.prompt_tokens,
            completion_tokens = response.usage.completion_tokens,
            total_tokens = response.usage.total_tokens,
            finish_reason = %response.finish_reason,
            duration_ms = response.response_time.as_millis() as u64,
            "Received review analysis"
        );

        parse_analysis(&response.content)
    }
}

/// Prompt sent for every review
pub fn build_prompt(rating: Rating, review_text: &str) -> String {
    format!(
        r#"You are an AI customer service manager.
A customer just left this review:
Rating: {rating}/5 Stars
Review: "{review_text}"

Task:
1. Write a polite, empathetic response to the user.
2. Summarize the review in 5-10 words for the admin.
3. Suggest one concrete 'Recommended Action' for the business to fix or improve this.

Output strictly in JSON:
{{
    "user_response": "...",
    "admin_summary": "...",
    "recommended_action": "..."
}}"#
    )
}

/// Remove every ```json / ``` fence marker and surrounding whitespace
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

/// Parse backend text into an analysis; blank fields take fallback values
pub fn parse_analysis(text: &str) -> Result<AnalysisResult, AnalysisFailure> {
    let cleaned = strip_code_fences(text);
    let payload: AnalysisPayload =
        serde_json::from_str(&cleaned).map_err(|e| AnalysisFailure::Parse(e.to_string()))?;

    Ok(AnalysisResult::new(
        payload.user_response,
        payload.admin_summary,
        payload.recommended_action,
    )
    .fill_blanks())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rating(value: i64) -> Rating {
        Rating::new(value).expect("valid rating")
    }

    #[test]
    fn test_prompt_embeds_rating_and_review() {
        let prompt = build_prompt(rating(2), "slow service");
        assert!(prompt.contains("Rating: 2/5 Stars"));
        assert!(prompt.contains("Review: \"slow service\""));
        assert!(prompt.contains("\"recommended_action\""));
    }

    #[test]
    fn test_strip_code_fences() {
        let text = "```json\n{\"a\": 1}\n```\n";
        assert_eq!(strip_code_fences(text), "{\"a\": 1}");
        assert_eq!(strip_code_fences("  {}  "), "{}");
    }

    #[test]
    fn test_parse_fenced_json() {
        let text = r#"```json
{"user_response":"Sorry!","admin_summary":"slow service","recommended_action":"speed up"}
```"#;
        let result = parse_analysis(text).expect("parses");
        assert_eq!(result, AnalysisResult::new("Sorry!", "slow service", "speed up"));
    }

    #[test]
    fn test_parse_rejects_missing_or_non_string_fields() {
        assert!(parse_analysis(r#"{"user_response":"Hi","admin_summary":"x"}"#).is_err());
        assert!(parse_analysis(
            r#"{"user_response":1,"admin_summary":"x","recommended_action":"y"}"#
        )
        .is_err());
        assert!(parse_analysis("").is_err());
        assert!(parse_analysis("Sure! Here is the JSON you asked for.").is_err());
    }

    #[test]
    fn test_parse_fills_blank_fields() {
        let result =
            parse_analysis(r#"{"user_response":"","admin_summary":"late","recommended_action":" "}"#)
                .expect("parses");
        assert_eq!(result.user_response, "Thank you for your feedback!");
        assert_eq!(result.summary, "late");
        assert_eq!(result.action, "Check system logs.");
    }

    #[tokio::test]
    async fn test_unconfigured_client_falls_back() {
        let client = AnalysisClient::unconfigured();
        assert!(!client.is_configured());
        assert_eq!(
            client.analyze(rating(5), "great!").await,
            AnalysisResult::fallback()
        );
        assert!(matches!(
            client.try_analyze(rating(5), "great!").await,
            Err(AnalysisFailure::NotConfigured)
        ));
    }

    #[test]
    fn test_from_config_without_key_is_unconfigured() {
        let config = ProviderConfig::new(llm::ProviderKind::Google, llm::DEFAULT_GOOGLE_MODEL);
        assert!(!AnalysisClient::from_config(&config).is_configured());
    }
}
