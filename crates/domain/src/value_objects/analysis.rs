//! AnalysisResult - generated reply, summary and recommended action

use serde::{Deserialize, Serialize};

pub const FALLBACK_USER_RESPONSE: &str = "Thank you for your feedback!";
pub const FALLBACK_SUMMARY: &str = "Error generating summary.";
pub const FALLBACK_ACTION: &str = "Check system logs.";

/// Output of one analysis call, always fully populated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub user_response: String,
    pub summary: String,
    pub action: String,
}

impl AnalysisResult {
    pub fn new(
        user_response: impl Into<String>,
        summary: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            user_response: user_response.into(),
            summary: summary.into(),
            action: action.into(),
        }
    }

    /// Fixed triple used whenever analysis could not be completed
    pub fn fallback() -> Self {
        Self::new(FALLBACK_USER_RESPONSE, FALLBACK_SUMMARY, FALLBACK_ACTION)
    }

    pub fn is_fallback(&self) -> bool {
        *self == Self::fallback()
    }

    /// Replace blank fields with their fallback counterpart
    pub fn fill_blanks(self) -> Self {
        let fallback = Self::fallback();
        let pick = |value: String, default: String| {
            if value.trim().is_empty() {
                default
            } else {
                value
            }
        };
        Self {
            user_response: pick(self.user_response, fallback.user_response),
            summary: pick(self.summary, fallback.summary),
            action: pick(self.action, fallback.action),
        }
    }
}

impl Default for AnalysisResult {
    fn default() -> Self {
        Self::fallback()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_fields() {
        let fallback = AnalysisResult::fallback();
        assert_eq!(fallback.user_response, "Thank you for your feedback!");
        assert_eq!(fallback.summary, "Error generating summary.");
        assert_eq!(fallback.action, "Check system logs.");
        assert!(fallback.is_fallback());
    }

    #[test]
    fn test_fill_blanks_only_touches_blank_fields() {
        let filled = AnalysisResult::new("  ", "slow service", "").fill_blanks();
        assert_eq!(filled.user_response, FALLBACK_USER_RESPONSE);
        assert_eq!(filled.summary, "slow service");
        assert_eq!(filled.action, FALLBACK_ACTION);
    }
}
