use domain::RatingPolicy;
use llm::{ProviderConfig, ProviderKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use super::ConfigError;

pub const DEFAULT_CSV_PATH: &str = "reviews_data.csv";
pub const DEFAULT_SQLITE_PATH: &str = "reviews_data.db";

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackConfig {
    pub llm: LlmSettings,
    pub storage: StorageSettings,
    pub dashboard: DashboardSettings,
    pub logging: LogSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    pub provider: ProviderKind,
    /// Falls back to the provider's default model
    pub model: Option<String>,
    pub base_url: Option<String>,
    /// No client timeout unless set
    pub timeout_secs: Option<u64>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
}

impl LlmSettings {
    pub fn model_name(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.provider.default_model())
    }

    /// Provider settings for `ProviderFactory`
    pub fn to_provider_config(&self) -> ProviderConfig {
        let mut config = ProviderConfig::new(self.provider, self.model_name());
        if let Some(key) = &self.api_key {
            config = config.with_api_key(key.clone());
        }
        if let Some(base_url) = &self.base_url {
            config = config.with_endpoint(base_url.clone());
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        config
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_deref()
            .map(|key| !key.trim().is_empty())
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackendKind {
    #[default]
    Csv,
    Sqlite,
}

impl StorageBackendKind {
    pub fn name(&self) -> &'static str {
        match self {
            StorageBackendKind::Csv => "csv",
            StorageBackendKind::Sqlite => "sqlite",
        }
    }
}

impl fmt::Display for StorageBackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StorageBackendKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(StorageBackendKind::Csv),
            "sqlite" | "sqlite3" => Ok(StorageBackendKind::Sqlite),
            other => Err(ConfigError::InvalidValue {
                key: "storage.backend".to_string(),
                value: other.to_string(),
                reason: "expected csv or sqlite".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub backend: StorageBackendKind,
    pub path: Option<PathBuf>,
}

impl StorageSettings {
    pub fn resolved_path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(|| match self.backend {
            StorageBackendKind::Csv => PathBuf::from(DEFAULT_CSV_PATH),
            StorageBackendKind::Sqlite => PathBuf::from(DEFAULT_SQLITE_PATH),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    pub rating_policy: RatingPolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    pub level: String,
    pub json: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            json: false,
        }
    }
}
