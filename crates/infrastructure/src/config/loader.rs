use super::settings::{FeedbackConfig, StorageBackendKind};
use domain::RatingPolicy;
use llm::ProviderKind;
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    File(PathBuf),
    Default,
}

/// Environment keys checked for the API key, most specific first
fn api_key_vars(provider: ProviderKind) -> &'static [&'static str] {
    match provider {
        ProviderKind::Google => &["GEMINI_API_KEY", "GOOGLE_API_KEY"],
        ProviderKind::OpenAI => &["OPENAI_API_KEY"],
    }
}

pub struct ConfigLoader {
    explicit_path: Option<PathBuf>,
    config_paths: Vec<PathBuf>,
    env_prefix: String,
    load_dotenv: bool,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            explicit_path: None,
            config_paths: Self::default_config_paths(),
            env_prefix: "FEEDBACK_".to_string(),
            load_dotenv: true,
        }
    }

    /// Use exactly this file; a missing file is an error
    pub fn with_path(mut self, path: PathBuf) -> Self {
        self.explicit_path = Some(path);
        self
    }

    /// Replace the search list used when no explicit path is given
    pub fn with_search_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.config_paths = paths;
        self
    }

    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = prefix.to_string();
        self
    }

    pub fn without_dotenv(mut self) -> Self {
        self.load_dotenv = false;
        self
    }

    fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("feedback.toml")];

        if let Some(home_dir) = dirs::home_dir() {
            paths.push(home_dir.join(".config").join("feedback").join("config.toml"));
        }

        paths
    }

    /// Defaults, then the first config file found, then the process environment
    pub async fn load(&self) -> Result<FeedbackConfig, ConfigError> {
        if self.load_dotenv {
            if let Ok(path) = dotenv::dotenv() {
                debug!("Loaded environment from {}", path.display());
            }
        }

        let (config, source) = self.load_file_config().await?;
        match &source {
            ConfigSource::File(path) => info!("Loaded configuration from: {}", path.display()),
            ConfigSource::Default => debug!("No config file found, using defaults"),
        }

        self.apply_env_overrides(config, |key| env::var(key).ok())
    }

    /// File layer only, without environment overrides
    pub async fn load_file_config(&self) -> Result<(FeedbackConfig, ConfigSource), ConfigError> {
        if let Some(path) = &self.explicit_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.clone()));
            }
            let config = Self::load_file(path).await?;
            return Ok((config, ConfigSource::File(path.clone())));
        }

        for path in &self.config_paths {
            if path.exists() {
                let config = Self::load_file(path).await?;
                return Ok((config, ConfigSource::File(path.clone())));
            }
        }

        Ok((FeedbackConfig::default(), ConfigSource::Default))
    }

    async fn load_file(path: &Path) -> Result<FeedbackConfig, ConfigError> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Apply `<prefix>*` variables and the API key lookup through `lookup`
    pub fn apply_env_overrides<F>(
        &self,
        mut config: FeedbackConfig,
        lookup: F,
    ) -> Result<FeedbackConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(&format!("{}{}", self.env_prefix, name)).filter(|v| !v.trim().is_empty())
        };

        // LLM settings
        if let Some(provider) = var("LLM_PROVIDER") {
            config.llm.provider =
                provider
                    .parse::<ProviderKind>()
                    .map_err(|e| ConfigError::InvalidValue {
                        key: format!("{}LLM_PROVIDER", self.env_prefix),
                        value: provider.clone(),
                        reason: e.to_string(),
                    })?;
        }

        if let Some(model) = var("LLM_MODEL") {
            config.llm.model = Some(model);
        }

        if let Some(base_url) = var("LLM_BASE_URL") {
            config.llm.base_url = Some(base_url);
        }

        if let Some(timeout) = var("LLM_TIMEOUT_SECS") {
            let secs = timeout
                .trim()
                .parse::<u64>()
                .map_err(|e| ConfigError::InvalidValue {
                    key: format!("{}LLM_TIMEOUT_SECS", self.env_prefix),
                    value: timeout.clone(),
                    reason: e.to_string(),
                })?;
            config.llm.timeout_secs = Some(secs);
        }

        let api_key = var("API_KEY").or_else(|| {
            api_key_vars(config.llm.provider)
                .iter()
                .find_map(|name| lookup(name).filter(|v| !v.trim().is_empty()))
        });
        if let Some(api_key) = api_key {
            config.llm.api_key = Some(api_key);
        }

        // Storage settings
        if let Some(backend) = var("STORAGE_BACKEND") {
            config.storage.backend = backend.parse::<StorageBackendKind>()?;
        }

        if let Some(path) = var("STORAGE_PATH") {
            config.storage.path = Some(PathBuf::from(path));
        }

        // Dashboard settings
        if let Some(policy) = var("RATING_POLICY") {
            config.dashboard.rating_policy =
                policy
                    .parse::<RatingPolicy>()
                    .map_err(|e| ConfigError::InvalidValue {
                        key: format!("{}RATING_POLICY", self.env_prefix),
                        value: policy.clone(),
                        reason: e.to_string(),
                    })?;
        }

        // Logging settings
        if let Some(level) = var("LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Some(json) = var("LOG_JSON") {
            config.logging.json = parse_flag(&json).ok_or_else(|| ConfigError::InvalidValue {
                key: format!("{}LOG_JSON", self.env_prefix),
                value: json.clone(),
                reason: "expected true/false".to_string(),
            })?;
        }

        Ok(config)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_env_overrides_apply() {
        let loader = ConfigLoader::new().without_dotenv();
        let config = loader
            .apply_env_overrides(
                FeedbackConfig::default(),
                lookup_from(&[
                    ("FEEDBACK_LLM_PROVIDER", "openai"),
                    ("FEEDBACK_LLM_MODEL", "gpt-4o"),
                    ("FEEDBACK_STORAGE_BACKEND", "sqlite"),
                    ("FEEDBACK_STORAGE_PATH", "/tmp/reviews.db"),
                    ("FEEDBACK_RATING_POLICY", "clamp"),
                    ("FEEDBACK_LOG_JSON", "yes"),
                    ("FEEDBACK_LOG_LEVEL", "debug"),
                    ("OPENAI_API_KEY", "sk-test"),
                ]),
            )
            .expect("overrides are valid");

        assert_eq!(config.llm.provider, ProviderKind::OpenAI);
        assert_eq!(config.llm.model_name(), "gpt-4o");
        assert_eq!(config.llm.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.storage.backend, StorageBackendKind::Sqlite);
        assert_eq!(config.storage.resolved_path(), PathBuf::from("/tmp/reviews.db"));
        assert_eq!(config.dashboard.rating_policy, RatingPolicy::Clamp);
        assert!(config.logging.json);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_api_key_lookup_order() {
        let loader = ConfigLoader::new().without_dotenv();

        let config = loader
            .apply_env_overrides(
                FeedbackConfig::default(),
                lookup_from(&[("GOOGLE_API_KEY", "google"), ("GEMINI_API_KEY", "gemini")]),
            )
            .expect("valid");
        assert_eq!(config.llm.api_key.as_deref(), Some("gemini"));

        let config = loader
            .apply_env_overrides(
                FeedbackConfig::default(),
                lookup_from(&[("GEMINI_API_KEY", "gemini"), ("FEEDBACK_API_KEY", "own")]),
            )
            .expect("valid");
        assert_eq!(config.llm.api_key.as_deref(), Some("own"));
    }

    #[test]
    fn test_openai_provider_ignores_gemini_key() {
        let loader = ConfigLoader::new().without_dotenv();
        let config = loader
            .apply_env_overrides(
                FeedbackConfig::default(),
                lookup_from(&[("FEEDBACK_LLM_PROVIDER", "openai"), ("GEMINI_API_KEY", "g")]),
            )
            .expect("valid");
        assert!(config.llm.api_key.is_none());
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let loader = ConfigLoader::new().without_dotenv();

        let err = loader
            .apply_env_overrides(
                FeedbackConfig::default(),
                lookup_from(&[("FEEDBACK_RATING_POLICY", "round")]),
            )
            .expect_err("unknown policy");
        assert!(matches!(err, ConfigError::InvalidValue { .. }));

        assert!(loader
            .apply_env_overrides(
                FeedbackConfig::default(),
                lookup_from(&[("FEEDBACK_LOG_JSON", "maybe")]),
            )
            .is_err());

        assert!(loader
            .apply_env_overrides(
                FeedbackConfig::default(),
                lookup_from(&[("FEEDBACK_LLM_PROVIDER", "anthropic")]),
            )
            .is_err());
    }

    #[test]
    fn test_timeout_is_opt_in() {
        let loader = ConfigLoader::new().without_dotenv();
        assert!(FeedbackConfig::default().llm.timeout_secs.is_none());
        assert!(FeedbackConfig::default()
            .llm
            .to_provider_config()
            .timeout
            .is_none());

        let config = loader
            .apply_env_overrides(
                FeedbackConfig::default(),
                lookup_from(&[("FEEDBACK_LLM_TIMEOUT_SECS", "15")]),
            )
            .expect("valid");
        assert_eq!(config.llm.timeout_secs, Some(15));

        assert!(matches!(
            loader.apply_env_overrides(
                FeedbackConfig::default(),
                lookup_from(&[("FEEDBACK_LLM_TIMEOUT_SECS", "soon")]),
            ),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_blank_variables_are_ignored() {
        let loader = ConfigLoader::new().without_dotenv();
        let config = loader
            .apply_env_overrides(
                FeedbackConfig::default(),
                lookup_from(&[("FEEDBACK_LLM_MODEL", "  "), ("GEMINI_API_KEY", "")]),
            )
            .expect("valid");
        assert_eq!(config, FeedbackConfig::default());
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("sometimes"), None);
    }
}
