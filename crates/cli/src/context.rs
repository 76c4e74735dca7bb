use anyhow::{Context, Result};
use application::{AnalysisClient, DashboardService, IntakePipeline};
use domain::ReviewStore;
use infrastructure::{open_review_store, FeedbackConfig};
use std::sync::Arc;
use tracing::debug;

/// Wiring shared by every command
pub struct AppContext {
    pub config: FeedbackConfig,
    store: Arc<dyn ReviewStore>,
}

impl AppContext {
    pub async fn new(config: FeedbackConfig) -> Result<Self> {
        let store = open_review_store(&config.storage).await.with_context(|| {
            format!(
                "Failed to open {} review store at {}",
                config.storage.backend,
                config.storage.resolved_path().display()
            )
        })?;
        debug!(
            backend = %config.storage.backend,
            path = %config.storage.resolved_path().display(),
            "Review store ready"
        );

        Ok(Self { config, store })
    }

    pub fn intake_pipeline(&self) -> IntakePipeline {
        let settings = &self.config.llm;
        let analysis = AnalysisClient::from_config(&settings.to_provider_config())
            .with_parameters(settings.max_tokens, settings.temperature);
        IntakePipeline::new(analysis, self.store.clone())
    }

    pub fn dashboard(&self) -> DashboardService {
        DashboardService::new(self.store.clone())
            .with_policy(self.config.dashboard.rating_policy)
    }
}
