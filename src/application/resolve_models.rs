use std::sync::Arc;

use crate::application::dispatch::{PipelineBackend, RegistryBackend};
use crate::domain::entities::model_set::ResolvedModelSet;
use crate::domain::error::DomainError;
use crate::domain::ports::model_registry::ModelRegistry;
use crate::domain::ports::pipeline_provider::PipelineProvider;
use crate::domain::values::model_uri::ModelUri;

pub const REGISTRY_STAGE: &str = "Production";
pub const REGISTRY_SENTIMENT_MODEL: &str = "finbert-sentiment-model";
pub const REGISTRY_SUMMARIZATION_MODEL: &str = "bart-summarization-model";

pub const PIPELINE_SENTIMENT_MODEL: &str = "ProsusAI/finbert";
pub const PIPELINE_SUMMARIZATION_MODEL: &str = "facebook/bart-large-cnn";

/// Startup-time model resolution: registry first, local pipelines as the fallback.
pub struct ModelResolver {
    registry: Option<Arc<dyn ModelRegistry>>,
    pipelines: Arc<dyn PipelineProvider>,
    sentiment_uri: ModelUri,
    summarization_uri: ModelUri,
}

impl ModelResolver {
    /// `registry` is None when no registry endpoint is configured.
    pub fn new(
        registry: Option<Arc<dyn ModelRegistry>>,
        pipelines: Arc<dyn PipelineProvider>,
    ) -> Self {
        Self {
            registry,
            pipelines,
            sentiment_uri: ModelUri::staged(REGISTRY_SENTIMENT_MODEL, REGISTRY_STAGE),
            summarization_uri: ModelUri::staged(REGISTRY_SUMMARIZATION_MODEL, REGISTRY_STAGE),
        }
    }

    pub fn with_sentiment_uri(mut self, uri: ModelUri) -> Self {
        self.sentiment_uri = uri;
        self
    }

    pub fn with_summarization_uri(mut self, uri: ModelUri) -> Self {
        self.summarization_uri = uri;
        self
    }

    /// Resolve both models. `ModelUnavailable` means neither path worked and the
    /// process must not serve.
    pub async fn resolve(&self) -> Result<ResolvedModelSet, DomainError> {
        match self.try_registry().await {
            Ok(set) => {
                tracing::info!("Models loaded successfully from the registry");
                Ok(set)
            }
            Err(e) => {
                tracing::warn!(error = %e, "registry unavailable, falling back to local pipelines");
                self.load_local().await
            }
        }
    }

    /// Registry path. Every failure is reported as `ModelResolution`.
    pub async fn try_registry(&self) -> Result<ResolvedModelSet, DomainError> {
        let registry = self.registry.as_ref().ok_or_else(|| {
            DomainError::ModelResolution("MLFLOW_TRACKING_URI is not set".into())
        })?;

        tracing::info!(
            registry = registry.name(),
            model = %self.sentiment_uri,
            "loading sentiment model"
        );
        let sentiment = registry
            .load_model(&self.sentiment_uri)
            .await
            .map_err(DomainError::into_resolution)?;

        tracing::info!(
            registry = registry.name(),
            model = %self.summarization_uri,
            "loading summarization model"
        );
        let summarizer = registry
            .load_model(&self.summarization_uri)
            .await
            .map_err(DomainError::into_resolution)?;

        tracing::info!(
            sentiment_version = sentiment.version().unwrap_or("unknown"),
            summarization_version = summarizer.version().unwrap_or("unknown"),
            "registry models resolved"
        );

        Ok(ResolvedModelSet::new(Arc::new(RegistryBackend::new(
            sentiment, summarizer,
        ))))
    }

    /// Local pipeline path bound to fixed pretrained model names.
    pub async fn load_local(&self) -> Result<ResolvedModelSet, DomainError> {
        tracing::info!(
            provider = self.pipelines.name(),
            model = PIPELINE_SENTIMENT_MODEL,
            "loading sentiment pipeline"
        );
        let sentiment = self
            .pipelines
            .sentiment_pipeline(PIPELINE_SENTIMENT_MODEL)
            .await
            .map_err(|e| DomainError::ModelUnavailable(e.to_string()))?;

        tracing::info!(
            provider = self.pipelines.name(),
            model = PIPELINE_SUMMARIZATION_MODEL,
            "loading summarization pipeline"
        );
        let summarizer = self
            .pipelines
            .summarization_pipeline(PIPELINE_SUMMARIZATION_MODEL)
            .await
            .map_err(|e| DomainError::ModelUnavailable(e.to_string()))?;

        tracing::info!("Models loaded successfully from local pipelines");
        Ok(ResolvedModelSet::new(Arc::new(PipelineBackend::new(
            sentiment, summarizer,
        ))))
    }
}
