pub mod api;
pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

use crate::application::analyze::AnalyzeUseCase;
use crate::application::fetch_news::FetchNewsUseCase;
use crate::application::resolve_models::ModelResolver;
use crate::config::{AppConfig, NewsConfig};
use crate::domain::entities::analysis::AnalysisResult;
use crate::domain::entities::model_set::ResolvedModelSet;
use crate::domain::entities::news_article::NewsArticle;
use crate::domain::error::DomainError;
use crate::domain::ports::model_registry::ModelRegistry;
use crate::domain::ports::news_provider::NewsProvider;
use crate::domain::ports::pipeline_provider::PipelineProvider;
use crate::domain::values::source_path::SourcePath;
use crate::infrastructure::feeds::alpha_vantage::AlphaVantageFeed;
use crate::infrastructure::pipelines::huggingface::HfPipelineProvider;
use crate::infrastructure::registry::mlflow::MlflowRegistry;
use std::sync::Arc;

pub struct FinNews {
    analyze_uc: AnalyzeUseCase,
    news_uc: FetchNewsUseCase,
}

impl FinNews {
    /// Resolve models and wire providers from configuration. Blocks until the
    /// registry attempt and, if needed, the fallback have finished.
    pub async fn new(config: &AppConfig) -> Result<Self, DomainError> {
        let registry: Option<Arc<dyn ModelRegistry>> = config
            .registry
            .as_ref()
            .map(|r| Arc::new(MlflowRegistry::new(r)) as Arc<dyn ModelRegistry>);
        let pipelines: Arc<dyn PipelineProvider> =
            Arc::new(HfPipelineProvider::new(&config.pipeline));

        let mut resolver = ModelResolver::new(registry, pipelines);
        if let Some(r) = &config.registry {
            if let Some(uri) = &r.sentiment_model {
                resolver = resolver.with_sentiment_uri(uri.clone());
            }
            if let Some(uri) = &r.summarization_model {
                resolver = resolver.with_summarization_uri(uri.clone());
            }
        }

        Self::with_resolver(resolver, news_provider(&config.news)).await
    }

    pub async fn with_providers(
        registry: Option<Arc<dyn ModelRegistry>>,
        pipelines: Arc<dyn PipelineProvider>,
        news: Option<Arc<dyn NewsProvider>>,
    ) -> Result<Self, DomainError> {
        Self::with_resolver(ModelResolver::new(registry, pipelines), news).await
    }

    pub async fn with_resolver(
        resolver: ModelResolver,
        news: Option<Arc<dyn NewsProvider>>,
    ) -> Result<Self, DomainError> {
        let models = resolver.resolve().await?;
        Ok(Self::from_parts(Some(models), news))
    }

    /// Assemble from already-resolved parts. `models` may be None, in which case
    /// analysis reports the models as unavailable.
    pub fn from_parts(
        models: Option<ResolvedModelSet>,
        news: Option<Arc<dyn NewsProvider>>,
    ) -> Self {
        Self {
            analyze_uc: AnalyzeUseCase::new(models),
            news_uc: FetchNewsUseCase::new(news),
        }
    }

    pub fn models_loaded(&self) -> bool {
        self.analyze_uc.models_loaded()
    }

    pub fn source_path(&self) -> Option<SourcePath> {
        self.analyze_uc.models().map(|m| m.source_path())
    }

    pub async fn analyze(&self, text: &str) -> Result<AnalysisResult, DomainError> {
        self.analyze_uc.execute(text).await
    }

    pub async fn fetch_news(&self, ticker: &str) -> Result<Vec<NewsArticle>, DomainError> {
        self.news_uc.execute(ticker).await
    }
}

/// News provider for the configured key, or None (with a warning) when no key is set.
pub fn news_provider(config: &NewsConfig) -> Option<Arc<dyn NewsProvider>> {
    match &config.api_key {
        Some(key) => {
            let feed = AlphaVantageFeed::new(key.clone(), &config.base_url);
            Some(Arc::new(feed) as Arc<dyn NewsProvider>)
        }
        None => {
            tracing::warn!("NEWS_API_KEY environment variable not set. News fetching will fail.");
            None
        }
    }
}
