use crate::domain::entities::analysis::Sentiment;
use crate::domain::error::DomainError;
use crate::domain::values::generation_params::GenerationParams;
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

/// One generated summary as returned by a summarization pipeline.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SummaryOutput {
    pub summary_text: String,
}

#[async_trait]
pub trait SentimentPipeline: Send + Sync {
    fn model(&self) -> &str;

    /// Classify `text`. Labels are ordered by descending score.
    async fn classify(&self, text: &str) -> Result<Vec<Sentiment>, DomainError>;
}

#[async_trait]
pub trait SummarizationPipeline: Send + Sync {
    fn model(&self) -> &str;

    async fn summarize(
        &self,
        text: &str,
        params: &GenerationParams,
    ) -> Result<Vec<SummaryOutput>, DomainError>;
}

/// Instantiates ready-to-run pipelines directly from pretrained model names.
#[async_trait]
pub trait PipelineProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn sentiment_pipeline(
        &self,
        model: &str,
    ) -> Result<Arc<dyn SentimentPipeline>, DomainError>;

    async fn summarization_pipeline(
        &self,
        model: &str,
    ) -> Result<Arc<dyn SummarizationPipeline>, DomainError>;
}
