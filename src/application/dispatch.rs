//! The two `InferenceBackend` implementations, one per loading path.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::entities::analysis::Sentiment;
use crate::domain::error::DomainError;
use crate::domain::ports::inference_backend::InferenceBackend;
use crate::domain::ports::model_registry::RegisteredModel;
use crate::domain::ports::pipeline_provider::{SentimentPipeline, SummarizationPipeline};
use crate::domain::values::generation_params::GenerationParams;
use crate::domain::values::source_path::SourcePath;

/// Registry models called through the generic batch `predict` with a one-element batch.
pub struct RegistryBackend {
    sentiment: Arc<dyn RegisteredModel>,
    summarizer: Arc<dyn RegisteredModel>,
}

impl RegistryBackend {
    pub fn new(sentiment: Arc<dyn RegisteredModel>, summarizer: Arc<dyn RegisteredModel>) -> Self {
        Self {
            sentiment,
            summarizer,
        }
    }
}

async fn first_prediction(
    model: &dyn RegisteredModel,
    text: &str,
) -> Result<serde_json::Value, DomainError> {
    model
        .predict(&[text.to_string()])
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| DomainError::Inference(format!("{} returned no predictions", model.uri())))
}

fn field<'a>(
    prediction: &'a serde_json::Value,
    key: &str,
) -> Result<&'a serde_json::Value, DomainError> {
    prediction
        .get(key)
        .ok_or_else(|| DomainError::Parse(format!("prediction has no '{key}' field: {prediction}")))
}

#[async_trait]
impl InferenceBackend for RegistryBackend {
    fn source_path(&self) -> SourcePath {
        SourcePath::Registry
    }

    async fn predict_sentiment(&self, text: &str) -> Result<Sentiment, DomainError> {
        let prediction = first_prediction(self.sentiment.as_ref(), text).await?;
        let label = field(&prediction, "label")?
            .as_str()
            .ok_or_else(|| DomainError::Parse("'label' is not a string".into()))?
            .to_string();
        let score = field(&prediction, "score")?
            .as_f64()
            .ok_or_else(|| DomainError::Parse("'score' is not a number".into()))?;
        Ok(Sentiment { label, score })
    }

    async fn summarize(&self, text: &str) -> Result<String, DomainError> {
        let prediction = first_prediction(self.summarizer.as_ref(), text).await?;
        field(&prediction, "summary_text")?
            .as_str()
            .map(String::from)
            .ok_or_else(|| DomainError::Parse("'summary_text' is not a string".into()))
    }
}

/// Pipelines called directly; summaries use fixed decoding constraints.
pub struct PipelineBackend {
    sentiment: Arc<dyn SentimentPipeline>,
    summarizer: Arc<dyn SummarizationPipeline>,
    params: GenerationParams,
}

impl PipelineBackend {
    pub fn new(
        sentiment: Arc<dyn SentimentPipeline>,
        summarizer: Arc<dyn SummarizationPipeline>,
    ) -> Self {
        Self {
            sentiment,
            summarizer,
            params: GenerationParams::default(),
        }
    }
}

#[async_trait]
impl InferenceBackend for PipelineBackend {
    fn source_path(&self) -> SourcePath {
        SourcePath::LocalPipeline
    }

    async fn predict_sentiment(&self, text: &str) -> Result<Sentiment, DomainError> {
        self.sentiment
            .classify(text)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                DomainError::Inference(format!("{} returned no labels", self.sentiment.model()))
            })
    }

    async fn summarize(&self, text: &str) -> Result<String, DomainError> {
        self.summarizer
            .summarize(text, &self.params)
            .await?
            .into_iter()
            .next()
            .map(|s| s.summary_text)
            .ok_or_else(|| {
                DomainError::Inference(format!("{} returned no summary", self.summarizer.model()))
            })
    }
}
