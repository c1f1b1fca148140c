//! Pipelines bound to pretrained Hugging Face model names.
//!
//! Instantiation checks the model card on the hub so that a misspelled or
//! wrong-task model fails at startup rather than on the first request. Inference
//! goes to a pipeline server speaking the Hugging Face inference API, which can
//! be the hosted service or a self-hosted one.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::PipelineConfig;
use crate::domain::entities::analysis::Sentiment;
use crate::domain::error::DomainError;
use crate::domain::ports::pipeline_provider::{
    PipelineProvider, SentimentPipeline, SummarizationPipeline, SummaryOutput,
};
use crate::domain::values::generation_params::GenerationParams;

const SENTIMENT_TASKS: &[&str] = &["text-classification", "sentiment-analysis"];
const SUMMARIZATION_TASKS: &[&str] = &["summarization"];

pub struct HfPipelineProvider {
    client: Client,
    hub_url: String,
    inference_url: String,
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ModelCard {
    #[serde(default)]
    pipeline_tag: Option<String>,
}

impl HfPipelineProvider {
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            client: Client::new(),
            hub_url: config.hub_url.trim_end_matches('/').to_string(),
            inference_url: config.inference_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        }
    }

    /// Confirm the model exists and, when the hub reports a task, that it is one we can run.
    async fn check_model(&self, model: &str, tasks: &[&str]) -> Result<(), DomainError> {
        let url = format!("{}/api/models/{model}", self.hub_url);
        let mut req = self.client.get(&url);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }

        let resp = req.send().await.map_err(|e| {
            DomainError::ModelUnavailable(format!("Model hub unreachable for {model}: {e}"))
        })?;

        if !resp.status().is_success() {
            return Err(DomainError::ModelUnavailable(format!(
                "Model hub returned {} for {model}",
                resp.status()
            )));
        }

        let card: ModelCard = resp.json().await.map_err(|e| {
            DomainError::ModelUnavailable(format!("Bad model card for {model}: {e}"))
        })?;

        match card.pipeline_tag.as_deref() {
            Some(tag) if !tasks.contains(&tag) => Err(DomainError::ModelUnavailable(format!(
                "{model} is a '{tag}' model, expected one of {tasks:?}"
            ))),
            _ => Ok(()),
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{model}", self.inference_url)
    }
}

#[async_trait]
impl PipelineProvider for HfPipelineProvider {
    fn name(&self) -> &str {
        "huggingface"
    }

    async fn sentiment_pipeline(
        &self,
        model: &str,
    ) -> Result<Arc<dyn SentimentPipeline>, DomainError> {
        self.check_model(model, SENTIMENT_TASKS).await?;
        Ok(Arc::new(HfSentimentPipeline {
            client: self.client.clone(),
            endpoint: self.endpoint(model),
            token: self.token.clone(),
            model: model.to_string(),
        }))
    }

    async fn summarization_pipeline(
        &self,
        model: &str,
    ) -> Result<Arc<dyn SummarizationPipeline>, DomainError> {
        self.check_model(model, SUMMARIZATION_TASKS).await?;
        Ok(Arc::new(HfSummarizationPipeline {
            client: self.client.clone(),
            endpoint: self.endpoint(model),
            token: self.token.clone(),
            model: model.to_string(),
        }))
    }
}

#[derive(Serialize)]
struct PipelineRequest<'a> {
    inputs: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parameters: Option<&'a GenerationParams>,
}

async fn post_pipeline(
    client: &Client,
    endpoint: &str,
    token: Option<&str>,
    body: &PipelineRequest<'_>,
) -> Result<serde_json::Value, DomainError> {
    let mut req = client.post(endpoint).json(body);
    if let Some(token) = token {
        req = req.bearer_auth(token);
    }

    let resp = req
        .send()
        .await
        .map_err(|e| DomainError::Inference(format!("Pipeline request error: {e}")))?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        return Err(DomainError::Inference(format!("Pipeline {status}: {body}")));
    }

    resp.json()
        .await
        .map_err(|e| DomainError::Parse(format!("Pipeline parse error: {e}")))
}

pub struct HfSentimentPipeline {
    client: Client,
    endpoint: String,
    token: Option<String>,
    model: String,
}

#[async_trait]
impl SentimentPipeline for HfSentimentPipeline {
    fn model(&self) -> &str {
        &self.model
    }

    async fn classify(&self, text: &str) -> Result<Vec<Sentiment>, DomainError> {
        let body = post_pipeline(
            &self.client,
            &self.endpoint,
            self.token.as_deref(),
            &PipelineRequest {
                inputs: text,
                parameters: None,
            },
        )
        .await?;
        parse_classification(body)
    }
}

/// Text classification comes back as `[[{label, score}, ...]]` for a single
/// input, or flat `[{label, score}, ...]` from older servers.
fn parse_classification(body: serde_json::Value) -> Result<Vec<Sentiment>, DomainError> {
    let flat = match body {
        serde_json::Value::Array(mut outer)
            if outer.first().map(|v| v.is_array()).unwrap_or(false) =>
        {
            outer.swap_remove(0)
        }
        other => other,
    };

    let mut labels: Vec<Sentiment> = serde_json::from_value(flat)
        .map_err(|e| DomainError::Parse(format!("Unexpected classification output: {e}")))?;
    labels.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    Ok(labels)
}

pub struct HfSummarizationPipeline {
    client: Client,
    endpoint: String,
    token: Option<String>,
    model: String,
}

#[async_trait]
impl SummarizationPipeline for HfSummarizationPipeline {
    fn model(&self) -> &str {
        &self.model
    }

    async fn summarize(
        &self,
        text: &str,
        params: &GenerationParams,
    ) -> Result<Vec<SummaryOutput>, DomainError> {
        let body = post_pipeline(
            &self.client,
            &self.endpoint,
            self.token.as_deref(),
            &PipelineRequest {
                inputs: text,
                parameters: Some(params),
            },
        )
        .await?;
        serde_json::from_value(body)
            .map_err(|e| DomainError::Parse(format!("Unexpected summarization output: {e}")))
    }
}
