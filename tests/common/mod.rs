//! Shared test helpers.
#![allow(dead_code)]

use async_trait::async_trait;
use finnews::domain::entities::analysis::Sentiment;
use finnews::domain::entities::news_article::NewsArticle;
use finnews::domain::error::DomainError;
use finnews::domain::ports::model_registry::{ModelRegistry, RegisteredModel};
use finnews::domain::ports::news_provider::NewsProvider;
use finnews::domain::ports::pipeline_provider::{
    PipelineProvider, SentimentPipeline, SummarizationPipeline, SummaryOutput,
};
use finnews::domain::values::generation_params::GenerationParams;
use finnews::domain::values::model_uri::ModelUri;
use finnews::domain::values::ticker::Ticker;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const APPLE_TEXT: &str = "Apple announced a new iPhone with improved features.";

// ── Registry ───────────────────────────────────────────────────

/// Registry that serves canned predictions, or fails every load with `error`.
pub struct FakeRegistry {
    pub error: Option<String>,
    pub fail_on: Option<String>,
    pub loaded: Mutex<Vec<String>>,
}

impl FakeRegistry {
    pub fn working() -> Arc<Self> {
        Arc::new(Self {
            error: None,
            fail_on: None,
            loaded: Mutex::new(vec![]),
        })
    }

    pub fn failing(error: &str) -> Arc<Self> {
        Arc::new(Self {
            error: Some(error.to_string()),
            fail_on: None,
            loaded: Mutex::new(vec![]),
        })
    }

    /// Loads everything except the model named `name`.
    pub fn failing_on(name: &str) -> Arc<Self> {
        Arc::new(Self {
            error: None,
            fail_on: Some(name.to_string()),
            loaded: Mutex::new(vec![]),
        })
    }

    pub fn loaded(&self) -> Vec<String> {
        self.loaded.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelRegistry for FakeRegistry {
    fn name(&self) -> &str {
        "fake-registry"
    }

    async fn load_model(&self, uri: &ModelUri) -> Result<Arc<dyn RegisteredModel>, DomainError> {
        if let Some(e) = &self.error {
            return Err(DomainError::Upstream(e.clone()));
        }
        if self.fail_on.as_deref() == Some(uri.name.as_str()) {
            return Err(DomainError::ModelResolution(format!("RESOURCE_DOES_NOT_EXIST: {uri}")));
        }
        self.loaded.lock().unwrap().push(uri.to_string());
        Ok(Arc::new(FakeRegisteredModel { uri: uri.clone() }))
    }
}

/// Sentiment models answer `{label, score}`, everything else `{summary_text}`.
pub struct FakeRegisteredModel {
    uri: ModelUri,
}

#[async_trait]
impl RegisteredModel for FakeRegisteredModel {
    fn uri(&self) -> &ModelUri {
        &self.uri
    }

    fn version(&self) -> Option<&str> {
        Some("1")
    }

    async fn predict(&self, inputs: &[String]) -> Result<Vec<serde_json::Value>, DomainError> {
        Ok(inputs
            .iter()
            .map(|text| {
                if self.uri.name.contains("sentiment") {
                    json!({"label": "positive", "score": 0.97})
                } else {
                    json!({"summary_text": format!("registry summary: {}", first_words(text))})
                }
            })
            .collect())
    }
}

// ── Local pipelines ────────────────────────────────────────────

pub struct FakePipelines {
    pub fail: bool,
    pub requested: Mutex<Vec<String>>,
    pub last_params: Arc<Mutex<Option<GenerationParams>>>,
}

impl FakePipelines {
    pub fn working() -> Arc<Self> {
        Arc::new(Self {
            fail: false,
            requested: Mutex::new(vec![]),
            last_params: Arc::new(Mutex::new(None)),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            requested: Mutex::new(vec![]),
            last_params: Arc::new(Mutex::new(None)),
        })
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl PipelineProvider for FakePipelines {
    fn name(&self) -> &str {
        "fake-pipelines"
    }

    async fn sentiment_pipeline(
        &self,
        model: &str,
    ) -> Result<Arc<dyn SentimentPipeline>, DomainError> {
        if self.fail {
            return Err(DomainError::ModelUnavailable(format!("cannot download {model}")));
        }
        self.requested.lock().unwrap().push(model.to_string());
        Ok(Arc::new(FakeSentimentPipeline {
            model: model.to_string(),
        }))
    }

    async fn summarization_pipeline(
        &self,
        model: &str,
    ) -> Result<Arc<dyn SummarizationPipeline>, DomainError> {
        if self.fail {
            return Err(DomainError::ModelUnavailable(format!("cannot download {model}")));
        }
        self.requested.lock().unwrap().push(model.to_string());
        Ok(Arc::new(FakeSummarizationPipeline {
            model: model.to_string(),
            last_params: self.last_params.clone(),
        }))
    }
}

/// Labels by keyword, deterministic.
pub struct FakeSentimentPipeline {
    model: String,
}

#[async_trait]
impl SentimentPipeline for FakeSentimentPipeline {
    fn model(&self) -> &str {
        &self.model
    }

    async fn classify(&self, text: &str) -> Result<Vec<Sentiment>, DomainError> {
        let label = if text.contains("fell") || text.contains("loss") {
            "negative"
        } else {
            "neutral"
        };
        Ok(vec![
            Sentiment {
                label: label.into(),
                score: 0.88,
            },
            Sentiment {
                label: "positive".into(),
                score: 0.12,
            },
        ])
    }
}

pub struct FakeSummarizationPipeline {
    model: String,
    last_params: Arc<Mutex<Option<GenerationParams>>>,
}

#[async_trait]
impl SummarizationPipeline for FakeSummarizationPipeline {
    fn model(&self) -> &str {
        &self.model
    }

    async fn summarize(
        &self,
        text: &str,
        params: &GenerationParams,
    ) -> Result<Vec<SummaryOutput>, DomainError> {
        *self.last_params.lock().unwrap() = Some(*params);
        Ok(vec![SummaryOutput {
            summary_text: format!("pipeline summary: {}", first_words(text)),
        }])
    }
}

/// Pipeline whose models load but raise on every call.
pub struct BrokenPipelines;

#[async_trait]
impl PipelineProvider for BrokenPipelines {
    fn name(&self) -> &str {
        "broken"
    }

    async fn sentiment_pipeline(
        &self,
        _model: &str,
    ) -> Result<Arc<dyn SentimentPipeline>, DomainError> {
        Ok(Arc::new(BrokenPipeline))
    }

    async fn summarization_pipeline(
        &self,
        _model: &str,
    ) -> Result<Arc<dyn SummarizationPipeline>, DomainError> {
        Ok(Arc::new(BrokenPipeline))
    }
}

pub struct BrokenPipeline;

#[async_trait]
impl SentimentPipeline for BrokenPipeline {
    fn model(&self) -> &str {
        "broken"
    }

    async fn classify(&self, _text: &str) -> Result<Vec<Sentiment>, DomainError> {
        Err(DomainError::Parse("tensor shape mismatch".into()))
    }
}

#[async_trait]
impl SummarizationPipeline for BrokenPipeline {
    fn model(&self) -> &str {
        "broken"
    }

    async fn summarize(
        &self,
        _text: &str,
        _params: &GenerationParams,
    ) -> Result<Vec<SummaryOutput>, DomainError> {
        Err(DomainError::Inference("out of memory".into()))
    }
}

// ── News ───────────────────────────────────────────────────────

pub struct FakeNews {
    pub articles: Vec<NewsArticle>,
    pub error: Option<String>,
    pub calls: AtomicUsize,
    pub tickers: Mutex<Vec<String>>,
}

impl FakeNews {
    pub fn with_articles(count: usize) -> Arc<Self> {
        Arc::new(Self {
            articles: (0..count).map(article).collect(),
            error: None,
            calls: AtomicUsize::new(0),
            tickers: Mutex::new(vec![]),
        })
    }

    pub fn failing(error: &str) -> Arc<Self> {
        Arc::new(Self {
            articles: vec![],
            error: Some(error.to_string()),
            calls: AtomicUsize::new(0),
            tickers: Mutex::new(vec![]),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NewsProvider for FakeNews {
    fn name(&self) -> &str {
        "fake-news"
    }

    async fn fetch_news(&self, ticker: &Ticker) -> Result<Vec<NewsArticle>, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.tickers.lock().unwrap().push(ticker.to_string());
        match &self.error {
            Some(e) => Err(DomainError::Upstream(e.clone())),
            None => Ok(self.articles.clone()),
        }
    }
}

pub fn article(i: usize) -> NewsArticle {
    NewsArticle {
        title: Some(format!("Headline {i}")),
        url: Some(format!("https://news.example.com/{i}")),
        published_date: Some("20240910T170000".into()),
        site: Some("Example Wire".into()),
        summary: Some(format!("Summary {i}")),
    }
}

// ── Fake HTTP upstreams ────────────────────────────────────────

/// Serve `app` on an ephemeral localhost port and return its base URL.
pub async fn spawn_upstream(app: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn first_words(text: &str) -> String {
    text.split_whitespace().take(4).collect::<Vec<_>>().join(" ")
}
