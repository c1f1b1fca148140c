use crate::domain::entities::analysis::Sentiment;
use crate::domain::error::DomainError;
use crate::domain::values::source_path::SourcePath;
use async_trait::async_trait;

/// Uniform view over a resolved pair of sentiment and summarization models.
///
/// One implementation exists per loading path. The resolver picks one at startup
/// and every request goes through this trait, so callers never see which path won.
#[async_trait]
pub trait InferenceBackend: Send + Sync {
    /// Loading path that produced both models behind this backend.
    fn source_path(&self) -> SourcePath;

    async fn predict_sentiment(&self, text: &str) -> Result<Sentiment, DomainError>;

    async fn summarize(&self, text: &str) -> Result<String, DomainError>;
}
