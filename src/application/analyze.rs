use crate::domain::entities::analysis::AnalysisResult;
use crate::domain::entities::model_set::ResolvedModelSet;
use crate::domain::error::DomainError;

pub const EMPTY_TEXT_MESSAGE: &str = "Text cannot be empty.";

/// Sentiment + summary for one piece of text.
pub struct AnalyzeUseCase {
    models: Option<ResolvedModelSet>,
}

impl AnalyzeUseCase {
    pub fn new(models: Option<ResolvedModelSet>) -> Self {
        Self { models }
    }

    pub fn models_loaded(&self) -> bool {
        self.models.is_some()
    }

    pub fn models(&self) -> Option<&ResolvedModelSet> {
        self.models.as_ref()
    }

    pub async fn execute(&self, text: &str) -> Result<AnalysisResult, DomainError> {
        if text.trim().is_empty() {
            return Err(DomainError::Validation(EMPTY_TEXT_MESSAGE.into()));
        }

        let models = self
            .models
            .as_ref()
            .ok_or_else(|| DomainError::ModelUnavailable("Models are not available.".into()))?;

        let backend = models.backend();
        let sentiment = backend
            .predict_sentiment(text)
            .await
            .map_err(DomainError::into_inference)?;
        let summary = backend
            .summarize(text)
            .await
            .map_err(DomainError::into_inference)?;

        Ok(AnalysisResult::new(sentiment, summary))
    }
}
