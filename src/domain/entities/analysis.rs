use serde::{Deserialize, Serialize};

/// Sentiment classification as reported by the model. The score is never rescaled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    pub label: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub sentiment: Sentiment,
    pub summary: String,
}

impl AnalysisResult {
    pub fn new(sentiment: Sentiment, summary: String) -> Self {
        Self { sentiment, summary }
    }
}
