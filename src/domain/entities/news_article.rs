use serde::{Deserialize, Serialize};

/// A news article as passed through from the provider. No field is required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub title: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "publishedDate")]
    pub published_date: Option<String>,
    pub site: Option<String>,
    pub summary: Option<String>,
}
