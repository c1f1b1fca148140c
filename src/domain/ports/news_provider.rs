use crate::domain::entities::news_article::NewsArticle;
use crate::domain::error::DomainError;
use crate::domain::values::ticker::Ticker;
use async_trait::async_trait;

/// Third-party news source keyed by ticker.
#[async_trait]
pub trait NewsProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch articles in provider order. "No results" and "rate limited" both
    /// come back as an empty list.
    async fn fetch_news(&self, ticker: &Ticker) -> Result<Vec<NewsArticle>, DomainError>;
}
