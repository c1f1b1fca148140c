use crate::domain::entities::news_article::NewsArticle;
use crate::domain::error::DomainError;
use crate::domain::ports::news_provider::NewsProvider;
use crate::domain::values::ticker::Ticker;
use std::sync::Arc;

/// Upper bound on articles returned per ticker.
pub const MAX_ARTICLES: usize = 20;

pub struct FetchNewsUseCase {
    provider: Option<Arc<dyn NewsProvider>>,
}

impl FetchNewsUseCase {
    /// `provider` is None when no news API key is configured.
    pub fn new(provider: Option<Arc<dyn NewsProvider>>) -> Self {
        Self { provider }
    }

    pub async fn execute(&self, ticker: &str) -> Result<Vec<NewsArticle>, DomainError> {
        let provider = self.provider.as_ref().ok_or_else(|| {
            DomainError::Configuration("News API key is not configured on the server.".into())
        })?;

        let ticker = Ticker::new(ticker);
        let mut articles = provider.fetch_news(&ticker).await?;
        articles.truncate(MAX_ARTICLES);
        Ok(articles)
    }
}
