use crate::domain::entities::news_article::NewsArticle;
use crate::domain::error::DomainError;
use crate::domain::ports::news_provider::NewsProvider;
use crate::domain::values::ticker::Ticker;
use async_trait::async_trait;

/// Alpha Vantage NEWS_SENTIMENT feed (API key required).
pub struct AlphaVantageFeed {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl AlphaVantageFeed {
    pub fn new(api_key: String, base_url: &str) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn query_url(&self) -> String {
        format!("{}/query", self.base_url)
    }
}

#[async_trait]
impl NewsProvider for AlphaVantageFeed {
    fn name(&self) -> &str {
        "alpha_vantage"
    }

    async fn fetch_news(&self, ticker: &Ticker) -> Result<Vec<NewsArticle>, DomainError> {
        let resp = self
            .client
            .get(self.query_url())
            .query(&[
                ("function", "NEWS_SENTIMENT"),
                ("tickers", ticker.as_str()),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| DomainError::Upstream(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(DomainError::Upstream(format!(
                "Alpha Vantage returned {} for {ticker}",
                resp.status()
            )));
        }

        let data: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| DomainError::Upstream(format!("Alpha Vantage body is not JSON: {e}")))?;

        let articles = parse_feed(&data);
        if articles.is_empty() {
            tracing::info!(%ticker, "no news found or API limit reached");
        }
        Ok(articles)
    }
}

/// Map a NEWS_SENTIMENT body to articles.
///
/// A `Note` advisory (rate limiting), a missing or non-list `feed`, and an
/// empty `feed` all yield no articles.
pub fn parse_feed(data: &serde_json::Value) -> Vec<NewsArticle> {
    if data.get("Note").is_some() {
        return vec![];
    }

    let Some(feed) = data.get("feed").and_then(|f| f.as_array()) else {
        return vec![];
    };

    feed.iter()
        .map(|item| NewsArticle {
            title: string_field(item, "title"),
            url: string_field(item, "url"),
            published_date: string_field(item, "time_published"),
            site: string_field(item, "source"),
            summary: string_field(item, "summary"),
        })
        .collect()
}

fn string_field(item: &serde_json::Value, key: &str) -> Option<String> {
    item.get(key).and_then(|v| v.as_str()).map(String::from)
}
