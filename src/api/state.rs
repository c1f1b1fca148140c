use std::sync::Arc;

use crate::config::AppConfig;
use crate::domain::error::DomainError;
use crate::FinNews;

/// Shared state for all handlers. Built once before the listener starts, never mutated.
pub struct AppState {
    pub finnews: FinNews,
}

impl AppState {
    pub fn new(finnews: FinNews) -> Arc<Self> {
        Arc::new(Self { finnews })
    }

    pub async fn from_config(config: &AppConfig) -> Result<Arc<Self>, DomainError> {
        let finnews = FinNews::new(config).await?;
        Ok(Self::new(finnews))
    }
}
