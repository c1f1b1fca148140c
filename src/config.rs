//! Process configuration, read once from the environment at startup.
//!
//! Variables:
//!   MLFLOW_TRACKING_URI      model registry endpoint (unset: local pipelines only)
//!   MLFLOW_TRACKING_USERNAME registry basic-auth user
//!   MLFLOW_TRACKING_PASSWORD registry basic-auth password
//!   MLFLOW_SERVING_URI       base URL for registry model invocations (default: tracking URI)
//!   MLFLOW_SENTIMENT_MODEL_URI      registry reference for the sentiment model
//!   MLFLOW_SUMMARIZATION_MODEL_URI  registry reference for the summarization model
//!   HF_HUB_URL               model hub used to instantiate local pipelines
//!   HF_INFERENCE_URL         pipeline inference server
//!   HF_TOKEN                 bearer token for the pipeline server
//!   NEWS_API_KEY             news provider key (unset: news endpoint disabled)
//!   NEWS_API_BASE_URL        news provider base URL
//!   BIND_ADDR                HTTP listen address (default: 0.0.0.0:8000)

use std::collections::HashMap;
use std::path::Path;

use crate::domain::error::DomainError;
use crate::domain::values::model_uri::ModelUri;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_HF_HUB_URL: &str = "https://huggingface.co";
pub const DEFAULT_HF_INFERENCE_URL: &str = "https://api-inference.huggingface.co";
pub const DEFAULT_NEWS_BASE_URL: &str = "https://www.alphavantage.co";

#[derive(Debug, Clone, PartialEq)]
pub struct RegistryConfig {
    pub tracking_uri: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub serving_uri: Option<String>,
    /// Overrides `models:/finbert-sentiment-model/Production`
    pub sentiment_model: Option<ModelUri>,
    /// Overrides `models:/bart-summarization-model/Production`
    pub summarization_model: Option<ModelUri>,
}

impl RegistryConfig {
    /// Basic-auth pair, only when both halves are configured.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.username, &self.password) {
            (Some(u), Some(p)) => Some((u.as_str(), p.as_str())),
            _ => None,
        }
    }

    pub fn serving_base(&self) -> &str {
        self.serving_uri.as_deref().unwrap_or(&self.tracking_uri)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub hub_url: String,
    pub inference_url: String,
    pub token: Option<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            hub_url: DEFAULT_HF_HUB_URL.to_string(),
            inference_url: DEFAULT_HF_INFERENCE_URL.to_string(),
            token: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewsConfig {
    pub api_key: Option<String>,
    pub base_url: String,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_NEWS_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// None when no tracking URI is configured; resolution then goes straight to the fallback.
    pub registry: Option<RegistryConfig>,
    pub pipeline: PipelineConfig,
    pub news: NewsConfig,
    pub bind_addr: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            registry: None,
            pipeline: PipelineConfig::default(),
            news: NewsConfig::default(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
        }
    }
}

impl AppConfig {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Result<Self, DomainError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration from a dotenv-style file only, ignoring the process environment.
    pub fn from_env_file(path: &Path) -> Result<Self, DomainError> {
        let mut vars = HashMap::new();
        let iter = dotenvy::from_path_iter(path)
            .map_err(|e| DomainError::Configuration(format!("{}: {e}", path.display())))?;
        for item in iter {
            let (key, value) = item
                .map_err(|e| DomainError::Configuration(format!("{}: {e}", path.display())))?;
            vars.insert(key, value);
        }
        Self::from_lookup(|key| vars.get(key).cloned())
    }

    /// Build from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let model_uri = |key: &str| -> Result<Option<ModelUri>, DomainError> {
            get(key)
                .map(|raw| {
                    raw.parse::<ModelUri>()
                        .map_err(|e| DomainError::Configuration(format!("{key}: {e}")))
                })
                .transpose()
        };

        let registry = match get("MLFLOW_TRACKING_URI") {
            Some(tracking_uri) => Some(RegistryConfig {
                tracking_uri: tracking_uri.trim_end_matches('/').to_string(),
                username: get("MLFLOW_TRACKING_USERNAME"),
                password: get("MLFLOW_TRACKING_PASSWORD"),
                serving_uri: get("MLFLOW_SERVING_URI")
                    .map(|s| s.trim_end_matches('/').to_string()),
                sentiment_model: model_uri("MLFLOW_SENTIMENT_MODEL_URI")?,
                summarization_model: model_uri("MLFLOW_SUMMARIZATION_MODEL_URI")?,
            }),
            None => None,
        };

        let pipeline = PipelineConfig {
            hub_url: get("HF_HUB_URL").unwrap_or_else(|| DEFAULT_HF_HUB_URL.to_string()),
            inference_url: get("HF_INFERENCE_URL")
                .unwrap_or_else(|| DEFAULT_HF_INFERENCE_URL.to_string()),
            token: get("HF_TOKEN"),
        };

        let news = NewsConfig {
            api_key: get("NEWS_API_KEY"),
            base_url: get("NEWS_API_BASE_URL").unwrap_or_else(|| DEFAULT_NEWS_BASE_URL.to_string()),
        };

        Ok(Self {
            registry,
            pipeline,
            news,
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_empty() {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(config.registry.is_none());
        assert!(config.news.api_key.is_none());
    }

    #[test]
    fn test_blank_tracking_uri_means_no_registry() {
        let config =
            AppConfig::from_lookup(lookup_from(&[("MLFLOW_TRACKING_URI", "   ")])).unwrap();
        assert!(config.registry.is_none());
    }

    #[test]
    fn test_registry_settings() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("MLFLOW_TRACKING_URI", "http://mlflow:5000/"),
            ("MLFLOW_TRACKING_USERNAME", "svc"),
            ("MLFLOW_TRACKING_PASSWORD", "secret"),
        ]))
        .unwrap();
        let registry = config.registry.unwrap();
        assert_eq!(registry.tracking_uri, "http://mlflow:5000");
        assert_eq!(registry.credentials(), Some(("svc", "secret")));
        assert_eq!(registry.serving_base(), "http://mlflow:5000");
    }

    #[test]
    fn test_credentials_need_both_halves() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("MLFLOW_TRACKING_URI", "http://mlflow:5000"),
            ("MLFLOW_TRACKING_USERNAME", "svc"),
        ]))
        .unwrap();
        assert!(config.registry.unwrap().credentials().is_none());
    }

    #[test]
    fn test_serving_uri_override() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("MLFLOW_TRACKING_URI", "http://mlflow:5000"),
            ("MLFLOW_SERVING_URI", "http://serving:8080/"),
        ]))
        .unwrap();
        assert_eq!(config.registry.unwrap().serving_base(), "http://serving:8080");
    }

    #[test]
    fn test_registry_model_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("MLFLOW_TRACKING_URI", "http://mlflow:5000"),
            ("MLFLOW_SENTIMENT_MODEL_URI", "models:/finbert-sentiment-model/4"),
            ("MLFLOW_SUMMARIZATION_MODEL_URI", "models:/bart-summarization-model@champion"),
        ]))
        .unwrap();
        let registry = config.registry.unwrap();
        assert_eq!(
            registry.sentiment_model.unwrap().to_string(),
            "models:/finbert-sentiment-model/4"
        );
        assert_eq!(
            registry.summarization_model.unwrap().to_string(),
            "models:/bart-summarization-model@champion"
        );
    }

    #[test]
    fn test_registry_models_default_to_none() {
        let config =
            AppConfig::from_lookup(lookup_from(&[("MLFLOW_TRACKING_URI", "http://mlflow:5000")]))
                .unwrap();
        let registry = config.registry.unwrap();
        assert!(registry.sentiment_model.is_none());
        assert!(registry.summarization_model.is_none());
    }

    #[test]
    fn test_malformed_model_uri_is_configuration_error() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("MLFLOW_TRACKING_URI", "http://mlflow:5000"),
            ("MLFLOW_SENTIMENT_MODEL_URI", "runs:/abc/model"),
        ]))
        .unwrap_err();
        assert!(matches!(err, DomainError::Configuration(_)));
        assert!(err.to_string().contains("MLFLOW_SENTIMENT_MODEL_URI"));
    }

    #[test]
    fn test_from_env_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "NEWS_API_KEY=demo").unwrap();
        writeln!(file, "BIND_ADDR=127.0.0.1:9000").unwrap();
        writeln!(file, "HF_TOKEN=hf_abc").unwrap();

        let config = AppConfig::from_env_file(file.path()).unwrap();
        assert_eq!(config.news.api_key.as_deref(), Some("demo"));
        assert_eq!(config.bind_addr, "127.0.0.1:9000");
        assert_eq!(config.pipeline.token.as_deref(), Some("hf_abc"));
        assert!(config.registry.is_none());
    }

    #[test]
    fn test_from_missing_env_file_is_configuration_error() {
        let err = AppConfig::from_env_file(Path::new("/definitely/not/here/.env")).unwrap_err();
        assert!(matches!(err, DomainError::Configuration(_)));
    }
}
