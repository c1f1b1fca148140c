//! MLflow model registry over the REST 2.0 API.
//!
//! Loading resolves the reference (stage, version or alias) to a concrete model
//! version and checks that it is READY. The returned handle predicts through the
//! model's serving endpoint using the MLflow scoring protocol.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::RegistryConfig;
use crate::domain::error::DomainError;
use crate::domain::ports::model_registry::{ModelRegistry, RegisteredModel};
use crate::domain::values::model_uri::{ModelUri, VersionSelector};

const API_PREFIX: &str = "api/2.0/mlflow";

#[derive(Debug, Clone)]
struct Credentials {
    username: String,
    password: String,
}

pub struct MlflowRegistry {
    client: Client,
    tracking_uri: String,
    serving_uri: String,
    credentials: Option<Credentials>,
}

#[derive(Debug, Clone, Deserialize)]
struct ModelVersion {
    name: String,
    version: String,
    #[serde(default)]
    current_stage: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LatestVersionsResponse {
    #[serde(default)]
    model_versions: Vec<ModelVersion>,
}

#[derive(Debug, Deserialize)]
struct ModelVersionResponse {
    model_version: ModelVersion,
}

#[derive(Debug, Deserialize)]
struct MlflowErrorBody {
    #[serde(default)]
    error_code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl MlflowRegistry {
    pub fn new(config: &RegistryConfig) -> Self {
        Self {
            client: Client::new(),
            tracking_uri: config.tracking_uri.trim_end_matches('/').to_string(),
            serving_uri: config.serving_base().trim_end_matches('/').to_string(),
            credentials: config.credentials().map(|(u, p)| Credentials {
                username: u.to_string(),
                password: p.to_string(),
            }),
        }
    }

    fn with_auth(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.credentials {
            Some(c) => req.basic_auth(&c.username, Some(&c.password)),
            None => req,
        }
    }

    fn api_url(&self, endpoint: &str) -> String {
        format!("{}/{API_PREFIX}/{endpoint}", self.tracking_uri)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<T, DomainError> {
        let url = self.api_url(endpoint);
        let resp = self
            .with_auth(self.client.get(&url).query(query))
            .send()
            .await
            .map_err(|e| DomainError::ModelResolution(format!("MLflow request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<MlflowErrorBody>(&body)
                .ok()
                .map(|b| {
                    format!(
                        "{}: {}",
                        b.error_code.unwrap_or_else(|| "UNKNOWN".into()),
                        b.message.unwrap_or_default()
                    )
                })
                .unwrap_or(body);
            return Err(DomainError::ModelResolution(format!(
                "MLflow API {status}: {detail}"
            )));
        }

        resp.json()
            .await
            .map_err(|e| DomainError::ModelResolution(format!("MLflow parse error: {e}")))
    }

    async fn resolve_version(&self, uri: &ModelUri) -> Result<ModelVersion, DomainError> {
        let version = match &uri.selector {
            VersionSelector::Stage(stage) => {
                let latest: LatestVersionsResponse = self
                    .get_json(
                        "registered-models/get-latest-versions",
                        &[("name", uri.name.as_str()), ("stages", stage.as_str())],
                    )
                    .await?;
                pick_stage_version(latest.model_versions, stage).ok_or_else(|| {
                    DomainError::ModelResolution(format!(
                        "No version of '{}' in stage '{stage}'",
                        uri.name
                    ))
                })?
            }
            VersionSelector::Version(v) => {
                let v = v.to_string();
                let resp: ModelVersionResponse = self
                    .get_json(
                        "model-versions/get",
                        &[("name", uri.name.as_str()), ("version", v.as_str())],
                    )
                    .await?;
                resp.model_version
            }
            VersionSelector::Alias(alias) => {
                let resp: ModelVersionResponse = self
                    .get_json(
                        "registered-models/alias",
                        &[("name", uri.name.as_str()), ("alias", alias.as_str())],
                    )
                    .await?;
                resp.model_version
            }
        };

        match version.status.as_deref() {
            None | Some("READY") => Ok(version),
            Some(other) => Err(DomainError::ModelResolution(format!(
                "Model {uri} version {} is {other}, not READY",
                version.version
            ))),
        }
    }
}

/// Prefer a version whose reported stage matches; MLflow returns at most one per stage.
fn pick_stage_version(versions: Vec<ModelVersion>, stage: &str) -> Option<ModelVersion> {
    let mut fallback = None;
    for v in versions {
        match v.current_stage.as_deref() {
            Some(s) if s.eq_ignore_ascii_case(stage) => return Some(v),
            _ => {
                if fallback.is_none() {
                    fallback = Some(v);
                }
            }
        }
    }
    fallback
}

#[async_trait]
impl ModelRegistry for MlflowRegistry {
    fn name(&self) -> &str {
        "mlflow"
    }

    async fn load_model(&self, uri: &ModelUri) -> Result<Arc<dyn RegisteredModel>, DomainError> {
        let version = self.resolve_version(uri).await?;

        let model = MlflowModel {
            client: self.client.clone(),
            endpoint: format!(
                "{}/serving-endpoints/{}/invocations",
                self.serving_uri, version.name
            ),
            credentials: self.credentials.clone(),
            uri: uri.clone(),
            version: version.version,
        };
        model.check_serving().await?;
        tracing::info!(
            model = %uri,
            version = %model.version,
            endpoint = model.endpoint(),
            "resolved registry model"
        );
        Ok(Arc::new(model))
    }
}

/// Registry model invoked through its MLflow scoring endpoint.
pub struct MlflowModel {
    client: Client,
    endpoint: String,
    credentials: Option<Credentials>,
    uri: ModelUri,
    version: String,
}

#[derive(Serialize)]
struct InvocationRequest<'a> {
    inputs: &'a [String],
}

impl MlflowModel {
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Score an empty batch. A tracking server without a serving route for this
    /// model fails here instead of on the first request.
    async fn check_serving(&self) -> Result<(), DomainError> {
        self.predict(&[]).await.map(|_| ()).map_err(|e| {
            DomainError::ModelResolution(format!(
                "{} is not servable at {}: {e}",
                self.uri, self.endpoint
            ))
        })
    }
}

#[async_trait]
impl RegisteredModel for MlflowModel {
    fn uri(&self) -> &ModelUri {
        &self.uri
    }

    fn version(&self) -> Option<&str> {
        Some(&self.version)
    }

    async fn predict(&self, inputs: &[String]) -> Result<Vec<serde_json::Value>, DomainError> {
        let mut req = self
            .client
            .post(&self.endpoint)
            .json(&InvocationRequest { inputs });
        if let Some(c) = &self.credentials {
            req = req.basic_auth(&c.username, Some(&c.password));
        }

        let resp = req
            .send()
            .await
            .map_err(|e| DomainError::Inference(format!("MLflow invocation error: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(DomainError::Inference(format!(
                "MLflow invocation {status}: {body}"
            )));
        }

        let body: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| DomainError::Parse(format!("MLflow invocation parse error: {e}")))?;
        extract_predictions(body)
    }
}

/// Accept both `{"predictions": [...]}` and a bare JSON array.
fn extract_predictions(body: serde_json::Value) -> Result<Vec<serde_json::Value>, DomainError> {
    match body {
        serde_json::Value::Array(items) => Ok(items),
        serde_json::Value::Object(mut map) => match map.remove("predictions") {
            Some(serde_json::Value::Array(items)) => Ok(items),
            Some(other) => Ok(vec![other]),
            None => Err(DomainError::Parse(
                "MLflow response has no 'predictions' field".into(),
            )),
        },
        other => Err(DomainError::Parse(format!(
            "Unexpected MLflow response: {other}"
        ))),
    }
}
