use crate::domain::error::DomainError;
use crate::domain::values::model_uri::ModelUri;
use async_trait::async_trait;
use std::sync::Arc;

/// A model loaded from the registry, callable through the generic batch predict interface.
#[async_trait]
pub trait RegisteredModel: Send + Sync {
    /// Registry reference this handle was loaded from.
    fn uri(&self) -> &ModelUri;

    /// Resolved version number, when the registry reported one.
    fn version(&self) -> Option<&str>;

    /// Run a batch of inputs. One JSON prediction object per input, in input order.
    async fn predict(&self, inputs: &[String]) -> Result<Vec<serde_json::Value>, DomainError>;
}

/// Model versioning service that resolves named, staged models to loadable handles.
#[async_trait]
pub trait ModelRegistry: Send + Sync {
    fn name(&self) -> &str;

    async fn load_model(&self, uri: &ModelUri) -> Result<Arc<dyn RegisteredModel>, DomainError>;
}
