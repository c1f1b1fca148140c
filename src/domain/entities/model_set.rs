use crate::domain::ports::inference_backend::InferenceBackend;
use crate::domain::values::source_path::SourcePath;
use std::fmt;
use std::sync::Arc;

/// The sentiment and summarization models chosen at startup.
///
/// Both models sit behind a single backend, so a set can never mix a registry
/// model with a pipeline model. Cloning shares the backend.
#[derive(Clone)]
pub struct ResolvedModelSet {
    backend: Arc<dyn InferenceBackend>,
}

impl ResolvedModelSet {
    pub fn new(backend: Arc<dyn InferenceBackend>) -> Self {
        Self { backend }
    }

    pub fn source_path(&self) -> SourcePath {
        self.backend.source_path()
    }

    pub fn backend(&self) -> &dyn InferenceBackend {
        self.backend.as_ref()
    }
}

impl fmt::Debug for ResolvedModelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedModelSet")
            .field("source_path", &self.source_path())
            .finish_non_exhaustive()
    }
}
