use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    /// A required credential or endpoint is missing from configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The registry could not produce a model. Recovered by the local fallback.
    #[error("Model resolution error: {0}")]
    ModelResolution(String),

    #[error("Models unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// News provider unreachable or answered with an error status.
    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl DomainError {
    /// Re-label any failure raised while invoking a model as an inference failure.
    pub fn into_inference(self) -> Self {
        match self {
            DomainError::Inference(_) => self,
            other => DomainError::Inference(other.to_string()),
        }
    }

    /// Re-label any failure raised while loading from the registry as a resolution failure.
    pub fn into_resolution(self) -> Self {
        match self {
            DomainError::ModelResolution(_) => self,
            other => DomainError::ModelResolution(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_inference_keeps_inference() {
        let err = DomainError::Inference("boom".into()).into_inference();
        assert_eq!(err.to_string(), "Inference error: boom");
    }

    #[test]
    fn test_into_inference_wraps_other_variants() {
        let err = DomainError::Parse("bad json".into()).into_inference();
        assert!(matches!(err, DomainError::Inference(ref m) if m == "Parse error: bad json"));
    }

    #[test]
    fn test_into_resolution_wraps_upstream() {
        let err = DomainError::Upstream("connection refused".into()).into_resolution();
        assert!(matches!(err, DomainError::ModelResolution(_)));
    }
}
