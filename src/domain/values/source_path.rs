use std::fmt;

/// Which loading path produced the active model set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourcePath {
    /// Models resolved from the model registry
    Registry,
    /// Models instantiated from fixed pretrained pipeline names
    LocalPipeline,
}

impl fmt::Display for SourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Registry => write!(f, "registry"),
            Self::LocalPipeline => write!(f, "local_pipeline"),
        }
    }
}
