use serde::Serialize;

/// Decoding constraints passed to a summarization pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GenerationParams {
    pub max_length: u32,
    pub min_length: u32,
    pub do_sample: bool,
}

impl Default for GenerationParams {
    /// Greedy decoding bounded to 40..=150 tokens.
    fn default() -> Self {
        Self {
            max_length: 150,
            min_length: 40,
            do_sample: false,
        }
    }
}
