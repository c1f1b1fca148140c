pub mod inference_backend;
pub mod model_registry;
pub mod news_provider;
pub mod pipeline_provider;
