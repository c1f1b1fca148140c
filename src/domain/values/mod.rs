pub mod generation_params;
pub mod model_uri;
pub mod source_path;
pub mod ticker;
