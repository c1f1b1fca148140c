pub mod analyze;
pub mod dispatch;
pub mod fetch_news;
pub mod resolve_models;
