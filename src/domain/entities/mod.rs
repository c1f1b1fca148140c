pub mod analysis;
pub mod model_set;
pub mod news_article;
