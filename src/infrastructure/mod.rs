pub mod feeds;
pub mod pipelines;
pub mod registry;
