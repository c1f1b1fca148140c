//! News feeds that implement [`NewsProvider`](crate::domain::ports::news_provider::NewsProvider).

pub mod alpha_vantage;
