//! HTTP client for the trendboard backend.
//!
//! The backend does all the heavy lifting (scraping GitHub trending pages,
//! retrieving and localizing RSS feeds, generating AI summaries, storing
//! sessions); this crate only wraps its endpoints in typed calls and
//! normalizes raw XML feeds into uniform items.

mod auth;
mod client;
mod error;
mod feeds;
pub mod models;
pub mod parsers;
mod rss;
mod summary;
mod trending;

pub use client::ApiClient;
pub use error::ApiError;
pub use feeds::FeedSource;
pub use models::{
    FeedItem, HtmlFragment, Locale, RssFeed, RssItem, SummaryResponse, TrendingItem,
};
pub use parsers::parse_feed;

pub type Result<T> = std::result::Result<T, ApiError>;
