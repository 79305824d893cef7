use crate::client::ApiClient;
use crate::models::{FeedItem, Locale};
use crate::parsers::parse_feed;

/// Raw-XML feed endpoints served by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedSource {
    GoogleCloud,
    Aws,
    Azure,
    GolangWeekly,
}

impl FeedSource {
    /// Whether the backend serves a localized variant of this feed.
    pub fn localized(self) -> bool {
        !matches!(self, FeedSource::GolangWeekly)
    }

    /// Backend path for this feed under the given locale. Feeds without a
    /// localized variant resolve to the same path for every locale.
    pub fn path(self, locale: Locale) -> String {
        match self {
            FeedSource::GoogleCloud => format!("/google-cloud-content{}", locale.suffix()),
            FeedSource::Aws => format!("/aws-content{}", locale.suffix()),
            FeedSource::Azure => format!("/azure-content{}", locale.suffix()),
            FeedSource::GolangWeekly => "/golang-weekly-content".to_string(),
        }
    }
}

impl ApiClient {
    /// Fetch a raw XML feed and normalize its items.
    pub async fn feed(&self, source: FeedSource, locale: Locale) -> crate::Result<Vec<FeedItem>> {
        let url = self.url(&source.path(locale));
        tracing::debug!("fetching feed from {}", url);

        let response = self.client().get(&url).send().await?;
        let xml = self.handle_text(response).await?;
        let items = parse_feed(xml.as_bytes())?;

        tracing::debug!("parsed {} items from {}", items.len(), url);
        Ok(items)
    }
}
