use crate::client::ApiClient;
use crate::models::{Locale, RssFeed};

impl ApiClient {
    /// InfoQ latest news, pre-parsed to JSON by the backend.
    /// GET /rss or /rss-ja
    pub async fn infoq_feed(&self, locale: Locale) -> crate::Result<RssFeed> {
        let url = self.url(&format!("/rss{}", locale.suffix()));
        let response = self.client().get(&url).send().await?;
        self.handle_response(response).await
    }
}
