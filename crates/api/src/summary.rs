use crate::client::ApiClient;
use crate::models::SummaryResponse;

impl ApiClient {
    /// AI summary of a repository's README and metadata.
    /// GET /ai-repository-summary?url=
    pub async fn repository_summary(&self, url: &str) -> crate::Result<SummaryResponse> {
        let endpoint = self.url("/ai-repository-summary");
        let response = self
            .client()
            .get(&endpoint)
            .query(&[("url", url)])
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// AI summary of a linked article's page content.
    /// GET /ai-article-summary?url=
    pub async fn article_summary(&self, url: &str) -> crate::Result<SummaryResponse> {
        let endpoint = self.url("/ai-article-summary");
        let response = self
            .client()
            .get(&endpoint)
            .query(&[("url", url)])
            .send()
            .await?;
        self.handle_response(response).await
    }
}
