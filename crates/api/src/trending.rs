use crate::client::ApiClient;
use crate::models::TrendingItem;

impl ApiClient {
    /// Today's trending repositories across all languages.
    /// GET /github-trending
    pub async fn github_trending(&self) -> crate::Result<Vec<TrendingItem>> {
        let url = self.url("/github-trending");
        let response = self.client().get(&url).send().await?;
        self.handle_response(response).await
    }

    /// Today's trending Go repositories.
    /// GET /golang-repository-trending
    pub async fn golang_repository_trending(&self) -> crate::Result<Vec<TrendingItem>> {
        let url = self.url("/golang-repository-trending");
        let response = self.client().get(&url).send().await?;
        self.handle_response(response).await
    }
}
