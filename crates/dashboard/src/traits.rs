//! Trait abstractions over the backend API.
//!
//! The TUI hands real [`api::ApiClient`] calls to these seams; tests swap in
//! the mocks from [`crate::mocks`].

use async_trait::async_trait;

use api::{ApiClient, ApiError, SummaryResponse};

/// Which AI summary endpoint a panel's rows target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryKind {
    /// `/ai-repository-summary` — trending repository rows.
    Repository,
    /// `/ai-article-summary` — feed article rows.
    Article,
}

/// Session endpoints.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn check_auth(&self) -> Result<bool, ApiError>;
    async fn login(&self, username: &str, password: &str) -> Result<(), ApiError>;
    async fn logout(&self) -> Result<(), ApiError>;
}

/// On-demand AI summary endpoints, keyed by the target URL.
#[async_trait]
pub trait SummaryApi: Send + Sync {
    async fn summarize(&self, kind: SummaryKind, url: &str) -> Result<SummaryResponse, ApiError>;
}

#[async_trait]
impl AuthApi for ApiClient {
    async fn check_auth(&self) -> Result<bool, ApiError> {
        ApiClient::check_auth(self).await
    }

    async fn login(&self, username: &str, password: &str) -> Result<(), ApiError> {
        ApiClient::login(self, username, password).await
    }

    async fn logout(&self) -> Result<(), ApiError> {
        ApiClient::logout(self).await
    }
}

#[async_trait]
impl SummaryApi for ApiClient {
    async fn summarize(&self, kind: SummaryKind, url: &str) -> Result<SummaryResponse, ApiError> {
        match kind {
            SummaryKind::Repository => self.repository_summary(url).await,
            SummaryKind::Article => self.article_summary(url).await,
        }
    }
}
