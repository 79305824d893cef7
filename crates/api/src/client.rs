use reqwest::Client;

use crate::error::ApiError;

/// Typed client for the trendboard backend.
///
/// Holds a shared `reqwest::Client`; the caller is expected to build one with
/// a cookie store, since the backend's session cookie is the only session
/// state the client carries.
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create an ApiClient with a reqwest Client and the backend origin.
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Get the HTTP client for making requests.
    pub(crate) fn client(&self) -> &Client {
        &self.client
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> crate::Result<T> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ApiError::Api {
                status_code: status.as_u16(),
                message: body,
            });
        }
        let deserializer = &mut serde_json::Deserializer::from_str(&body);
        serde_path_to_error::deserialize(deserializer).map_err(|e| ApiError::Json {
            path: e.path().to_string(),
            source: e.into_inner(),
        })
    }

    /// Like [`handle_response`](Self::handle_response) but for endpoints that
    /// return raw text. Error bodies are carried in the error, never parsed.
    pub(crate) async fn handle_text(&self, response: reqwest::Response) -> crate::Result<String> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ApiError::Api {
                status_code: status.as_u16(),
                message: body,
            });
        }
        Ok(body)
    }
}
