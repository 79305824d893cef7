use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::error::ApiError;

const LOGIN_FALLBACK: &str = "Login failed.";

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginErrorBody {
    #[serde(default)]
    error: Option<String>,
}

impl ApiClient {
    /// Check whether the session cookie is still valid.
    /// GET /check-auth
    ///
    /// Only the status matters; the body is ignored.
    pub async fn check_auth(&self) -> crate::Result<bool> {
        let url = self.url("/check-auth");
        let response = self.client().get(&url).send().await?;
        Ok(response.status().is_success())
    }

    /// Exchange credentials for a session cookie.
    /// POST /login
    ///
    /// On success the cookie store picks up the session cookie from the
    /// response; on rejection the server's error message (or a fixed
    /// fallback) is surfaced as [`ApiError::Auth`].
    pub async fn login(&self, username: &str, password: &str) -> crate::Result<()> {
        let url = self.url("/login");
        let response = self
            .client()
            .post(&url)
            .json(&LoginRequest { username, password })
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!("logged in as {}", username);
            return Ok(());
        }

        // Error bodies are not guaranteed to be JSON.
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<LoginErrorBody>(&body)
            .ok()
            .and_then(|b| b.error)
            .unwrap_or_else(|| LOGIN_FALLBACK.to_string());
        Err(ApiError::Auth(message))
    }

    /// Revoke the session server-side.
    /// POST /logout
    ///
    /// Callers treat this as best-effort; local session state does not wait
    /// for the outcome.
    pub async fn logout(&self) -> crate::Result<()> {
        let url = self.url("/logout");
        let response = self.client().post(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Api {
                status_code: status.as_u16(),
                message: String::new(),
            });
        }
        Ok(())
    }
}
