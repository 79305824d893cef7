//! Mock implementations for testing session and summary flows.
//!
//! Ready-to-use implementations of the [`crate::traits`] seams with canned
//! outcomes and call recording, so tests can drive the state machines
//! without a backend.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use api::{ApiError, SummaryResponse};

use crate::traits::{AuthApi, SummaryApi, SummaryKind};

fn server_error() -> ApiError {
    ApiError::Api {
        status_code: 500,
        message: String::new(),
    }
}

/// Mock AuthApi with a configurable session and accepted credentials.
#[derive(Clone, Default)]
pub struct MockAuthApi {
    authenticated: Arc<Mutex<bool>>,
    accepted: Arc<Mutex<Option<(String, String)>>>,
    failing: Arc<Mutex<bool>>,
    logout_calls: Arc<Mutex<usize>>,
}

impl MockAuthApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretend a valid session cookie is already present.
    pub fn set_authenticated(&self, authenticated: bool) {
        *self.authenticated.lock().unwrap() = authenticated;
    }

    /// Credentials that `login` accepts.
    pub fn accept_credentials(&self, username: &str, password: &str) {
        *self.accepted.lock().unwrap() = Some((username.to_string(), password.to_string()));
    }

    /// Make every call fail at the transport level.
    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock().unwrap() = failing;
    }

    pub fn logout_calls(&self) -> usize {
        *self.logout_calls.lock().unwrap()
    }
}

#[async_trait]
impl AuthApi for MockAuthApi {
    async fn check_auth(&self) -> Result<bool, ApiError> {
        if *self.failing.lock().unwrap() {
            return Err(server_error());
        }
        Ok(*self.authenticated.lock().unwrap())
    }

    async fn login(&self, username: &str, password: &str) -> Result<(), ApiError> {
        if *self.failing.lock().unwrap() {
            return Err(server_error());
        }
        let accepted = self.accepted.lock().unwrap().clone();
        match accepted {
            Some((u, p)) if u == username && p == password => {
                *self.authenticated.lock().unwrap() = true;
                Ok(())
            }
            _ => Err(ApiError::Auth("invalid credentials".to_string())),
        }
    }

    async fn logout(&self) -> Result<(), ApiError> {
        *self.logout_calls.lock().unwrap() += 1;
        if *self.failing.lock().unwrap() {
            return Err(server_error());
        }
        *self.authenticated.lock().unwrap() = false;
        Ok(())
    }
}

/// Mock SummaryApi with canned summaries keyed by URL.
#[derive(Clone, Default)]
pub struct MockSummaryApi {
    summaries: Arc<Mutex<HashMap<String, String>>>,
    failing: Arc<Mutex<bool>>,
    calls: Arc<Mutex<Vec<(SummaryKind, String)>>>,
}

impl MockSummaryApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the summary returned for a URL.
    pub fn insert_summary(&self, url: &str, summary: &str) {
        self.summaries
            .lock()
            .unwrap()
            .insert(url.to_string(), summary.to_string());
    }

    /// Make every call return a non-2xx error.
    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock().unwrap() = failing;
    }

    /// Recorded calls, in order (for verification).
    pub fn calls(&self) -> Vec<(SummaryKind, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SummaryApi for MockSummaryApi {
    async fn summarize(&self, kind: SummaryKind, url: &str) -> Result<SummaryResponse, ApiError> {
        self.calls.lock().unwrap().push((kind, url.to_string()));
        if *self.failing.lock().unwrap() {
            return Err(server_error());
        }
        let summary = self
            .summaries
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .unwrap_or_default();
        Ok(SummaryResponse { summary })
    }
}
