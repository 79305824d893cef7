use api::ApiError;

const LOGIN_FALLBACK: &str = "Login failed.";

/// Authentication state as observed by the client. The server's cookie is
/// authoritative; nothing is persisted locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// The startup check has not resolved yet.
    Unknown,
    Authenticated,
    Unauthenticated,
}

/// Gates the dashboard behind the backend session.
///
/// Lifecycle: `Unknown` while the single startup check is in flight, then
/// `Authenticated` or `Unauthenticated`. The check fails closed: a transport
/// failure reads as unauthenticated, never as an error state and never as
/// loading forever.
#[derive(Debug, Default)]
pub struct SessionGate {
    state: Option<SessionState>,
    login_error: Option<String>,
}

impl SessionGate {
    pub fn new() -> Self {
        Self {
            state: None,
            login_error: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state.unwrap_or(SessionState::Unknown)
    }

    pub fn is_resolving(&self) -> bool {
        self.state.is_none()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state == Some(SessionState::Authenticated)
    }

    /// Message from the last rejected login, cleared on success or logout.
    pub fn login_error(&self) -> Option<&str> {
        self.login_error.as_deref()
    }

    /// Apply the startup `/check-auth` outcome.
    pub fn resolve_check(&mut self, outcome: Result<bool, ApiError>) {
        self.state = Some(match outcome {
            Ok(true) => SessionState::Authenticated,
            Ok(false) => SessionState::Unauthenticated,
            Err(e) => {
                tracing::warn!("auth check failed, treating as unauthenticated: {}", e);
                SessionState::Unauthenticated
            }
        });
    }

    /// Apply a login attempt's outcome. Only a success transitions to
    /// authenticated; a rejection keeps the gate closed and holds the
    /// server's message for display.
    pub fn resolve_login(&mut self, outcome: Result<(), ApiError>) {
        match outcome {
            Ok(()) => {
                self.state = Some(SessionState::Authenticated);
                self.login_error = None;
            }
            Err(e) => {
                tracing::warn!("login rejected: {}", e);
                self.state = Some(SessionState::Unauthenticated);
                self.login_error = Some(match e {
                    ApiError::Auth(message) => message,
                    _ => LOGIN_FALLBACK.to_string(),
                });
            }
        }
    }

    /// Local logout is unconditional; the server-side revoke is best-effort
    /// and handled by the caller.
    pub fn logout(&mut self) {
        self.state = Some(SessionState::Unauthenticated);
        self.login_error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport_error() -> ApiError {
        ApiError::Api {
            status_code: 503,
            message: "unreachable".to_string(),
        }
    }

    #[test]
    fn starts_unknown() {
        let gate = SessionGate::new();
        assert!(gate.is_resolving());
        assert_eq!(gate.state(), SessionState::Unknown);
        assert!(!gate.is_authenticated());
    }

    #[test]
    fn successful_check_authenticates() {
        let mut gate = SessionGate::new();
        gate.resolve_check(Ok(true));
        assert!(gate.is_authenticated());
        assert!(!gate.is_resolving());
    }

    #[test]
    fn non_2xx_check_is_unauthenticated() {
        let mut gate = SessionGate::new();
        gate.resolve_check(Ok(false));
        assert_eq!(gate.state(), SessionState::Unauthenticated);
    }

    #[test]
    fn failed_check_fails_closed_not_loading_forever() {
        let mut gate = SessionGate::new();
        gate.resolve_check(Err(transport_error()));
        assert_eq!(gate.state(), SessionState::Unauthenticated);
        assert!(!gate.is_resolving());
    }

    #[test]
    fn login_success_clears_previous_error() {
        let mut gate = SessionGate::new();
        gate.resolve_check(Ok(false));
        gate.resolve_login(Err(ApiError::Auth("bad password".to_string())));
        assert_eq!(gate.login_error(), Some("bad password"));

        gate.resolve_login(Ok(()));
        assert!(gate.is_authenticated());
        assert!(gate.login_error().is_none());
    }

    #[test]
    fn rejected_login_surfaces_server_message() {
        let mut gate = SessionGate::new();
        gate.resolve_check(Ok(false));
        gate.resolve_login(Err(ApiError::Auth("invalid credentials".to_string())));
        assert_eq!(gate.state(), SessionState::Unauthenticated);
        assert_eq!(gate.login_error(), Some("invalid credentials"));
    }

    #[test]
    fn login_transport_failure_uses_fallback_message() {
        let mut gate = SessionGate::new();
        gate.resolve_check(Ok(false));
        gate.resolve_login(Err(transport_error()));
        assert_eq!(gate.login_error(), Some("Login failed."));
    }

    #[test]
    fn logout_is_unconditional() {
        let mut gate = SessionGate::new();
        gate.resolve_check(Ok(true));
        assert!(gate.is_authenticated());

        gate.logout();
        assert_eq!(gate.state(), SessionState::Unauthenticated);
        assert!(gate.login_error().is_none());
    }
}
