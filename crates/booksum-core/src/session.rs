use crate::api::SummarizerApi;
use crate::error::Result;
use crate::model::{LoginRequest, RegisterRequest, Role, Session, UserSummary};

/// Where the client stands with the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Startup validation has not finished. Every route renders the loading screen.
    Loading,
    Anonymous,
    Authenticated(Session),
}

impl SessionState {
    /// `None` while loading: no routing decision can be made yet.
    pub fn role(&self) -> Option<Role> {
        match self {
            Self::Loading => None,
            Self::Anonymous => Some(Role::Anonymous),
            Self::Authenticated(session) => Some(session.role()),
        }
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::Authenticated(session) => Some(session),
            _ => None,
        }
    }

    pub fn user(&self) -> Option<&UserSummary> {
        self.session().map(|s| &s.user)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Single owner of the authenticated identity.
///
/// The store is the only thing that moves the client between anonymous and
/// authenticated. Token persistence happens in the API layer (save on
/// login/register) and here (clear on logout or failed validation).
pub struct SessionStore<A: SummarizerApi> {
    api: A,
    state: SessionState,
}

impl<A: SummarizerApi> SessionStore<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: SessionState::Loading,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn session(&self) -> Option<&Session> {
        self.state.session()
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Restore a persisted session.
    ///
    /// Without a stored token this makes no network call. With one, the token
    /// is checked against the backend; any failure clears it and lands in
    /// `Anonymous` without surfacing an error.
    pub async fn init(&mut self) -> &SessionState {
        self.state = SessionState::Loading;

        let Some(token) = self.api.tokens().load() else {
            self.state = SessionState::Anonymous;
            return &self.state;
        };

        self.state = match self.api.validate_session().await {
            Ok(user) => {
                tracing::debug!(user = %user.username, "restored session");
                SessionState::Authenticated(Session::new(token, user))
            }
            Err(e) => {
                tracing::debug!("stored token rejected, signing out: {e}");
                if let Err(e) = self.api.tokens().clear() {
                    tracing::warn!("failed to clear stale token: {e}");
                }
                SessionState::Anonymous
            }
        };
        &self.state
    }

    /// On failure the current state is kept and the error returned.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<Session> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let session = self.api.login(&request).await?;
        self.state = SessionState::Authenticated(session.clone());
        Ok(session)
    }

    pub async fn register(&mut self, request: &RegisterRequest) -> Result<Session> {
        let session = self.api.register(request).await?;
        self.state = SessionState::Authenticated(session.clone());
        Ok(session)
    }

    /// Always ends anonymous. A failed backend logout is only logged.
    pub async fn logout(&mut self) {
        if let Err(e) = self.api.logout().await {
            tracing::warn!("logout request failed: {e}");
        }
        if let Err(e) = self.api.tokens().clear() {
            tracing::warn!("failed to clear session token: {e}");
        }
        self.state = SessionState::Anonymous;
    }
}
