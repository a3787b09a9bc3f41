use std::sync::LazyLock;

use regex::Regex;

use crate::api::SummarizerApi;
use crate::error::{BooksumError, Result};
use crate::model::{LoginRequest, RegisterRequest, Session};
use crate::session::SessionStore;

/// Seeded admin account of a fresh backend, shown under the login form.
pub const DEMO_CREDENTIALS: (&str, &str) = ("admin", "admin123");

pub const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s.]+(\.[^@\s.]+)*$").unwrap());

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub error: Option<String>,
    pub loading: bool,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and mark in flight. `None` means no call should be made.
    pub fn begin_submit(&mut self) -> Option<LoginRequest> {
        if self.loading {
            return None;
        }
        self.error = None;
        if self.username.trim().is_empty() || self.password.is_empty() {
            self.error = Some("Please enter your username and password".to_string());
            return None;
        }
        self.loading = true;
        Some(LoginRequest {
            username: self.username.trim().to_string(),
            password: self.password.clone(),
        })
    }

    pub fn finish_submit(&mut self, result: Result<Session>) -> Option<Session> {
        self.loading = false;
        match result {
            Ok(session) => {
                self.password.clear();
                Some(session)
            }
            Err(e) => {
                self.error = Some(e.user_message());
                None
            }
        }
    }

    pub async fn submit<A: SummarizerApi>(&mut self, store: &mut SessionStore<A>) -> Option<Session> {
        let request = self.begin_submit()?;
        let result = store.login(&request.username, &request.password).await;
        self.finish_submit(result)
    }
}

#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub is_admin: bool,
    pub error: Option<String>,
    pub loading: bool,
}

impl RegisterForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Client-side checks, in the order the user would hit them.
    pub fn validate(&self) -> Result<RegisterRequest> {
        let username = self.username.trim();
        let email = self.email.trim();
        if username.is_empty() || email.is_empty() || self.password.is_empty() {
            return Err(BooksumError::InvalidInput(
                "Please fill in all required fields".into(),
            ));
        }
        if !EMAIL_RE.is_match(email) {
            return Err(BooksumError::InvalidInput(
                "Please enter a valid email address".into(),
            ));
        }
        if self.password != self.confirm_password {
            return Err(BooksumError::InvalidInput("Passwords do not match".into()));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(BooksumError::InvalidInput(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters long"
            )));
        }
        Ok(RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: self.password.clone(),
            is_admin: self.is_admin,
        })
    }

    /// Validate and mark in flight. A failed check sets the error and makes no call.
    pub fn begin_submit(&mut self) -> Option<RegisterRequest> {
        if self.loading {
            return None;
        }
        self.error = None;
        match self.validate() {
            Ok(request) => {
                self.loading = true;
                Some(request)
            }
            Err(e) => {
                self.error = Some(e.user_message());
                None
            }
        }
    }

    pub fn finish_submit(&mut self, result: Result<Session>) -> Option<Session> {
        self.loading = false;
        match result {
            Ok(session) => {
                self.password.clear();
                self.confirm_password.clear();
                Some(session)
            }
            Err(e) => {
                self.error = Some(e.user_message());
                None
            }
        }
    }

    pub async fn submit<A: SummarizerApi>(&mut self, store: &mut SessionStore<A>) -> Option<Session> {
        let request = self.begin_submit()?;
        let result = store.register(&request).await;
        self.finish_submit(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{user, FakeApi};
    use crate::api::Operation;

    fn filled() -> RegisterForm {
        RegisterForm {
            username: "alice".into(),
            email: "alice@example.com".into(),
            password: "secret1".into(),
            confirm_password: "secret1".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_login_requires_both_fields() {
        let mut form = LoginForm::new();
        form.username = "alice".into();
        assert!(form.begin_submit().is_none());
        assert!(form.error.is_some());
        assert!(!form.loading);
    }

    #[test]
    fn test_login_in_flight_blocks_resubmit() {
        let mut form = LoginForm {
            username: " alice ".into(),
            password: "pw".into(),
            ..Default::default()
        };
        let req = form.begin_submit().unwrap();
        assert_eq!(req.username, "alice");
        assert!(form.loading);
        assert!(form.begin_submit().is_none());
    }

    #[tokio::test]
    async fn test_login_failure_shows_backend_detail() {
        let mut store = SessionStore::new(FakeApi::new().with_account("t", user(1, "alice", false)));
        let mut form = LoginForm {
            username: "bob".into(),
            password: "pw".into(),
            ..Default::default()
        };
        assert!(form.submit(&mut store).await.is_none());
        assert_eq!(form.error.as_deref(), Some("Invalid credentials"));
        assert!(!form.loading);
    }

    #[tokio::test]
    async fn test_login_failure_without_detail_uses_fallback() {
        let api = FakeApi::new().failing(Operation::Login, 500, None);
        let mut store = SessionStore::new(api);
        let mut form = LoginForm {
            username: "bob".into(),
            password: "pw".into(),
            ..Default::default()
        };
        form.submit(&mut store).await;
        assert_eq!(form.error.as_deref(), Some("Login failed. Please try again."));
    }

    #[test]
    fn test_register_password_mismatch() {
        let mut form = filled();
        form.confirm_password = "secret2".into();
        assert!(form.begin_submit().is_none());
        assert_eq!(form.error.as_deref(), Some("Passwords do not match"));
    }

    #[test]
    fn test_register_short_password() {
        let mut form = filled();
        form.password = "abc".into();
        form.confirm_password = "abc".into();
        assert!(form.begin_submit().is_none());
        assert_eq!(
            form.error.as_deref(),
            Some("Password must be at least 6 characters long")
        );
    }

    #[test]
    fn test_register_bad_email() {
        for email in ["alice", "alice@", "@example.com", "a b@example.com"] {
            let mut form = filled();
            form.email = email.into();
            assert!(form.validate().is_err(), "{email} should be rejected");
        }
        let mut form = filled();
        form.email = "alice@localhost".into();
        assert!(form.validate().is_ok());
    }

    #[tokio::test]
    async fn test_register_validation_failure_makes_no_call() {
        let mut store = SessionStore::new(FakeApi::new().with_account("t", user(1, "alice", false)));
        let mut form = filled();
        form.confirm_password = "nope".into();
        assert!(form.submit(&mut store).await.is_none());
        assert!(store.api().calls().is_empty());
    }

    #[tokio::test]
    async fn test_register_success_carries_admin_flag() {
        let mut store = SessionStore::new(FakeApi::new().with_account("t", user(1, "alice", true)));
        let mut form = filled();
        form.is_admin = true;
        assert!(form.validate().unwrap().is_admin);

        let session = form.submit(&mut store).await.unwrap();
        assert!(session.is_admin());
        assert!(form.password.is_empty());
        assert!(form.error.is_none());
    }
}
