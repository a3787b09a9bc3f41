//! Scripted in-memory backend for unit tests.

use std::sync::Mutex;

use super::{Operation, SummarizerApi, SummaryRequest};
use crate::error::{BooksumError, Result};
use crate::model::*;
use crate::token::TokenStore;

#[derive(Default)]
struct Script {
    account: Option<Session>,
    users: Vec<UserSummary>,
    summaries: Vec<Summary>,
    created: Option<CreatedSummary>,
    download: Vec<u8>,
    failures: Vec<(Operation, u16, Option<String>)>,
    calls: Vec<Operation>,
    last_request: Option<SummaryRequest>,
}

pub(crate) struct FakeApi {
    tokens: TokenStore,
    script: Mutex<Script>,
}

pub(crate) fn user(id: i64, name: &str, is_admin: bool) -> UserSummary {
    UserSummary {
        id,
        username: name.to_string(),
        email: format!("{name}@example.com"),
        is_admin,
        created_at: "2026-01-05 14:30:00".to_string(),
        summary_count: 0,
    }
}

pub(crate) fn summary(id: i64, user_id: i64, text: &str) -> Summary {
    Summary {
        id,
        summary_id: format!("sum-{id}"),
        user_id,
        username: format!("user{user_id}"),
        email: format!("user{user_id}@example.com"),
        summary_text: text.to_string(),
        summary_type: SummaryType::Paragraph,
        word_count: text.split_whitespace().count() as u32,
        created_at: "2026-01-05 14:30:00".to_string(),
    }
}

impl FakeApi {
    pub fn new() -> Self {
        let dir = std::env::temp_dir().join(format!("booksum-fake-{}", uuid::Uuid::now_v7()));
        Self {
            tokens: TokenStore::new(dir.join("session.toml")),
            script: Mutex::new(Script::default()),
        }
    }

    /// Account accepted by login/register and returned by validate-session.
    pub fn with_account(self, token: &str, user: UserSummary) -> Self {
        self.script.lock().unwrap().account = Some(Session::new(token.to_string(), user));
        self
    }

    pub fn with_users(self, users: Vec<UserSummary>) -> Self {
        self.script.lock().unwrap().users = users;
        self
    }

    pub fn with_summaries(self, summaries: Vec<Summary>) -> Self {
        self.script.lock().unwrap().summaries = summaries;
        self
    }

    pub fn with_created(self, created: CreatedSummary) -> Self {
        self.script.lock().unwrap().created = Some(created);
        self
    }

    pub fn with_download(self, bytes: &[u8]) -> Self {
        self.script.lock().unwrap().download = bytes.to_vec();
        self
    }

    pub fn failing(self, op: Operation, status: u16, detail: Option<&str>) -> Self {
        self.script
            .lock()
            .unwrap()
            .failures
            .push((op, status, detail.map(str::to_string)));
        self
    }

    pub fn calls(&self) -> Vec<Operation> {
        self.script.lock().unwrap().calls.clone()
    }

    pub fn call_count(&self, op: Operation) -> usize {
        self.calls().iter().filter(|c| **c == op).count()
    }

    pub fn last_request(&self) -> Option<SummaryRequest> {
        self.script.lock().unwrap().last_request.clone()
    }

    fn record(&self, op: Operation) -> Result<()> {
        let mut script = self.script.lock().unwrap();
        script.calls.push(op);
        match script.failures.iter().find(|(o, _, _)| *o == op) {
            Some((_, status, detail)) => Err(BooksumError::Api {
                op,
                status: *status,
                detail: detail.clone(),
            }),
            None => Ok(()),
        }
    }

    fn authenticate(&self, op: Operation, username: &str) -> Result<Session> {
        self.record(op)?;
        let account = self.script.lock().unwrap().account.clone();
        match account {
            Some(session) if session.user.username == username => {
                self.tokens.save(&session.token)?;
                Ok(session)
            }
            _ => Err(BooksumError::Api {
                op,
                status: 401,
                detail: Some("Invalid credentials".into()),
            }),
        }
    }
}

impl Drop for FakeApi {
    fn drop(&mut self) {
        if let Some(dir) = self.tokens.path().parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }
}

impl SummarizerApi for FakeApi {
    fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    async fn login(&self, request: &LoginRequest) -> Result<Session> {
        self.authenticate(Operation::Login, &request.username)
    }

    async fn register(&self, request: &RegisterRequest) -> Result<Session> {
        self.authenticate(Operation::Register, &request.username)
    }

    async fn logout(&self) -> Result<()> {
        self.record(Operation::Logout)
    }

    async fn validate_session(&self) -> Result<UserSummary> {
        let op = Operation::ValidateSession;
        self.record(op)?;
        let account = self.script.lock().unwrap().account.clone();
        match (self.tokens.load(), account) {
            (Some(token), Some(session)) if token == session.token => Ok(session.user),
            _ => Err(BooksumError::Api {
                op,
                status: 401,
                detail: Some("Invalid token".into()),
            }),
        }
    }

    async fn create_summary(&self, request: &SummaryRequest) -> Result<CreatedSummary> {
        self.script.lock().unwrap().last_request = Some(request.clone());
        self.record(Operation::CreateSummary)?;
        let created = self.script.lock().unwrap().created.clone();
        created.ok_or(BooksumError::Api {
            op: Operation::CreateSummary,
            status: 500,
            detail: None,
        })
    }

    async fn list_summaries(&self) -> Result<Vec<Summary>> {
        self.record(Operation::ListSummaries)?;
        Ok(self.script.lock().unwrap().summaries.clone())
    }

    async fn download_summary(&self, _summary_id: &str, format: DownloadFormat) -> Result<Vec<u8>> {
        self.record(Operation::Download(format))?;
        Ok(self.script.lock().unwrap().download.clone())
    }

    async fn admin_list_users(&self) -> Result<Vec<UserSummary>> {
        self.record(Operation::AdminListUsers)?;
        Ok(self.script.lock().unwrap().users.clone())
    }

    async fn admin_list_summaries(&self) -> Result<Vec<Summary>> {
        self.record(Operation::AdminListSummaries)?;
        Ok(self.script.lock().unwrap().summaries.clone())
    }

    async fn admin_list_user_summaries(&self, user_id: i64) -> Result<Vec<Summary>> {
        self.record(Operation::AdminListUserSummaries)?;
        let summaries = self.script.lock().unwrap().summaries.clone();
        Ok(summaries.into_iter().filter(|s| s.user_id == user_id).collect())
    }
}
