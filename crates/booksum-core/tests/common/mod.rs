#![allow(dead_code)]

//! In-process stand-in for the summarizer backend, served by axum on an
//! ephemeral port. Mirrors the endpoint shapes of the real service closely
//! enough to exercise the client end to end.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;
use serde_json::{json, Value};

use booksum_core::api::HttpClient;
use booksum_core::token::TokenStore;

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin123";

#[derive(Debug, Clone)]
struct Account {
    id: i64,
    username: String,
    email: String,
    password: String,
    is_admin: bool,
}

#[derive(Debug, Clone)]
struct StoredSummary {
    id: i64,
    summary_id: String,
    user_id: i64,
    text: String,
    summary_type: String,
    word_count: usize,
}

/// One received request: path plus the raw `Authorization` header.
#[derive(Debug, Clone)]
pub struct Seen {
    pub path: String,
    pub authorization: Option<String>,
}

/// A multipart field as received by the summarize endpoint.
#[derive(Debug, Clone)]
pub struct SeenField {
    pub name: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub value: Vec<u8>,
}

#[derive(Default)]
struct Backend {
    accounts: Vec<Account>,
    tokens: HashMap<String, i64>,
    summaries: Vec<StoredSummary>,
    seen: Vec<Seen>,
    last_upload: Vec<SeenField>,
    next_token: u64,
}

type Shared = Arc<Mutex<Backend>>;

pub struct FakeBackend {
    pub addr: SocketAddr,
    state: Shared,
}

impl FakeBackend {
    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    /// Client with its own throwaway token file.
    pub fn client(&self) -> HttpClient {
        HttpClient::new(&self.base_url(), "booksum-test", temp_token_store()).unwrap()
    }

    pub fn seen(&self) -> Vec<Seen> {
        self.state.lock().unwrap().seen.clone()
    }

    pub fn last_seen(&self, path: &str) -> Option<Seen> {
        self.seen().into_iter().rev().find(|s| s.path == path)
    }

    pub fn last_upload(&self) -> Vec<SeenField> {
        self.state.lock().unwrap().last_upload.clone()
    }

    pub fn live_tokens(&self) -> usize {
        self.state.lock().unwrap().tokens.len()
    }

    /// Store a summary directly, bypassing the API.
    pub fn seed_summary(&self, user_id: i64, text: &str) -> String {
        let mut backend = self.state.lock().unwrap();
        let id = backend.summaries.len() as i64 + 1;
        let summary_id = format!("seed-{id}");
        backend.summaries.push(StoredSummary {
            id,
            summary_id: summary_id.clone(),
            user_id,
            text: text.to_string(),
            summary_type: "paragraph".to_string(),
            word_count: text.split_whitespace().count(),
        });
        summary_id
    }

    /// Create a regular account directly, returning its id.
    pub fn seed_user(&self, username: &str, password: &str) -> i64 {
        let mut backend = self.state.lock().unwrap();
        let id = backend.accounts.len() as i64 + 1;
        backend.accounts.push(Account {
            id,
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password: password.to_string(),
            is_admin: false,
        });
        id
    }
}

pub fn temp_token_store() -> TokenStore {
    let dir = std::env::temp_dir().join(format!("booksum-it-{}", uuid::Uuid::now_v7()));
    TokenStore::new(dir.join("session.toml"))
}

pub fn temp_dir(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("booksum-{label}-{}", uuid::Uuid::now_v7()))
}

pub async fn spawn_backend() -> FakeBackend {
    let state: Shared = Arc::new(Mutex::new(Backend::default()));
    state.lock().unwrap().accounts.push(Account {
        id: 1,
        username: ADMIN_USERNAME.to_string(),
        email: "admin@booksum.local".to_string(),
        password: ADMIN_PASSWORD.to_string(),
        is_admin: true,
    });

    let app = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/me", get(me))
        .route("/api/summarize", post(summarize))
        .route("/api/summaries", get(list_own))
        .route("/api/download/{summary_id}", get(download))
        .route("/api/admin/users", get(admin_users))
        .route("/api/admin/summaries", get(admin_summaries))
        .route("/api/admin/users/{user_id}/summaries", get(admin_user_summaries))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    FakeBackend { addr, state }
}

// -- Helpers --

fn detail(status: StatusCode, msg: &str) -> Response {
    (status, Json(json!({ "detail": msg }))).into_response()
}

/// Record the request and resolve the bearer token to an account.
fn authenticate(state: &Shared, path: &str, headers: &HeaderMap) -> Option<Account> {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let mut backend = state.lock().unwrap();
    backend.seen.push(Seen {
        path: path.to_string(),
        authorization: authorization.clone(),
    });
    let token = authorization?.strip_prefix("Bearer ")?.to_string();
    let user_id = *backend.tokens.get(&token)?;
    backend.accounts.iter().find(|a| a.id == user_id).cloned()
}

fn user_json(backend: &Backend, account: &Account) -> Value {
    let count = backend
        .summaries
        .iter()
        .filter(|s| s.user_id == account.id)
        .count();
    json!({
        "id": account.id,
        "username": account.username,
        "email": account.email,
        // SQLite integer, as the real backend sends it.
        "is_admin": if account.is_admin { 1 } else { 0 },
        "created_at": "2026-01-05 14:30:00",
        "summary_count": count,
    })
}

/// Own listings select named columns only; admin listings return the full
/// row joined with the owner.
fn summary_json(backend: &Backend, summary: &StoredSummary, with_owner: bool) -> Value {
    let mut value = json!({
        "id": summary.id,
        "summary_id": summary.summary_id,
        "summary_text": summary.text,
        "summary_type": summary.summary_type,
        "summary_length": 75,
        "word_count": summary.word_count,
        "created_at": "2026-01-05 14:30:00",
    });
    if with_owner {
        value["user_id"] = json!(summary.user_id);
        if let Some(owner) = backend.accounts.iter().find(|a| a.id == summary.user_id) {
            value["username"] = json!(owner.username);
            value["email"] = json!(owner.email);
        }
    }
    value
}

fn issue_token(backend: &mut Backend, user_id: i64) -> String {
    backend.next_token += 1;
    let token = format!("tok-{}-{}", user_id, backend.next_token);
    backend.tokens.insert(token.clone(), user_id);
    token
}

// -- Handlers --

#[derive(Deserialize)]
struct LoginBody {
    username: String,
    password: String,
}

async fn login(State(state): State<Shared>, Json(body): Json<LoginBody>) -> Response {
    let mut backend = state.lock().unwrap();
    backend.seen.push(Seen {
        path: "/auth/login".into(),
        authorization: None,
    });
    let Some(account) = backend
        .accounts
        .iter()
        .find(|a| a.username == body.username && a.password == body.password)
        .cloned()
    else {
        return detail(StatusCode::UNAUTHORIZED, "Invalid credentials");
    };
    let token = issue_token(&mut backend, account.id);
    let user = user_json(&backend, &account);
    Json(json!({ "token": token, "user": user })).into_response()
}

#[derive(Deserialize)]
struct RegisterBody {
    username: String,
    email: String,
    password: String,
    #[serde(default)]
    is_admin: bool,
}

async fn register(State(state): State<Shared>, Json(body): Json<RegisterBody>) -> Response {
    let mut backend = state.lock().unwrap();
    if backend.accounts.iter().any(|a| a.username == body.username) {
        return detail(StatusCode::BAD_REQUEST, "Username already exists");
    }
    let account = Account {
        id: backend.accounts.len() as i64 + 1,
        username: body.username,
        email: body.email,
        password: body.password,
        is_admin: body.is_admin,
    };
    backend.accounts.push(account.clone());
    let token = issue_token(&mut backend, account.id);
    let user = user_json(&backend, &account);
    Json(json!({ "token": token, "user": user })).into_response()
}

async fn logout(State(state): State<Shared>, headers: HeaderMap) -> Response {
    if authenticate(&state, "/auth/logout", &headers).is_none() {
        return detail(StatusCode::UNAUTHORIZED, "Not authenticated");
    }
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .unwrap_or_default()
        .to_string();
    state.lock().unwrap().tokens.remove(&token);
    Json(json!({ "message": "Logged out successfully" })).into_response()
}

async fn me(State(state): State<Shared>, headers: HeaderMap) -> Response {
    match authenticate(&state, "/auth/me", &headers) {
        Some(account) => {
            let backend = state.lock().unwrap();
            Json(user_json(&backend, &account)).into_response()
        }
        None => detail(StatusCode::UNAUTHORIZED, "Invalid token"),
    }
}

async fn summarize(
    State(state): State<Shared>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    let Some(account) = authenticate(&state, "/summarize", &headers) else {
        return detail(StatusCode::UNAUTHORIZED, "Not authenticated");
    };

    let mut fields = Vec::new();
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let value = field.bytes().await.map(|b| b.to_vec()).unwrap_or_default();
        fields.push(SeenField {
            name,
            file_name,
            content_type,
            value,
        });
    }

    let text_of = |name: &str| {
        fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| String::from_utf8_lossy(&f.value).into_owned())
    };
    let summary_type = text_of("summary_type").unwrap_or_else(|| "paragraph".into());
    let input = text_of("input_text").or_else(|| text_of("file")).unwrap_or_default();

    let mut backend = state.lock().unwrap();
    backend.last_upload = fields;
    if input.trim().is_empty() {
        return detail(StatusCode::BAD_REQUEST, "No text provided");
    }

    let words: Vec<&str> = input.split_whitespace().take(5).collect();
    let summary = words.join(" ");
    let id = backend.summaries.len() as i64 + 1;
    let summary_id = format!("sum-{id}");
    backend.summaries.push(StoredSummary {
        id,
        summary_id: summary_id.clone(),
        user_id: account.id,
        text: summary.clone(),
        summary_type: summary_type.clone(),
        word_count: words.len(),
    });

    Json(json!({
        "summary_id": summary_id,
        "summary": summary,
        "summary_type": summary_type,
        "word_count": words.len(),
    }))
    .into_response()
}

async fn list_own(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let Some(account) = authenticate(&state, "/summaries", &headers) else {
        return detail(StatusCode::UNAUTHORIZED, "Not authenticated");
    };
    let backend = state.lock().unwrap();
    let summaries: Vec<Value> = backend
        .summaries
        .iter()
        .filter(|s| s.user_id == account.id)
        .map(|s| summary_json(&backend, s, false))
        .collect();
    Json(json!({ "summaries": summaries })).into_response()
}

#[derive(Deserialize)]
struct DownloadQuery {
    #[serde(default)]
    format: Option<String>,
}

async fn download(
    State(state): State<Shared>,
    Path(summary_id): Path<String>,
    Query(query): Query<DownloadQuery>,
    headers: HeaderMap,
) -> Response {
    let Some(account) = authenticate(&state, "/download", &headers) else {
        return detail(StatusCode::UNAUTHORIZED, "Not authenticated");
    };
    let backend = state.lock().unwrap();
    let Some(summary) = backend
        .summaries
        .iter()
        .find(|s| s.summary_id == summary_id && (s.user_id == account.id || account.is_admin))
    else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Summary not found" })),
        )
            .into_response();
    };
    match query.format.as_deref() {
        Some("pdf") => (
            [(header::CONTENT_TYPE, "application/pdf")],
            format!("%PDF-1.4\n{}", summary.text).into_bytes(),
        )
            .into_response(),
        Some("txt") | None => (
            [(header::CONTENT_TYPE, "text/plain")],
            summary.text.clone(),
        )
            .into_response(),
        Some(_) => detail(StatusCode::BAD_REQUEST, "Invalid format"),
    }
}

fn require_admin(state: &Shared, path: &str, headers: &HeaderMap) -> Result<Account, Response> {
    match authenticate(state, path, headers) {
        Some(account) if account.is_admin => Ok(account),
        Some(_) => Err(detail(StatusCode::FORBIDDEN, "Admin access required")),
        None => Err(detail(StatusCode::UNAUTHORIZED, "Not authenticated")),
    }
}

async fn admin_users(State(state): State<Shared>, headers: HeaderMap) -> Response {
    if let Err(resp) = require_admin(&state, "/admin/users", &headers) {
        return resp;
    }
    let backend = state.lock().unwrap();
    let users: Vec<Value> = backend
        .accounts
        .iter()
        .map(|a| user_json(&backend, a))
        .collect();
    Json(json!({ "users": users })).into_response()
}

async fn admin_summaries(State(state): State<Shared>, headers: HeaderMap) -> Response {
    if let Err(resp) = require_admin(&state, "/admin/summaries", &headers) {
        return resp;
    }
    let backend = state.lock().unwrap();
    let summaries: Vec<Value> = backend
        .summaries
        .iter()
        .map(|s| summary_json(&backend, s, true))
        .collect();
    Json(json!({ "summaries": summaries })).into_response()
}

async fn admin_user_summaries(
    State(state): State<Shared>,
    Path(user_id): Path<i64>,
    headers: HeaderMap,
) -> Response {
    if let Err(resp) = require_admin(&state, "/admin/users/summaries", &headers) {
        return resp;
    }
    let backend = state.lock().unwrap();
    let summaries: Vec<Value> = backend
        .summaries
        .iter()
        .filter(|s| s.user_id == user_id)
        .map(|s| summary_json(&backend, s, true))
        .collect();
    Json(json!({ "summaries": summaries })).into_response()
}
