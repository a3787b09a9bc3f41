use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::{Operation, SummarizerApi, SummaryRequest, SummarySource};
use crate::config::BooksumConfig;
use crate::error::{BooksumError, Result};
use crate::model::*;
use crate::token::TokenStore;

/// reqwest-backed client for the summarizer REST API.
pub struct HttpClient {
    client: Client,
    base_url: String,
    tokens: TokenStore,
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url)
            .field("token_path", &self.tokens.path())
            .finish()
    }
}

#[derive(Deserialize)]
struct SummariesEnvelope {
    summaries: Vec<Summary>,
}

#[derive(Deserialize)]
struct UsersEnvelope {
    users: Vec<UserSummary>,
}

impl HttpClient {
    pub fn new(base_url: &str, user_agent: &str, tokens: TokenStore) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| BooksumError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
        })
    }

    pub fn from_config(config: &BooksumConfig) -> Result<Self> {
        let tokens = TokenStore::from_config(config)?;
        Self::new(&config.api.base_url, &config.api.user_agent, tokens)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach `Authorization: Bearer` when a token is stored, nothing otherwise.
    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.tokens.load() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send and map failures: no response → `Transport`, non-2xx → `Api`.
    async fn send(&self, op: Operation, builder: RequestBuilder) -> Result<Response> {
        let resp = builder
            .send()
            .await
            .map_err(|source| BooksumError::Transport { op, source })?;

        let status = resp.status();
        if status.is_success() {
            tracing::debug!(%op, status = status.as_u16(), "request ok");
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        let detail = extract_detail(&body);
        tracing::debug!(%op, status = status.as_u16(), detail = ?detail, "request failed");
        Err(BooksumError::Api {
            op,
            status: status.as_u16(),
            detail,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, op: Operation, path: &str) -> Result<T> {
        let builder = self.authorize(self.client.get(self.url(path)));
        let resp = self.send(op, builder).await?;
        resp.json()
            .await
            .map_err(|source| BooksumError::Transport { op, source })
    }

    async fn authenticate<B: serde::Serialize + ?Sized>(
        &self,
        op: Operation,
        path: &str,
        body: &B,
    ) -> Result<Session> {
        let builder = self.client.post(self.url(path)).json(body);
        let resp = self.send(op, builder).await?;
        let auth: AuthResponse = resp
            .json()
            .await
            .map_err(|source| BooksumError::Transport { op, source })?;
        self.tokens.save(&auth.token)?;
        Ok(auth.into())
    }
}

impl SummarizerApi for HttpClient {
    fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    async fn login(&self, request: &LoginRequest) -> Result<Session> {
        self.authenticate(Operation::Login, "/auth/login", request)
            .await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<Session> {
        self.authenticate(Operation::Register, "/auth/register", request)
            .await
    }

    async fn logout(&self) -> Result<()> {
        let builder = self.authorize(
            self.client
                .post(self.url("/auth/logout"))
                .json(&serde_json::json!({})),
        );
        self.send(Operation::Logout, builder).await?;
        Ok(())
    }

    async fn validate_session(&self) -> Result<UserSummary> {
        self.get_json(Operation::ValidateSession, "/auth/me").await
    }

    async fn create_summary(&self, request: &SummaryRequest) -> Result<CreatedSummary> {
        let op = Operation::CreateSummary;
        let mut form = Form::new()
            .text("summary_type", request.summary_type.as_str())
            .text("summary_length", request.summary_length.words().to_string());

        form = match &request.source {
            SummarySource::Text(text) => form.text("input_text", text.clone()),
            SummarySource::File(upload) => {
                let part = Part::bytes(upload.bytes.clone())
                    .file_name(upload.file_name.clone())
                    .mime_str(&upload.mime_type)
                    .map_err(|source| BooksumError::Transport { op, source })?;
                form.part("file", part)
            }
        };

        let builder = self.authorize(self.client.post(self.url("/summarize")).multipart(form));
        let resp = self.send(op, builder).await?;
        resp.json()
            .await
            .map_err(|source| BooksumError::Transport { op, source })
    }

    async fn list_summaries(&self) -> Result<Vec<Summary>> {
        let envelope: SummariesEnvelope = self
            .get_json(Operation::ListSummaries, "/summaries")
            .await?;
        Ok(envelope.summaries)
    }

    async fn download_summary(&self, summary_id: &str, format: DownloadFormat) -> Result<Vec<u8>> {
        let op = Operation::Download(format);
        let path = format!(
            "/download/{}?format={}",
            encode_segment(summary_id),
            format.extension()
        );
        let builder = self.authorize(self.client.get(self.url(&path)));
        let resp = self.send(op, builder).await?;
        let bytes = resp
            .bytes()
            .await
            .map_err(|source| BooksumError::Transport { op, source })?;
        Ok(bytes.to_vec())
    }

    async fn admin_list_users(&self) -> Result<Vec<UserSummary>> {
        let envelope: UsersEnvelope = self
            .get_json(Operation::AdminListUsers, "/admin/users")
            .await?;
        Ok(envelope.users)
    }

    async fn admin_list_summaries(&self) -> Result<Vec<Summary>> {
        let envelope: SummariesEnvelope = self
            .get_json(Operation::AdminListSummaries, "/admin/summaries")
            .await?;
        Ok(envelope.summaries)
    }

    async fn admin_list_user_summaries(&self, user_id: i64) -> Result<Vec<Summary>> {
        let path = format!("/admin/users/{user_id}/summaries");
        let envelope: SummariesEnvelope = self
            .get_json(Operation::AdminListUserSummaries, &path)
            .await?;
        Ok(envelope.summaries)
    }
}

/// Pull a human-readable message out of an error body.
///
/// Understands `{"detail": "..."}`, validation lists
/// (`{"detail": [{"msg": "..."}]}`), and `{"error"|"message": "..."}`.
/// Anything else (HTML error pages, empty bodies) yields `None`.
fn extract_detail(body: &str) -> Option<String> {
    let json: serde_json::Value = serde_json::from_str(body).ok()?;

    match &json["detail"] {
        serde_json::Value::String(s) if !s.trim().is_empty() => return Some(s.clone()),
        serde_json::Value::Array(items) => {
            let msgs: Vec<&str> = items.iter().filter_map(|i| i["msg"].as_str()).collect();
            if !msgs.is_empty() {
                return Some(msgs.join("; "));
            }
        }
        _ => {}
    }

    ["error", "message"]
        .iter()
        .filter_map(|k| json[*k].as_str())
        .find(|s| !s.trim().is_empty())
        .map(|s| s.to_string())
}

/// Percent-encode everything outside the RFC 3986 unreserved set so an id
/// stays a single path segment.
fn encode_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
