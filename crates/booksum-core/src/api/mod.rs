mod client;
mod download;
#[cfg(test)]
pub(crate) mod fake;
mod upload;

pub use client::HttpClient;
pub use download::{download_file_name, download_to, save_download};
pub use upload::{FileUpload, SummaryRequest, SummarySource, ALLOWED_MIME_TYPES};

use crate::error::Result;
use crate::model::*;
use crate::token::TokenStore;

/// One method per backend endpoint.
///
/// `HttpClient` is the real implementation; tests swap in in-process fakes.
/// Implementations attach the stored bearer token to every call when one
/// exists, and persist the token returned by `login`/`register`.
pub trait SummarizerApi: Send + Sync {
    /// Token persistence shared with the session store.
    fn tokens(&self) -> &TokenStore;

    // -- Auth --

    fn login(
        &self,
        request: &LoginRequest,
    ) -> impl std::future::Future<Output = Result<Session>> + Send;

    fn register(
        &self,
        request: &RegisterRequest,
    ) -> impl std::future::Future<Output = Result<Session>> + Send;

    fn logout(&self) -> impl std::future::Future<Output = Result<()>> + Send;

    fn validate_session(&self) -> impl std::future::Future<Output = Result<UserSummary>> + Send;

    // -- Summaries --

    fn create_summary(
        &self,
        request: &SummaryRequest,
    ) -> impl std::future::Future<Output = Result<CreatedSummary>> + Send;

    fn list_summaries(&self) -> impl std::future::Future<Output = Result<Vec<Summary>>> + Send;

    /// Raw file body as rendered by the backend.
    fn download_summary(
        &self,
        summary_id: &str,
        format: DownloadFormat,
    ) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;

    // -- Admin --

    fn admin_list_users(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<UserSummary>>> + Send;

    fn admin_list_summaries(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Summary>>> + Send;

    fn admin_list_user_summaries(
        &self,
        user_id: i64,
    ) -> impl std::future::Future<Output = Result<Vec<Summary>>> + Send;
}

/// Backend operation, used to pick the message shown when a call fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Login,
    Register,
    Logout,
    ValidateSession,
    CreateSummary,
    ListSummaries,
    Download(DownloadFormat),
    AdminListUsers,
    AdminListSummaries,
    AdminListUserSummaries,
}

impl Operation {
    /// Generic message for when the backend gave no usable detail.
    pub fn fallback_message(&self) -> String {
        match self {
            Self::Login => "Login failed. Please try again.".to_string(),
            Self::Register => "Registration failed. Please try again.".to_string(),
            Self::Logout => "Logout failed".to_string(),
            Self::ValidateSession => "Session expired. Please sign in again.".to_string(),
            Self::CreateSummary => "Failed to generate summary".to_string(),
            Self::ListSummaries | Self::AdminListSummaries => {
                "Failed to load summaries".to_string()
            }
            Self::Download(format) => format!(
                "Failed to download {} file",
                format.extension().to_uppercase()
            ),
            Self::AdminListUsers => "Failed to load users".to_string(),
            Self::AdminListUserSummaries => "Failed to load user summaries".to_string(),
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Login => write!(f, "login"),
            Self::Register => write!(f, "register"),
            Self::Logout => write!(f, "logout"),
            Self::ValidateSession => write!(f, "validate_session"),
            Self::CreateSummary => write!(f, "create_summary"),
            Self::ListSummaries => write!(f, "list_summaries"),
            Self::Download(format) => write!(f, "download_{format}"),
            Self::AdminListUsers => write!(f, "admin_list_users"),
            Self::AdminListSummaries => write!(f, "admin_list_summaries"),
            Self::AdminListUserSummaries => write!(f, "admin_list_user_summaries"),
        }
    }
}
