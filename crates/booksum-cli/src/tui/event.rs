use std::path::PathBuf;

use booksum_core::api::{FileUpload, SummaryRequest};
use booksum_core::error::Result;
use booksum_core::model::*;
use booksum_core::router::Route;
use booksum_core::session::SessionState;

/// Actions the UI sends to the async worker task.
#[derive(Debug)]
pub enum AsyncAction {
    /// Validate the persisted token, if any.
    InitSession,
    Login(LoginRequest),
    Register(RegisterRequest),
    Logout,
    /// Read a file from disk for upload.
    LoadFile { path: PathBuf },
    CreateSummary(SummaryRequest),
    LoadHistory,
    Download {
        summary_id: String,
        format: DownloadFormat,
        /// Screen that asked, so the result lands in the right view.
        origin: Route,
    },
    LoadUsers,
    LoadAllSummaries,
}

/// Results the async worker sends back to the UI.
#[derive(Debug)]
pub enum AsyncResult {
    /// Session state after startup validation or logout.
    Session(SessionState),
    LoginFinished(Result<Session>),
    RegisterFinished(Result<Session>),
    FileLoaded(Result<FileUpload>),
    SummaryCreated(Result<CreatedSummary>),
    History(Result<Vec<Summary>>),
    Downloaded {
        format: DownloadFormat,
        origin: Route,
        result: Result<PathBuf>,
    },
    Users(Result<Vec<UserSummary>>),
    AllSummaries(Result<Vec<Summary>>),
}

