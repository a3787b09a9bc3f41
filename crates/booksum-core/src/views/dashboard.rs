use std::path::{Path, PathBuf};

use crate::api::{download_to, FileUpload, Operation, SummarizerApi, SummaryRequest};
use crate::error::Result;
use crate::model::{CreatedSummary, DownloadFormat, Summary, SummaryLength, SummaryType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashboardTab {
    #[default]
    Create,
    History,
}

/// What the create form currently holds. Text and file are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SummaryInput {
    #[default]
    Empty,
    Text(String),
    File(FileUpload),
}

impl SummaryInput {
    /// Pasted text, or `""` when a file (or nothing) is selected.
    pub fn text(&self) -> &str {
        match self {
            Self::Text(s) => s,
            _ => "",
        }
    }

    pub fn file(&self) -> Option<&FileUpload> {
        match self {
            Self::File(f) => Some(f),
            _ => None,
        }
    }

    /// Nothing a summary could be made from.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.trim().is_empty(),
            Self::File(_) => false,
        }
    }
}

/// State of the signed-in user's dashboard.
#[derive(Debug, Clone, Default)]
pub struct UserDashboard {
    pub tab: DashboardTab,
    pub input: SummaryInput,
    pub summary_type: SummaryType,
    pub summary_length: SummaryLength,
    /// Result of the last successful create, until the next submit.
    pub current: Option<CreatedSummary>,
    pub history: Vec<Summary>,
    pub error: Option<String>,
    pub submitting: bool,
    pub history_loading: bool,
}

impl UserDashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(summary_type: SummaryType, summary_length: SummaryLength) -> Self {
        Self {
            summary_type,
            summary_length,
            ..Self::default()
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text.trim().is_empty() {
            match self.input {
                SummaryInput::File(_) => {}
                _ if text.is_empty() => self.input = SummaryInput::Empty,
                _ => self.input = SummaryInput::Text(text),
            }
        } else {
            self.input = SummaryInput::Text(text);
        }
    }

    /// Accept a TXT or PDF file, replacing any pasted text. Other types set
    /// an error and leave the input as it was. Returns whether it was taken.
    pub fn select_file(&mut self, upload: FileUpload) -> bool {
        if !upload.is_supported() {
            tracing::debug!(mime = %upload.mime_type, "rejected upload");
            self.error = Some("Please upload a TXT or PDF file".to_string());
            return false;
        }
        self.input = SummaryInput::File(upload);
        self.error = None;
        true
    }

    pub fn clear_input(&mut self) {
        self.input = SummaryInput::Empty;
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    // -- Create --

    /// `None` while a submission is in flight, or when there is nothing to
    /// summarize (an inline error is set and no call should be made).
    pub fn begin_submit(&mut self) -> Option<SummaryRequest> {
        if self.submitting {
            return None;
        }
        self.error = None;
        self.current = None;

        if self.input.is_blank() {
            self.error = Some("Please provide text or upload a file".to_string());
            return None;
        }
        let request = match &self.input {
            SummaryInput::File(upload) => SummaryRequest::from_file(upload.clone()),
            SummaryInput::Text(text) => SummaryRequest::from_text(text.clone()),
            SummaryInput::Empty => return None,
        };

        self.submitting = true;
        Some(
            request
                .with_type(self.summary_type)
                .with_length(self.summary_length),
        )
    }

    /// Success shows the new summary and resets the input. The history list
    /// is left alone; it refreshes next time the tab opens.
    pub fn finish_submit(&mut self, result: Result<CreatedSummary>) {
        self.submitting = false;
        match result {
            Ok(created) => {
                self.current = Some(created);
                self.input = SummaryInput::Empty;
            }
            Err(e) => self.error = Some(e.user_message()),
        }
    }

    pub async fn submit<A: SummarizerApi>(&mut self, api: &A) -> Option<&CreatedSummary> {
        let request = self.begin_submit()?;
        let result = api.create_summary(&request).await;
        self.finish_submit(result);
        self.current.as_ref()
    }

    // -- History --

    /// Switch tabs. Returns `true` when the history list should be fetched.
    pub fn select_tab(&mut self, tab: DashboardTab) -> bool {
        let changed = self.tab != tab;
        self.tab = tab;
        changed && tab == DashboardTab::History
    }

    pub fn begin_history(&mut self) {
        self.history_loading = true;
    }

    pub fn finish_history(&mut self, result: Result<Vec<Summary>>) {
        self.history_loading = false;
        match result {
            Ok(summaries) => self.history = summaries,
            Err(e) => {
                tracing::debug!("history load failed: {e}");
                self.error = Some(Operation::ListSummaries.fallback_message());
            }
        }
    }

    pub async fn open_tab<A: SummarizerApi>(&mut self, api: &A, tab: DashboardTab) {
        if self.select_tab(tab) {
            self.begin_history();
            let result = api.list_summaries().await;
            self.finish_history(result);
        }
    }

    // -- Download --

    /// Failure sets the per-format message and touches nothing else.
    pub fn finish_download(
        &mut self,
        format: DownloadFormat,
        result: Result<PathBuf>,
    ) -> Option<PathBuf> {
        match result {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::debug!("download failed: {e}");
                self.error = Some(Operation::Download(format).fallback_message());
                None
            }
        }
    }

    pub async fn download<A: SummarizerApi>(
        &mut self,
        api: &A,
        dir: &Path,
        summary_id: &str,
        format: DownloadFormat,
    ) -> Option<PathBuf> {
        let result = download_to(api, dir, summary_id, format).await;
        self.finish_download(format, result)
    }
}
