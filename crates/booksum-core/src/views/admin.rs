use std::path::{Path, PathBuf};

use crate::api::{download_to, Operation, SummarizerApi};
use crate::error::Result;
use crate::model::{DownloadFormat, Summary, UserSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdminTab {
    #[default]
    Users,
    Summaries,
}

/// Header figures. Computed over the lists as fetched, ignoring the user filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdminStats {
    pub total_users: usize,
    pub total_summaries: usize,
    pub average_per_user: f64,
}

impl AdminStats {
    /// One decimal, or a bare `0` when there are no users.
    pub fn average_label(&self) -> String {
        if self.total_users == 0 {
            "0".to_string()
        } else {
            format!("{:.1}", self.average_per_user)
        }
    }
}

/// State of the admin dashboard.
///
/// Nothing is fetched on construction. Each tab activation issues its own
/// request; users and summaries are separate round trips.
#[derive(Debug, Clone, Default)]
pub struct AdminDashboard {
    pub tab: AdminTab,
    pub users: Vec<UserSummary>,
    pub summaries: Vec<Summary>,
    pub selected_user: Option<i64>,
    pub loading: bool,
    pub error: Option<String>,
}

impl AdminDashboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch tabs. Returns `true` when the new tab's list should be fetched.
    pub fn select_tab(&mut self, tab: AdminTab) -> bool {
        let changed = self.tab != tab;
        self.tab = tab;
        changed
    }

    /// Mark the current tab as loading and return it so the caller knows
    /// which endpoint to hit.
    pub fn begin_load(&mut self) -> AdminTab {
        self.loading = true;
        self.tab
    }

    pub fn finish_users(&mut self, result: Result<Vec<UserSummary>>) {
        self.loading = false;
        match result {
            Ok(users) => self.users = users,
            Err(e) => {
                tracing::debug!("user list failed: {e}");
                self.error = Some(Operation::AdminListUsers.fallback_message());
            }
        }
    }

    pub fn finish_summaries(&mut self, result: Result<Vec<Summary>>) {
        self.loading = false;
        match result {
            Ok(summaries) => self.summaries = summaries,
            Err(e) => {
                tracing::debug!("summary list failed: {e}");
                self.error = Some(Operation::AdminListSummaries.fallback_message());
            }
        }
    }

    /// Fetch the list behind the current tab.
    pub async fn refresh<A: SummarizerApi>(&mut self, api: &A) {
        match self.begin_load() {
            AdminTab::Users => {
                let result = api.admin_list_users().await;
                self.finish_users(result);
            }
            AdminTab::Summaries => {
                let result = api.admin_list_summaries().await;
                self.finish_summaries(result);
            }
        }
    }

    pub async fn open_tab<A: SummarizerApi>(&mut self, api: &A, tab: AdminTab) {
        if self.select_tab(tab) {
            self.refresh(api).await;
        }
    }

    /// Filter to one user's summaries and jump to the summaries tab.
    /// Returns `true` when the tab changed and a fetch is due.
    pub fn view_summaries(&mut self, user_id: i64) -> bool {
        self.selected_user = Some(user_id);
        self.select_tab(AdminTab::Summaries)
    }

    pub async fn view_user<A: SummarizerApi>(&mut self, api: &A, user_id: i64) {
        if self.view_summaries(user_id) {
            self.refresh(api).await;
        }
    }

    pub fn show_all(&mut self) {
        self.selected_user = None;
    }

    /// The fetched summaries, narrowed to the selected user when one is set.
    pub fn visible_summaries(&self) -> Vec<&Summary> {
        self.summaries
            .iter()
            .filter(|s| self.selected_user.map_or(true, |id| s.user_id == id))
            .collect()
    }

    /// Username behind the active filter, if that user is in the fetched list.
    pub fn selected_username(&self) -> Option<&str> {
        let id = self.selected_user?;
        self.users
            .iter()
            .find(|u| u.id == id)
            .map(|u| u.username.as_str())
    }

    pub fn stats(&self) -> AdminStats {
        let total_users = self.users.len();
        let total_summaries = self.summaries.len();
        let average_per_user = if total_users == 0 {
            0.0
        } else {
            total_summaries as f64 / total_users as f64
        };
        AdminStats {
            total_users,
            total_summaries,
            average_per_user,
        }
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

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
