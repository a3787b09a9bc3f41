use booksum_core::model::*;
use booksum_core::router::{Gate, Resolution, Route};
use booksum_core::session::SessionState;
use booksum_core::views::{
    AdminDashboard, AdminTab, DashboardTab, LandingAction, LoginForm, RegisterForm, UserDashboard,
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::event::{AsyncAction, AsyncResult};

/// Calls to action in landing-screen order.
pub const LANDING_ACTIONS: [LandingAction; 2] = [LandingAction::GetStarted, LandingAction::SignIn];

pub const LOGIN_FIELDS: usize = 2;

/// username, email, password, confirm, admin toggle
pub const REGISTER_FIELDS: usize = 5;

/// Focused control on the dashboard's create tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateFocus {
    Text,
    File,
    Type,
    Length,
}

impl CreateFocus {
    const ORDER: [CreateFocus; 4] = [
        CreateFocus::Text,
        CreateFocus::File,
        CreateFocus::Type,
        CreateFocus::Length,
    ];

    fn step(self, delta: isize) -> Self {
        let len = Self::ORDER.len() as isize;
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0) as isize;
        Self::ORDER[(idx + delta).rem_euclid(len) as usize]
    }
}

/// Central application state.
pub struct App {
    /// Mirror of the worker-owned session store.
    pub session: SessionState,
    /// Route the user asked for; `screen()` gives what is actually shown.
    pub route: Route,
    entered: Option<Route>,
    pub should_quit: bool,
    pending: Vec<AsyncAction>,
    defaults: (SummaryType, SummaryLength),

    // -- Splash --
    pub splash_until: std::time::Instant,

    // -- Landing --
    pub landing_action: usize,

    // -- Auth forms --
    pub login: LoginForm,
    pub login_field: usize,
    pub register: RegisterForm,
    pub register_field: usize,

    // -- User dashboard --
    pub dashboard: UserDashboard,
    pub create_focus: CreateFocus,
    pub file_path: String,
    pub history_selected: usize,

    // -- Admin dashboard --
    pub admin: AdminDashboard,
    pub admin_selected: usize,

    // -- Notice toast --
    pub notice: Option<String>,
    pub notice_timer: u8, // ticks remaining
}

impl App {
    pub fn new(summary_type: SummaryType, summary_length: SummaryLength) -> Self {
        Self {
            session: SessionState::Loading,
            route: Route::Landing,
            entered: None,
            should_quit: false,
            pending: Vec::new(),
            defaults: (summary_type, summary_length),

            splash_until: std::time::Instant::now() + std::time::Duration::from_millis(800),

            landing_action: 0,

            login: LoginForm::new(),
            login_field: 0,
            register: RegisterForm::new(),
            register_field: 0,

            dashboard: UserDashboard::with_options(summary_type, summary_length),
            create_focus: CreateFocus::Text,
            file_path: String::new(),
            history_selected: 0,

            admin: AdminDashboard::new(),
            admin_selected: 0,

            notice: None,
            notice_timer: 0,
        }
    }

    /// What the gate lets the user see right now.
    pub fn screen(&self) -> Resolution {
        Gate::settle(&self.session, self.route)
    }

    /// Actions queued by state changes rather than key presses.
    pub fn take_pending(&mut self) -> Vec<AsyncAction> {
        std::mem::take(&mut self.pending)
    }

    pub fn navigate(&mut self, route: Route) {
        self.route = route;
        self.sync_route();
    }

    /// Settle the requested route and run entry hooks for a newly shown screen.
    fn sync_route(&mut self) {
        if let Resolution::Render(route) = self.screen() {
            self.route = route;
            if self.entered != Some(route) {
                self.entered = Some(route);
                self.enter(route);
            }
        }
    }

    fn enter(&mut self, route: Route) {
        match route {
            Route::Admin => {
                let tab = self.admin.begin_load();
                self.pending.push(admin_load_action(tab));
            }
            Route::Dashboard if self.dashboard.tab == DashboardTab::History => {
                self.dashboard.begin_history();
                self.pending.push(AsyncAction::LoadHistory);
            }
            _ => {}
        }
    }

    fn set_session(&mut self, state: SessionState) {
        if !matches!(state, SessionState::Authenticated(_)) {
            let (summary_type, summary_length) = self.defaults;
            self.dashboard = UserDashboard::with_options(summary_type, summary_length);
            self.admin = AdminDashboard::new();
            self.file_path.clear();
            self.history_selected = 0;
            self.admin_selected = 0;
        }
        self.session = state;
        self.sync_route();
    }

    fn signed_in(&mut self, session: Session) {
        self.login = LoginForm::new();
        self.register = RegisterForm::new();
        self.login_field = 0;
        self.register_field = 0;
        self.show_notice(format!("Welcome, {}", session.user.username));
        self.set_session(SessionState::Authenticated(session));
    }

    fn show_notice(&mut self, msg: String) {
        self.notice = Some(msg);
        self.notice_timer = 60; // ~3s at 50ms tick
    }

    /// Process an async result from the worker.
    pub fn handle_result(&mut self, result: AsyncResult) {
        match result {
            AsyncResult::Session(state) => self.set_session(state),
            AsyncResult::LoginFinished(result) => {
                if let Some(session) = self.login.finish_submit(result) {
                    self.signed_in(session);
                }
            }
            AsyncResult::RegisterFinished(result) => {
                if let Some(session) = self.register.finish_submit(result) {
                    self.signed_in(session);
                }
            }
            AsyncResult::FileLoaded(Ok(upload)) => {
                let name = upload.file_name.clone();
                if self.dashboard.select_file(upload) {
                    self.file_path.clear();
                    self.show_notice(format!("Selected {name}"));
                }
            }
            AsyncResult::FileLoaded(Err(e)) => {
                self.dashboard.error = Some(e.user_message());
            }
            AsyncResult::SummaryCreated(result) => self.dashboard.finish_submit(result),
            AsyncResult::History(result) => {
                self.dashboard.finish_history(result);
                self.history_selected = self
                    .history_selected
                    .min(self.dashboard.history.len().saturating_sub(1));
            }
            AsyncResult::Downloaded {
                format,
                origin,
                result,
            } => {
                let saved = match origin {
                    Route::Admin => self.admin.finish_download(format, result),
                    _ => self.dashboard.finish_download(format, result),
                };
                if let Some(path) = saved {
                    self.show_notice(format!("Saved {}", path.display()));
                }
            }
            AsyncResult::Users(result) => {
                self.admin.finish_users(result);
                self.admin_selected = 0;
            }
            AsyncResult::AllSummaries(result) => {
                self.admin.finish_summaries(result);
                self.admin_selected = 0;
            }
        }
    }

    /// Handle a key event. Returns an optional async action to dispatch.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<AsyncAction> {
        // Ctrl+C always quits
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return None;
        }

        match self.screen() {
            Resolution::Loading | Resolution::Redirect(_) => {
                if key.code == KeyCode::Char('q') {
                    self.should_quit = true;
                }
                None
            }
            Resolution::Render(Route::Landing) => {
                self.handle_landing(key);
                None
            }
            Resolution::Render(Route::Login) => self.handle_login(key),
            Resolution::Render(Route::Register) => self.handle_register(key),
            Resolution::Render(Route::Dashboard) => self.handle_dashboard(key),
            Resolution::Render(Route::Admin) => self.handle_admin(key),
        }
    }

    fn handle_landing(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => {
                self.landing_action = (self.landing_action + 1) % LANDING_ACTIONS.len();
            }
            KeyCode::Enter => self.navigate(LANDING_ACTIONS[self.landing_action].target()),
            KeyCode::Char('l') => self.navigate(Route::Login),
            KeyCode::Char('r') | KeyCode::Char('g') => self.navigate(Route::Register),
            _ => {}
        }
    }

    fn handle_login(&mut self, key: KeyEvent) -> Option<AsyncAction> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => {
                self.navigate(Route::Landing);
                None
            }
            KeyCode::Char('r') if ctrl => {
                self.navigate(Route::Register);
                None
            }
            KeyCode::Char('s') if ctrl => self.submit_login(),
            KeyCode::Tab | KeyCode::Down => {
                self.login_field = (self.login_field + 1) % LOGIN_FIELDS;
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.login_field = (self.login_field + LOGIN_FIELDS - 1) % LOGIN_FIELDS;
                None
            }
            KeyCode::Enter if self.login_field + 1 < LOGIN_FIELDS => {
                self.login_field += 1;
                None
            }
            KeyCode::Enter => self.submit_login(),
            KeyCode::Char(c) if !ctrl => {
                self.login_input().push(c);
                None
            }
            KeyCode::Backspace => {
                self.login_input().pop();
                None
            }
            _ => None,
        }
    }

    fn login_input(&mut self) -> &mut String {
        match self.login_field {
            0 => &mut self.login.username,
            _ => &mut self.login.password,
        }
    }

    fn submit_login(&mut self) -> Option<AsyncAction> {
        self.login.begin_submit().map(AsyncAction::Login)
    }

    fn handle_register(&mut self, key: KeyEvent) -> Option<AsyncAction> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let on_toggle = self.register_field == REGISTER_FIELDS - 1;
        match key.code {
            KeyCode::Esc => {
                self.navigate(Route::Landing);
                None
            }
            KeyCode::Char('l') if ctrl => {
                self.navigate(Route::Login);
                None
            }
            KeyCode::Char('s') if ctrl => self.submit_register(),
            KeyCode::Tab | KeyCode::Down => {
                self.register_field = (self.register_field + 1) % REGISTER_FIELDS;
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.register_field = (self.register_field + REGISTER_FIELDS - 1) % REGISTER_FIELDS;
                None
            }
            KeyCode::Char(' ') if on_toggle => {
                self.register.is_admin = !self.register.is_admin;
                None
            }
            KeyCode::Enter if !on_toggle => {
                self.register_field += 1;
                None
            }
            KeyCode::Enter => self.submit_register(),
            KeyCode::Char(c) if !ctrl && !on_toggle => {
                if let Some(field) = self.register_input() {
                    field.push(c);
                }
                None
            }
            KeyCode::Backspace => {
                if let Some(field) = self.register_input() {
                    field.pop();
                }
                None
            }
            _ => None,
        }
    }

    fn register_input(&mut self) -> Option<&mut String> {
        match self.register_field {
            0 => Some(&mut self.register.username),
            1 => Some(&mut self.register.email),
            2 => Some(&mut self.register.password),
            3 => Some(&mut self.register.confirm_password),
            _ => None,
        }
    }

    fn submit_register(&mut self) -> Option<AsyncAction> {
        self.register.begin_submit().map(AsyncAction::Register)
    }

    fn handle_dashboard(&mut self, key: KeyEvent) -> Option<AsyncAction> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('x') if ctrl => return Some(AsyncAction::Logout),
            KeyCode::Char('t') if ctrl => {
                let next = match self.dashboard.tab {
                    DashboardTab::Create => DashboardTab::History,
                    DashboardTab::History => DashboardTab::Create,
                };
                return self.select_dashboard_tab(next);
            }
            KeyCode::Esc => {
                self.dashboard.dismiss_error();
                return None;
            }
            _ => {}
        }

        match self.dashboard.tab {
            DashboardTab::Create => self.handle_create(key),
            DashboardTab::History => self.handle_history(key),
        }
    }

    fn select_dashboard_tab(&mut self, tab: DashboardTab) -> Option<AsyncAction> {
        if self.dashboard.select_tab(tab) {
            self.dashboard.begin_history();
            Some(AsyncAction::LoadHistory)
        } else {
            None
        }
    }

    fn handle_create(&mut self, key: KeyEvent) -> Option<AsyncAction> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Tab => {
                self.create_focus = self.create_focus.step(1);
                None
            }
            KeyCode::BackTab => {
                self.create_focus = self.create_focus.step(-1);
                None
            }
            KeyCode::Char('s') if ctrl => self
                .dashboard
                .begin_submit()
                .map(AsyncAction::CreateSummary),
            KeyCode::Char('d') if ctrl => self.download_current(DownloadFormat::Txt),
            KeyCode::Char('p') if ctrl => self.download_current(DownloadFormat::Pdf),
            _ if ctrl => None,
            _ => match self.create_focus {
                CreateFocus::Text => {
                    let mut text = self.dashboard.input.text().to_string();
                    match key.code {
                        KeyCode::Char(c) => text.push(c),
                        KeyCode::Enter => text.push('\n'),
                        KeyCode::Backspace => {
                            text.pop();
                        }
                        _ => return None,
                    }
                    self.dashboard.set_text(text);
                    None
                }
                CreateFocus::File => match key.code {
                    KeyCode::Char(c) => {
                        self.file_path.push(c);
                        None
                    }
                    KeyCode::Backspace => {
                        self.file_path.pop();
                        None
                    }
                    KeyCode::Delete => {
                        if self.dashboard.input.file().is_some() {
                            self.dashboard.clear_input();
                        }
                        None
                    }
                    KeyCode::Enter if !self.file_path.trim().is_empty() => {
                        Some(AsyncAction::LoadFile {
                            path: self.file_path.trim().into(),
                        })
                    }
                    _ => None,
                },
                CreateFocus::Type => {
                    if matches!(
                        key.code,
                        KeyCode::Left | KeyCode::Right | KeyCode::Enter | KeyCode::Char(' ')
                    ) {
                        self.dashboard.summary_type = match self.dashboard.summary_type {
                            SummaryType::Paragraph => SummaryType::Bullet,
                            SummaryType::Bullet => SummaryType::Paragraph,
                        };
                    }
                    None
                }
                CreateFocus::Length => {
                    let all = SummaryLength::ALL;
                    let idx = all
                        .iter()
                        .position(|l| *l == self.dashboard.summary_length)
                        .unwrap_or(1);
                    let next = match key.code {
                        KeyCode::Left => (idx + all.len() - 1) % all.len(),
                        KeyCode::Right | KeyCode::Enter | KeyCode::Char(' ') => {
                            (idx + 1) % all.len()
                        }
                        _ => idx,
                    };
                    self.dashboard.summary_length = all[next];
                    None
                }
            },
        }
    }

    fn download_current(&mut self, format: DownloadFormat) -> Option<AsyncAction> {
        let summary_id = self.dashboard.current.as_ref()?.summary_id.clone();
        Some(AsyncAction::Download {
            summary_id,
            format,
            origin: Route::Dashboard,
        })
    }

    fn handle_history(&mut self, key: KeyEvent) -> Option<AsyncAction> {
        let len = self.dashboard.history.len();
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                None
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.history_selected = step_selection(self.history_selected, 1, len);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.history_selected = step_selection(self.history_selected, -1, len);
                None
            }
            KeyCode::Char('r') => {
                self.dashboard.begin_history();
                Some(AsyncAction::LoadHistory)
            }
            KeyCode::Char('t') => self.download_history(DownloadFormat::Txt),
            KeyCode::Char('p') => self.download_history(DownloadFormat::Pdf),
            _ => None,
        }
    }

    fn download_history(&mut self, format: DownloadFormat) -> Option<AsyncAction> {
        let summary = self.dashboard.history.get(self.history_selected)?;
        Some(AsyncAction::Download {
            summary_id: summary.summary_id.clone(),
            format,
            origin: Route::Dashboard,
        })
    }

    fn handle_admin(&mut self, key: KeyEvent) -> Option<AsyncAction> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let len = match self.admin.tab {
            AdminTab::Users => self.admin.users.len(),
            AdminTab::Summaries => self.admin.visible_summaries().len(),
        };
        match key.code {
            KeyCode::Char('x') if ctrl => Some(AsyncAction::Logout),
            KeyCode::Char('q') => {
                self.should_quit = true;
                None
            }
            KeyCode::Esc => {
                self.admin.dismiss_error();
                None
            }
            KeyCode::Tab => {
                let next = match self.admin.tab {
                    AdminTab::Users => AdminTab::Summaries,
                    AdminTab::Summaries => AdminTab::Users,
                };
                self.select_admin_tab(next)
            }
            KeyCode::Char('1') => self.select_admin_tab(AdminTab::Users),
            KeyCode::Char('2') => self.select_admin_tab(AdminTab::Summaries),
            KeyCode::Char('r') => {
                let tab = self.admin.begin_load();
                Some(admin_load_action(tab))
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.admin_selected = step_selection(self.admin_selected, 1, len);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.admin_selected = step_selection(self.admin_selected, -1, len);
                None
            }
            KeyCode::Enter | KeyCode::Char('v') if self.admin.tab == AdminTab::Users => {
                let user_id = self.admin.users.get(self.admin_selected)?.id;
                self.admin_selected = 0;
                if self.admin.view_summaries(user_id) {
                    let tab = self.admin.begin_load();
                    Some(admin_load_action(tab))
                } else {
                    None
                }
            }
            KeyCode::Char('a') if self.admin.tab == AdminTab::Summaries => {
                self.admin.show_all();
                self.admin_selected = 0;
                None
            }
            KeyCode::Char('t') if self.admin.tab == AdminTab::Summaries => {
                self.download_admin(DownloadFormat::Txt)
            }
            KeyCode::Char('p') if self.admin.tab == AdminTab::Summaries => {
                self.download_admin(DownloadFormat::Pdf)
            }
            _ => None,
        }
    }

    fn select_admin_tab(&mut self, tab: AdminTab) -> Option<AsyncAction> {
        if self.admin.select_tab(tab) {
            self.admin_selected = 0;
            let tab = self.admin.begin_load();
            Some(admin_load_action(tab))
        } else {
            None
        }
    }

    fn download_admin(&mut self, format: DownloadFormat) -> Option<AsyncAction> {
        let summary_id = self
            .admin
            .visible_summaries()
            .get(self.admin_selected)?
            .summary_id
            .clone();
        Some(AsyncAction::Download {
            summary_id,
            format,
            origin: Route::Admin,
        })
    }

    /// Tick the notice timer down.
    pub fn tick_notice(&mut self) {
        if self.notice_timer > 0 {
            self.notice_timer -= 1;
            if self.notice_timer == 0 {
                self.notice = None;
            }
        }
    }
}

fn admin_load_action(tab: AdminTab) -> AsyncAction {
    match tab {
        AdminTab::Users => AsyncAction::LoadUsers,
        AdminTab::Summaries => AsyncAction::LoadAllSummaries,
    }
}

fn step_selection(current: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    (current as isize + delta).clamp(0, len as isize - 1) as usize
}
