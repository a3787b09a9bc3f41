pub mod app;
pub mod event;
mod views;
mod widgets;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use booksum_core::api::{download_to, FileUpload, HttpClient, SummarizerApi};
use booksum_core::config::BooksumConfig;
use booksum_core::router::{Resolution, Route};
use booksum_core::session::SessionStore;
use crossterm::event::{self as ct_event, Event};
use ratatui::{DefaultTerminal, Frame};
use tokio::sync::mpsc;

use self::app::App;
use self::event::{AsyncAction, AsyncResult};

/// Entry point for the interactive TUI mode.
pub async fn run_tui(config: &BooksumConfig) -> Result<()> {
    let client = HttpClient::from_config(config).context("failed to create API client")?;
    let store = SessionStore::new(client);
    let download_dir = config.download_dir();

    // Channels for async communication
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<AsyncAction>();
    let (result_tx, mut result_rx) = mpsc::unbounded_channel::<AsyncResult>();

    tokio::spawn(async move {
        worker_loop(store, download_dir, &mut action_rx, &result_tx).await;
    });

    // Validate the persisted token before any screen is decided
    action_tx.send(AsyncAction::InitSession)?;

    // Initialize terminal
    let mut terminal = ratatui::init();
    let mut app = App::new(config.summary.summary_type(), config.summary.summary_length());

    let result = run_loop(
        &mut terminal,
        &mut app,
        &action_tx,
        &mut result_rx,
        &config.api.base_url,
    );

    // Restore terminal
    ratatui::restore();

    result
}

fn run_loop(
    terminal: &mut DefaultTerminal,
    app: &mut App,
    action_tx: &mpsc::UnboundedSender<AsyncAction>,
    result_rx: &mut mpsc::UnboundedReceiver<AsyncResult>,
    api_url: &str,
) -> Result<()> {
    loop {
        // Draw
        terminal.draw(|frame| render(frame, app, api_url))?;

        // Poll for async results (non-blocking)
        while let Ok(result) = result_rx.try_recv() {
            app.handle_result(result);
        }

        // Screen entries queue their own fetches
        for action in app.take_pending() {
            let _ = action_tx.send(action);
        }

        // Poll for keyboard events (50ms timeout for responsive UI)
        if ct_event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = ct_event::read()? {
                if let Some(action) = app.handle_key(key) {
                    let _ = action_tx.send(action);
                }
                for action in app.take_pending() {
                    let _ = action_tx.send(action);
                }
            }
        }

        app.tick_notice();

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn render(frame: &mut Frame, app: &App, api_url: &str) {
    let area = frame.area();

    let splash_active = std::time::Instant::now() < app.splash_until;
    let screen = app.screen();
    if splash_active || screen == Resolution::Loading {
        views::splash::render(frame, area, api_url, app.session.is_loading());
        return;
    }

    match screen {
        Resolution::Render(Route::Landing) => views::landing::render(frame, app, area),
        Resolution::Render(Route::Login) => views::login::render(frame, app, area),
        Resolution::Render(Route::Register) => views::register::render(frame, app, area),
        Resolution::Render(Route::Dashboard) => views::dashboard::render(frame, app, area),
        Resolution::Render(Route::Admin) => views::admin::render(frame, app, area),
        // settle() never hands back a redirect; draw nothing for a frame
        Resolution::Loading | Resolution::Redirect(_) => {}
    }

    if let Some(ref msg) = app.notice {
        render_notice_toast(frame, msg);
    }
}

fn render_notice_toast(frame: &mut Frame, msg: &str) {
    use ratatui::{
        layout::{Constraint, Flex, Layout},
        style::{Color, Style},
        widgets::{Block, Borders, Clear, Paragraph},
    };

    let area = frame.area();
    let [toast_area] = Layout::horizontal([Constraint::Percentage(60)])
        .flex(Flex::Center)
        .areas(area);
    let [toast_area] = Layout::vertical([Constraint::Length(3)])
        .flex(Flex::End)
        .areas(toast_area);

    frame.render_widget(Clear, toast_area);
    let toast = Paragraph::new(format!(" ✓ {msg}"))
        .style(Style::default().fg(Color::Black).bg(Color::Green))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        );
    frame.render_widget(toast, toast_area);
}

/// Async worker loop: owns the session store and runs every backend call.
async fn worker_loop(
    mut store: SessionStore<HttpClient>,
    download_dir: PathBuf,
    action_rx: &mut mpsc::UnboundedReceiver<AsyncAction>,
    result_tx: &mpsc::UnboundedSender<AsyncResult>,
) {
    while let Some(action) = action_rx.recv().await {
        let result = match action {
            AsyncAction::InitSession => AsyncResult::Session(store.init().await.clone()),
            AsyncAction::Login(request) => AsyncResult::LoginFinished(
                store.login(&request.username, &request.password).await,
            ),
            AsyncAction::Register(request) => {
                AsyncResult::RegisterFinished(store.register(&request).await)
            }
            AsyncAction::Logout => {
                store.logout().await;
                AsyncResult::Session(store.state().clone())
            }
            AsyncAction::LoadFile { path } => {
                AsyncResult::FileLoaded(FileUpload::from_path(&path).await)
            }
            AsyncAction::CreateSummary(request) => {
                AsyncResult::SummaryCreated(store.api().create_summary(&request).await)
            }
            AsyncAction::LoadHistory => AsyncResult::History(store.api().list_summaries().await),
            AsyncAction::Download {
                summary_id,
                format,
                origin,
            } => AsyncResult::Downloaded {
                format,
                origin,
                result: download_to(store.api(), &download_dir, &summary_id, format).await,
            },
            AsyncAction::LoadUsers => AsyncResult::Users(store.api().admin_list_users().await),
            AsyncAction::LoadAllSummaries => {
                AsyncResult::AllSummaries(store.api().admin_list_summaries().await)
            }
        };
        if result_tx.send(result).is_err() {
            break; // UI closed
        }
    }
}
