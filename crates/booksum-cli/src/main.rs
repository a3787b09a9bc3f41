mod tui;

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use booksum_core::api::{FileUpload, HttpClient, SummarizerApi};
use booksum_core::config::BooksumConfig;
use booksum_core::model::*;
use booksum_core::router::{Gate, Resolution, Route};
use booksum_core::session::{SessionState, SessionStore};
use booksum_core::views::format::{
    format_timestamp, preview, word_count_label, ADMIN_PREVIEW_CHARS, HISTORY_PREVIEW_CHARS,
};
use booksum_core::views::{AdminDashboard, DashboardTab, LoginForm, RegisterForm, UserDashboard};
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "booksum", about = "Booksum: AI book summaries from the terminal", version)]
enum Cli {
    /// Sign in and store the session token
    Login {
        /// Account username
        username: String,
        /// Password (prompted for when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Create an account and sign in
    Register {
        /// Account username
        username: String,
        /// Email address
        #[arg(short, long)]
        email: String,
        /// Password (prompted for twice when omitted)
        #[arg(short, long)]
        password: Option<String>,
        /// Request an admin account
        #[arg(long)]
        admin: bool,
    },
    /// Sign out and forget the stored token
    Logout,
    /// Show the signed-in user
    Whoami {
        /// Output raw JSON
        #[arg(long)]
        json: bool,
    },
    /// Summarize pasted text or a TXT/PDF file
    Summarize {
        /// Text to summarize; `-` reads stdin
        text: Option<String>,
        /// File to upload instead of text
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,
        /// Summary style: paragraph or bullet (default from config)
        #[arg(short = 't', long = "type")]
        summary_type: Option<String>,
        /// Target length in words: 50, 75 or 100 (default from config)
        #[arg(short, long)]
        length: Option<String>,
        /// Also download the result (txt or pdf)
        #[arg(short, long)]
        download: Option<String>,
        /// Output raw JSON
        #[arg(long)]
        json: bool,
    },
    /// List your summaries
    List {
        /// Output raw JSON
        #[arg(long)]
        json: bool,
    },
    /// Download a summary as TXT or PDF
    Download {
        /// Summary ID
        id: String,
        /// File format: txt or pdf
        #[arg(short, long, default_value = "txt")]
        format: String,
        /// Target directory (default from config)
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },
    /// Admin views over all users and summaries
    #[command(subcommand)]
    Admin(AdminCommand),
    /// Show where the client would land for a path
    Route {
        /// Path such as /, /login, /dashboard, /admin
        path: String,
    },
    /// Show configuration and session status
    Status,
    /// Launch the interactive terminal UI
    Tui,
}

#[derive(Subcommand)]
enum AdminCommand {
    /// List every user
    Users {
        /// Output raw JSON
        #[arg(long)]
        json: bool,
    },
    /// List every summary, optionally narrowed to one user
    Summaries {
        /// Only show this user's summaries
        #[arg(short, long)]
        user: Option<i64>,
        /// Output raw JSON
        #[arg(long)]
        json: bool,
    },
    /// Fetch one user's summaries from the per-user endpoint
    UserSummaries {
        /// User ID
        id: i64,
        /// Output raw JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // The TUI owns the terminal; log lines on stderr would tear the screen.
    if !matches!(cli, Cli::Tui) {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("booksum=warn")),
            )
            .compact()
            .init();
    }

    let config = BooksumConfig::load(Some(&std::env::current_dir()?))
        .unwrap_or_else(|_| BooksumConfig::default_config());

    run(cli, &config).await
}

async fn run(cli: Cli, config: &BooksumConfig) -> Result<()> {
    match cli {
        Cli::Login { username, password } => cmd_login(config, username, password).await,
        Cli::Register {
            username,
            email,
            password,
            admin,
        } => cmd_register(config, username, email, password, admin).await,
        Cli::Logout => cmd_logout(config).await,
        Cli::Whoami { json } => cmd_whoami(config, json).await,
        Cli::Summarize {
            text,
            file,
            summary_type,
            length,
            download,
            json,
        } => {
            let summary_type = match summary_type {
                Some(s) => s.parse::<SummaryType>().map_err(anyhow::Error::msg)?,
                None => config.summary.summary_type(),
            };
            let length = match length {
                Some(s) => s.parse::<SummaryLength>().map_err(anyhow::Error::msg)?,
                None => config.summary.summary_length(),
            };
            let download = download
                .as_deref()
                .map(|s| s.parse::<DownloadFormat>().map_err(anyhow::Error::msg))
                .transpose()?;
            cmd_summarize(config, text, file, summary_type, length, download, json).await
        }
        Cli::List { json } => cmd_list(config, json).await,
        Cli::Download { id, format, dir } => {
            let format = format.parse::<DownloadFormat>().map_err(anyhow::Error::msg)?;
            let dir = dir.unwrap_or_else(|| config.download_dir());
            cmd_download(config, &id, format, &dir).await
        }
        Cli::Admin(AdminCommand::Users { json }) => cmd_admin_users(config, json).await,
        Cli::Admin(AdminCommand::Summaries { user, json }) => {
            cmd_admin_summaries(config, user, json).await
        }
        Cli::Admin(AdminCommand::UserSummaries { id, json }) => {
            cmd_admin_user_summaries(config, id, json).await
        }
        Cli::Route { path } => cmd_route(config, &path).await,
        Cli::Status => cmd_status(config).await,
        Cli::Tui => tui::run_tui(config).await,
    }
}

fn make_client(config: &BooksumConfig) -> Result<HttpClient> {
    HttpClient::from_config(config).context("failed to create API client")
}

/// Session store with the persisted token already validated.
async fn open_session(config: &BooksumConfig) -> Result<SessionStore<HttpClient>> {
    let mut store = SessionStore::new(make_client(config)?);
    let role = store.init().await.role();
    tracing::debug!(?role, "session opened");
    Ok(store)
}

fn require_session(store: &SessionStore<HttpClient>) -> Result<&Session> {
    store
        .session()
        .context("not signed in (run `booksum login <username>` first)")
}

fn prompt(label: &str) -> Result<String> {
    eprint!("{label}");
    std::io::stderr().flush()?;
    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .context("failed to read from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn print_signed_in(session: &Session) {
    println!(
        "{} Signed in as {} ({})",
        "✓".green(),
        session.user.username.bold(),
        session.role().to_string().cyan()
    );
}

// ---------------------------------------------------------------------------
// auth
// ---------------------------------------------------------------------------

async fn cmd_login(config: &BooksumConfig, username: String, password: Option<String>) -> Result<()> {
    let password = match password {
        Some(p) => p,
        None => prompt("Password: ")?,
    };
    let mut store = SessionStore::new(make_client(config)?);
    let mut form = LoginForm {
        username,
        password,
        ..Default::default()
    };
    match form.submit(&mut store).await {
        Some(session) => {
            print_signed_in(&session);
            Ok(())
        }
        None => bail!(form.error.unwrap_or_else(|| "Login failed".to_string())),
    }
}

async fn cmd_register(
    config: &BooksumConfig,
    username: String,
    email: String,
    password: Option<String>,
    admin: bool,
) -> Result<()> {
    let (password, confirm_password) = match password {
        Some(p) => (p.clone(), p),
        None => (prompt("Password: ")?, prompt("Confirm password: ")?),
    };
    let mut store = SessionStore::new(make_client(config)?);
    let mut form = RegisterForm {
        username,
        email,
        password,
        confirm_password,
        is_admin: admin,
        ..Default::default()
    };
    match form.submit(&mut store).await {
        Some(session) => {
            print_signed_in(&session);
            Ok(())
        }
        None => bail!(form.error.unwrap_or_else(|| "Registration failed".to_string())),
    }
}

async fn cmd_logout(config: &BooksumConfig) -> Result<()> {
    let mut store = SessionStore::new(make_client(config)?);
    store.logout().await;
    println!("{} Signed out", "✓".green());
    Ok(())
}

async fn cmd_whoami(config: &BooksumConfig, json: bool) -> Result<()> {
    let store = open_session(config).await?;
    let session = require_session(&store)?;
    let user = &session.user;

    if json {
        println!("{}", serde_json::to_string_pretty(user)?);
        return Ok(());
    }

    println!("{}  {}", format!("[{}]", user.initial()).cyan().bold(), user.username.bold());
    println!("  {}      {}", "Email:".dimmed(), user.email);
    println!("  {}       {}", "Role:".dimmed(), session.role());
    println!("  {}         {}", "ID:".dimmed(), user.id);
    if !user.created_at.is_empty() {
        println!("  {}     {}", "Joined:".dimmed(), format_timestamp(&user.created_at));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// summaries
// ---------------------------------------------------------------------------

fn read_text_arg(text: Option<String>) -> Result<String> {
    match text.as_deref() {
        Some("-") | None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read text from stdin")?;
            Ok(buf)
        }
        Some(t) => Ok(t.to_string()),
    }
}

async fn cmd_summarize(
    config: &BooksumConfig,
    text: Option<String>,
    file: Option<PathBuf>,
    summary_type: SummaryType,
    length: SummaryLength,
    download: Option<DownloadFormat>,
    json: bool,
) -> Result<()> {
    let store = open_session(config).await?;
    require_session(&store)?;

    let mut dash = UserDashboard::with_options(summary_type, length);
    match file {
        Some(path) => {
            let upload = FileUpload::from_path(&path)
                .await
                .with_context(|| format!("failed to read {}", path.display()))?;
            if !dash.select_file(upload) {
                bail!(dash.error.take().unwrap_or_default());
            }
        }
        None => dash.set_text(read_text_arg(text)?),
    }

    let Some(created) = dash.submit(store.api()).await.cloned() else {
        bail!(dash
            .error
            .take()
            .unwrap_or_else(|| "Failed to generate summary".to_string()));
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&created)?);
    } else {
        println!(
            "{}  {}  {}",
            "Summary".bold(),
            created.summary_type.label().magenta(),
            word_count_label(created.word_count).dimmed()
        );
        println!("{}", "─".repeat(78).dimmed());
        println!("{}", created.summary);
        println!("{}", "─".repeat(78).dimmed());
        println!("  {} {}", "ID:".dimmed(), created.summary_id.cyan());
    }

    if let Some(format) = download {
        let dir = config.download_dir();
        match dash.download(store.api(), &dir, &created.summary_id, format).await {
            Some(path) => eprintln!("{} Saved {}", "✓".green(), path.display()),
            None => bail!(dash.error.take().unwrap_or_default()),
        }
    }
    Ok(())
}

async fn cmd_list(config: &BooksumConfig, json: bool) -> Result<()> {
    let store = open_session(config).await?;
    require_session(&store)?;

    let mut dash = UserDashboard::new();
    dash.open_tab(store.api(), DashboardTab::History).await;
    if let Some(err) = dash.error.take() {
        bail!(err);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&dash.history)?);
        return Ok(());
    }

    if dash.history.is_empty() {
        println!("No summaries yet. Create one with `booksum summarize`.");
        return Ok(());
    }

    for summary in &dash.history {
        print_summary_card(summary, HISTORY_PREVIEW_CHARS, false);
    }
    println!(
        "  {} summar{}",
        dash.history.len(),
        if dash.history.len() == 1 { "y" } else { "ies" }
    );
    Ok(())
}

fn print_summary_card(summary: &Summary, preview_chars: usize, with_owner: bool) {
    let mut header = format!(
        "{}  {}  {}",
        summary.summary_id.cyan(),
        summary.summary_type.label().magenta(),
        word_count_label(summary.word_count).dimmed(),
    );
    if with_owner && !summary.username.is_empty() {
        header.push_str(&format!("  {}", summary.username.yellow()));
    }
    println!("{header}");
    println!("  {}", format_timestamp(&summary.created_at).dimmed());
    for line in preview(&summary.summary_text, preview_chars).lines() {
        println!("  {line}");
    }
    println!("{}", "─".repeat(78).dimmed());
}

async fn cmd_download(
    config: &BooksumConfig,
    id: &str,
    format: DownloadFormat,
    dir: &Path,
) -> Result<()> {
    let store = open_session(config).await?;
    require_session(&store)?;

    let mut dash = UserDashboard::new();
    match dash.download(store.api(), dir, id, format).await {
        Some(path) => {
            println!("{} Saved {}", "✓".green(), path.display());
            Ok(())
        }
        None => bail!(dash.error.take().unwrap_or_default()),
    }
}

// ---------------------------------------------------------------------------
// admin
// ---------------------------------------------------------------------------

async fn cmd_admin_users(config: &BooksumConfig, json: bool) -> Result<()> {
    let store = open_session(config).await?;
    require_session(&store)?;

    let mut admin = AdminDashboard::new();
    admin.refresh(store.api()).await;
    if let Some(err) = admin.error.take() {
        bail!(err);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&admin.users)?);
        return Ok(());
    }

    println!(
        "  {}  {}  {}  {}  {}  {}",
        format!("{:<5}", "ID").dimmed(),
        format!("{:<16}", "Username").dimmed(),
        format!("{:<28}", "Email").dimmed(),
        format!("{:<6}", "Role").dimmed(),
        format!("{:<9}", "Summaries").dimmed(),
        "Joined".dimmed(),
    );
    println!("{}", "─".repeat(96).dimmed());
    for user in &admin.users {
        let role = user.role().to_string();
        let role = if user.is_admin {
            format!("{role:<6}").red().to_string()
        } else {
            format!("{role:<6}").green().to_string()
        };
        println!(
            "  {}  {:<16}  {:<28}  {}  {:<9}  {}",
            format!("{:<5}", user.id).cyan(),
            user.username,
            user.email,
            role,
            user.summary_count,
            format_timestamp(&user.created_at).dimmed(),
        );
    }
    println!("{}", "─".repeat(96).dimmed());
    println!(
        "  {} user{}",
        admin.users.len(),
        if admin.users.len() == 1 { "" } else { "s" }
    );
    Ok(())
}

async fn cmd_admin_summaries(config: &BooksumConfig, user: Option<i64>, json: bool) -> Result<()> {
    let store = open_session(config).await?;
    require_session(&store)?;

    let mut admin = AdminDashboard::new();
    // Users first, so stats and the filter header have names to show.
    admin.refresh(store.api()).await;
    match user {
        Some(id) => admin.view_user(store.api(), id).await,
        None => {
            admin
                .open_tab(store.api(), booksum_core::views::AdminTab::Summaries)
                .await
        }
    }
    if let Some(err) = admin.error.take() {
        bail!(err);
    }

    let visible = admin.visible_summaries();
    if json {
        println!("{}", serde_json::to_string_pretty(&visible)?);
        return Ok(());
    }

    let stats = admin.stats();
    println!(
        "  {} {}  {} {}  {} {}",
        "Users:".dimmed(),
        stats.total_users.to_string().cyan(),
        "Summaries:".dimmed(),
        stats.total_summaries.to_string().cyan(),
        "Avg/user:".dimmed(),
        stats.average_label().cyan(),
    );
    if let Some(id) = admin.selected_user {
        let name = admin
            .selected_username()
            .map(str::to_string)
            .unwrap_or_else(|| format!("user {id}"));
        println!("  {} {}", "Showing summaries for".dimmed(), name.yellow());
    }
    println!("{}", "─".repeat(78).dimmed());

    if visible.is_empty() {
        println!("No summaries found.");
        return Ok(());
    }
    for summary in &visible {
        print_summary_card(summary, ADMIN_PREVIEW_CHARS, true);
    }
    println!(
        "  {} summar{}",
        visible.len(),
        if visible.len() == 1 { "y" } else { "ies" }
    );
    Ok(())
}

async fn cmd_admin_user_summaries(config: &BooksumConfig, id: i64, json: bool) -> Result<()> {
    let store = open_session(config).await?;
    require_session(&store)?;

    let summaries = store
        .api()
        .admin_list_user_summaries(id)
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))
        .context(format!("failed to fetch summaries for user {id}"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }
    if summaries.is_empty() {
        println!("No summaries found.");
        return Ok(());
    }
    for summary in &summaries {
        print_summary_card(summary, ADMIN_PREVIEW_CHARS, false);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// route / status
// ---------------------------------------------------------------------------

async fn cmd_route(config: &BooksumConfig, path: &str) -> Result<()> {
    let route = Route::from_path(path).with_context(|| {
        let known: Vec<&str> = Route::ALL.iter().map(|r| r.path()).collect();
        format!("unknown path: {path} (expected one of {})", known.join(", "))
    })?;

    let store = open_session(config).await?;
    let state = store.state();
    let role = state
        .role()
        .map(|r| r.to_string())
        .unwrap_or_else(|| "loading".to_string());

    let mut hops = vec![route.path().to_string()];
    let mut current = route;
    while let Resolution::Redirect(next) = Gate::resolve(state, current) {
        hops.push(next.path().to_string());
        current = next;
        if hops.len() > Route::ALL.len() {
            break;
        }
    }

    println!("  {}  {}", "Role:".dimmed(), role.cyan());
    match Gate::settle(state, route) {
        Resolution::Render(r) => println!(
            "  {} {}  {}",
            "Shows:".dimmed(),
            r.path().green().bold(),
            hops.join(" → ").dimmed()
        ),
        Resolution::Loading => println!("  {} loading", "Shows:".dimmed()),
        Resolution::Redirect(r) => println!("  {} {}", "Redirects:".dimmed(), r.path()),
    }
    Ok(())
}

async fn cmd_status(config: &BooksumConfig) -> Result<()> {
    let version = env!("CARGO_PKG_VERSION");
    println!("{}", format!("Booksum Status v{version}").bold());
    println!("  {}    {}", "Version:".dimmed(), version);
    println!("  {}        {}", "API:".dimmed(), config.api.base_url);

    let token_path = config
        .token_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "unknown".to_string());
    println!("  {}    {}", "Session:".dimmed(), token_path);

    let store = open_session(config).await?;
    match store.state() {
        SessionState::Authenticated(session) => println!(
            "  {}  {} ({})",
            "Signed in:".dimmed(),
            session.user.username.green(),
            session.role()
        ),
        _ => println!("  {}  {}", "Signed in:".dimmed(), "no".yellow()),
    }

    println!(
        "  {}   {} / {} words",
        "Defaults:".dimmed(),
        config.summary.summary_type().label(),
        config.summary.summary_length()
    );
    println!("  {}  {}", "Downloads:".dimmed(), config.download_dir().display());

    let config_path = dirs::config_dir()
        .map(|p| p.join("booksum").join("config.toml"))
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "unknown".to_string());
    println!("  {}     {}", "Config:".dimmed(), config_path);
    Ok(())
}
