use booksum_core::views::auth::DEMO_CREDENTIALS;
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::{
    app::App,
    widgets::{
        help_bar::{HelpBar, HelpContext},
        text_input::TextInput,
    },
};

/// Centered box for the auth forms, leaving the last row for the help bar.
pub(super) fn card_area(area: Rect, height: u16) -> (Rect, Rect) {
    let [body, help] = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);
    let [card] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(body);
    let [card] = Layout::horizontal([Constraint::Length(56)])
        .flex(Flex::Center)
        .areas(card);
    (card, help)
}

/// Inline error or in-flight status under a form.
pub(super) fn status_line(error: Option<&str>, loading: bool, loading_label: &str) -> Line<'static> {
    if loading {
        Line::from(Span::styled(
            loading_label.to_string(),
            Style::default().fg(Color::Yellow),
        ))
    } else if let Some(err) = error {
        Line::from(Span::styled(
            format!("✗ {err}"),
            Style::default().fg(Color::Red),
        ))
    } else {
        Line::from("")
    }
}

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let (card, help) = card_area(area, 16);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta))
        .title(" Welcome Back ")
        .title_bottom(Line::from(" Sign in to continue summarizing ").centered());
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let rows = Layout::vertical([
        Constraint::Length(3), // Username
        Constraint::Length(3), // Password
        Constraint::Length(2), // Status
        Constraint::Length(2), // Register link
        Constraint::Min(2),    // Demo credentials
    ])
    .split(inner);

    frame.render_widget(
        TextInput::new("Username", &app.login.username, app.login_field == 0)
            .placeholder("Enter your username"),
        rows[0],
    );
    frame.render_widget(
        TextInput::new("Password", &app.login.password, app.login_field == 1)
            .masked()
            .placeholder("Enter your password"),
        rows[1],
    );

    let status = status_line(app.login.error.as_deref(), app.login.loading, "Signing in...");
    frame.render_widget(Paragraph::new(status).wrap(Wrap { trim: true }), rows[2]);

    let link = Line::from(vec![
        Span::styled("Don't have an account? ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            "Ctrl+R",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" to sign up", Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(link), rows[3]);

    let (user, password) = DEMO_CREDENTIALS;
    let demo = vec![
        Line::from(Span::styled("Demo credentials", Style::default().fg(Color::DarkGray))),
        Line::from(vec![
            Span::styled("  username ", Style::default().fg(Color::DarkGray)),
            Span::styled(user, Style::default().fg(Color::Magenta)),
            Span::styled("  password ", Style::default().fg(Color::DarkGray)),
            Span::styled(password, Style::default().fg(Color::Magenta)),
        ]),
    ];
    frame.render_widget(Paragraph::new(demo), rows[4]);

    frame.render_widget(
        HelpBar {
            context: HelpContext::Login,
        },
        help,
    );
}
