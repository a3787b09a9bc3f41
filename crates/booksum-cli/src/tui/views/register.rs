use booksum_core::views::auth::MIN_PASSWORD_LEN;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::login::{card_area, status_line};
use crate::tui::{
    app::{App, REGISTER_FIELDS},
    widgets::{
        help_bar::{HelpBar, HelpContext},
        text_input::TextInput,
    },
};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let (card, help) = card_area(area, 21);
    let form = &app.register;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta))
        .title(" Create Account ")
        .title_bottom(Line::from(" Start summarizing books today ").centered());
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let rows = Layout::vertical([
        Constraint::Length(3), // Username
        Constraint::Length(3), // Email
        Constraint::Length(3), // Password
        Constraint::Length(3), // Confirm
        Constraint::Length(1), // Admin toggle
        Constraint::Length(2), // Status
        Constraint::Min(1),    // Login link
    ])
    .split(inner);

    let password_hint = format!("At least {MIN_PASSWORD_LEN} characters");
    frame.render_widget(
        TextInput::new("Username", &form.username, app.register_field == 0)
            .placeholder("Choose a username"),
        rows[0],
    );
    frame.render_widget(
        TextInput::new("Email", &form.email, app.register_field == 1)
            .placeholder("you@example.com"),
        rows[1],
    );
    frame.render_widget(
        TextInput::new("Password", &form.password, app.register_field == 2)
            .masked()
            .placeholder(&password_hint),
        rows[2],
    );
    frame.render_widget(
        TextInput::new("Confirm Password", &form.confirm_password, app.register_field == 3)
            .masked()
            .placeholder("Repeat your password"),
        rows[3],
    );

    let toggle_focused = app.register_field == REGISTER_FIELDS - 1;
    let checkbox = if form.is_admin { "[x]" } else { "[ ]" };
    let toggle_style = if toggle_focused {
        Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(format!(" {checkbox} "), toggle_style),
            Span::styled("Register as Admin", toggle_style),
        ])),
        rows[4],
    );

    let status = status_line(form.error.as_deref(), form.loading, "Creating account...");
    frame.render_widget(Paragraph::new(status).wrap(Wrap { trim: true }), rows[5]);

    let link = Line::from(vec![
        Span::styled("Already have an account? ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            "Ctrl+L",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" to sign in", Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(link), rows[6]);

    frame.render_widget(
        HelpBar {
            context: HelpContext::Register,
        },
        help,
    );
}
