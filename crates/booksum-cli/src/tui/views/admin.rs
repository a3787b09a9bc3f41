use booksum_core::views::format::{format_timestamp, preview, ADMIN_PREVIEW_CHARS};
use booksum_core::views::AdminTab;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use super::dashboard::render_header;
use crate::tui::{
    app::App,
    widgets::{
        help_bar::{HelpBar, HelpContext},
        tab_bar::TabBar,
    },
};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let layout = Layout::vertical([
        Constraint::Length(1), // Header
        Constraint::Length(3), // Stats
        Constraint::Length(1), // Tabs
        Constraint::Min(5),    // Table
        Constraint::Length(1), // Error
        Constraint::Length(1), // Help bar
    ])
    .split(area);

    render_header(frame, app, layout[0]);
    render_stats(frame, app, layout[1]);

    let selected = match app.admin.tab {
        AdminTab::Users => 0,
        AdminTab::Summaries => 1,
    };
    frame.render_widget(
        TabBar {
            labels: &["Users", "All Summaries"],
            selected,
        },
        layout[2],
    );

    if app.admin.loading {
        let loading = Line::from(vec![Span::styled(
            "  Loading...",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )]);
        frame.render_widget(loading, layout[3]);
    } else {
        match app.admin.tab {
            AdminTab::Users => render_users(frame, app, layout[3]),
            AdminTab::Summaries => render_summaries(frame, app, layout[3]),
        }
    }

    if let Some(ref err) = app.admin.error {
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(format!(" ✗ {err}"), Style::default().fg(Color::Red)),
                Span::styled("  (Esc to dismiss)", Style::default().fg(Color::DarkGray)),
            ])),
            layout[4],
        );
    }

    let context = match app.admin.tab {
        AdminTab::Users => HelpContext::AdminUsers,
        AdminTab::Summaries => HelpContext::AdminSummaries,
    };
    frame.render_widget(HelpBar { context }, layout[5]);
}

fn render_stats(frame: &mut Frame, app: &App, area: Rect) {
    let stats = app.admin.stats();
    let cards = [
        ("Total Users", stats.total_users.to_string()),
        ("Total Summaries", stats.total_summaries.to_string()),
        ("Avg per User", stats.average_label()),
    ];
    let areas = Layout::horizontal([Constraint::Ratio(1, 3); 3]).split(area);
    for ((label, value), card) in cards.into_iter().zip(areas.iter()) {
        let line = Line::from(vec![
            Span::styled(
                value,
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {label}"), Style::default().fg(Color::DarkGray)),
        ]);
        frame.render_widget(
            Paragraph::new(line).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            ),
            *card,
        );
    }
}

fn header_row(labels: &[&'static str]) -> Row<'static> {
    Row::new(labels.iter().map(|l| Cell::from(*l)).collect::<Vec<_>>())
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .bottom_margin(1)
}

fn highlight() -> Style {
    Style::default()
        .bg(Color::Indexed(236))
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

fn render_users(frame: &mut Frame, app: &App, area: Rect) {
    let users = &app.admin.users;
    if users.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "  No users found.",
                Style::default().fg(Color::DarkGray),
            )),
            area,
        );
        return;
    }

    let rows: Vec<Row> = users
        .iter()
        .map(|u| {
            let (role, role_color) = if u.is_admin {
                ("admin", Color::Yellow)
            } else {
                ("user", Color::Green)
            };
            Row::new(vec![
                Cell::from(Span::styled(u.id.to_string(), Style::default().fg(Color::Cyan))),
                Cell::from(u.username.clone()),
                Cell::from(Span::styled(u.email.clone(), Style::default().fg(Color::Gray))),
                Cell::from(Span::styled(role, Style::default().fg(role_color))),
                Cell::from(Span::styled(
                    format_timestamp(&u.created_at),
                    Style::default().fg(Color::DarkGray),
                )),
                Cell::from(u.summary_count.to_string()),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(5),
        Constraint::Length(16),
        Constraint::Min(20),
        Constraint::Length(6),
        Constraint::Length(22),
        Constraint::Length(9),
    ];

    let table = Table::new(rows, widths)
        .header(header_row(&["ID", "Username", "Email", "Role", "Joined", "Summaries"]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(format!(" Users ({}) ", users.len())),
        )
        .row_highlight_style(highlight())
        .highlight_symbol("▸ ");

    let mut state = TableState::default();
    state.select(Some(app.admin_selected));
    frame.render_stateful_widget(table, area, &mut state);
}

fn render_summaries(frame: &mut Frame, app: &App, area: Rect) {
    let visible = app.admin.visible_summaries();

    let title = match (app.admin.selected_user, app.admin.selected_username()) {
        (Some(_), Some(name)) => format!(" Summaries by {name} ({}) · a show all ", visible.len()),
        (Some(id), None) => format!(" Summaries by user #{id} ({}) · a show all ", visible.len()),
        (None, _) => format!(" All Summaries ({}) ", visible.len()),
    };

    if visible.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "  No summaries found.",
                Style::default().fg(Color::DarkGray),
            ))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray))
                    .title(title),
            ),
            area,
        );
        return;
    }

    let rows: Vec<Row> = visible
        .iter()
        .map(|s| {
            Row::new(vec![
                Cell::from(Span::styled(
                    s.username.clone(),
                    Style::default().fg(Color::Cyan),
                )),
                Cell::from(Span::styled(
                    format_timestamp(&s.created_at),
                    Style::default().fg(Color::DarkGray),
                )),
                Cell::from(Span::styled(
                    s.summary_type.label(),
                    Style::default().fg(Color::Magenta),
                )),
                Cell::from(s.word_count.to_string()),
                Cell::from(preview(&s.summary_text, ADMIN_PREVIEW_CHARS).replace('\n', " ")),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(14),
        Constraint::Length(22),
        Constraint::Length(14),
        Constraint::Length(6),
        Constraint::Min(20),
    ];

    let table = Table::new(rows, widths)
        .header(header_row(&["User", "Created", "Type", "Words", "Preview"]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(title),
        )
        .row_highlight_style(highlight())
        .highlight_symbol("▸ ");

    let mut state = TableState::default();
    state.select(Some(app.admin_selected));
    frame.render_stateful_widget(table, area, &mut state);
}
