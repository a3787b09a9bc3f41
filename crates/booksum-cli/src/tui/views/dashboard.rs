use booksum_core::model::{SummaryLength, SummaryType};
use booksum_core::views::format::{
    format_timestamp, preview, word_count_label, HISTORY_PREVIEW_CHARS,
};
use booksum_core::views::DashboardTab;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use crate::tui::{
    app::{App, CreateFocus},
    widgets::{
        help_bar::{HelpBar, HelpContext},
        tab_bar::TabBar,
        text_input::TextInput,
    },
};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let layout = Layout::vertical([
        Constraint::Length(1), // Header
        Constraint::Length(1), // Tabs
        Constraint::Min(8),    // Body
        Constraint::Length(1), // Error
        Constraint::Length(1), // Help bar
    ])
    .split(area);

    render_header(frame, app, layout[0]);

    let selected = match app.dashboard.tab {
        DashboardTab::Create => 0,
        DashboardTab::History => 1,
    };
    frame.render_widget(
        TabBar {
            labels: &["Create Summary", "My Summaries"],
            selected,
        },
        layout[1],
    );

    match app.dashboard.tab {
        DashboardTab::Create => render_create(frame, app, layout[2]),
        DashboardTab::History => render_history(frame, app, layout[2]),
    }

    if let Some(ref err) = app.dashboard.error {
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(format!(" ✗ {err}"), Style::default().fg(Color::Red)),
                Span::styled("  (Esc to dismiss)", Style::default().fg(Color::DarkGray)),
            ])),
            layout[3],
        );
    }

    let context = match app.dashboard.tab {
        DashboardTab::Create => HelpContext::Create,
        DashboardTab::History => HelpContext::History,
    };
    frame.render_widget(HelpBar { context }, layout[4]);
}

/// Avatar letter, username and role badge.
pub(super) fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let Some(user) = app.session.user() else {
        return;
    };
    let mut spans = vec![
        Span::styled(
            " 📖 Book Summarizer  ",
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {} ", user.initial()),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(user.username.clone(), Style::default().add_modifier(Modifier::BOLD)),
    ];
    if user.is_admin {
        spans.push(Span::styled(" admin", Style::default().fg(Color::Yellow)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Magenta)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn render_create(frame: &mut Frame, app: &App, area: Rect) {
    let [form_area, result_area] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(area);

    let form = Layout::vertical([
        Constraint::Min(5),    // Text
        Constraint::Length(3), // File
        Constraint::Length(3), // Options
    ])
    .split(form_area);

    let dash = &app.dashboard;

    // Text area
    let text_focused = app.create_focus == CreateFocus::Text;
    let text = dash.input.text();
    let body = if text.is_empty() && !text_focused {
        Paragraph::new(Span::styled(
            "Paste your book text here...",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        let mut shown = text.to_string();
        if text_focused {
            shown.push('▏');
        }
        Paragraph::new(shown).wrap(Wrap { trim: false })
    };
    frame.render_widget(
        body.block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(focus_style(text_focused))
                .title(" Paste Text "),
        ),
        form[0],
    );

    // File picker
    let file_label = match dash.input.file() {
        Some(file) => format!("File: {} (Del to clear)", file.file_name),
        None => "Or upload a TXT/PDF file (path + Enter)".to_string(),
    };
    frame.render_widget(
        TextInput::new(&file_label, &app.file_path, app.create_focus == CreateFocus::File)
            .placeholder("~/books/chapter-one.pdf"),
        form[1],
    );

    // Options
    let [type_area, length_area] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
            .areas(form[2]);
    let type_labels: Vec<&str> = SummaryType::ALL.iter().map(|t| t.label()).collect();
    let type_line = option_line(
        &type_labels,
        SummaryType::ALL
            .iter()
            .position(|t| *t == dash.summary_type)
            .unwrap_or(0),
    );
    frame.render_widget(
        Paragraph::new(type_line).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(focus_style(app.create_focus == CreateFocus::Type))
                .title(" Summary Type "),
        ),
        type_area,
    );

    let length_labels: Vec<String> = SummaryLength::ALL
        .iter()
        .map(|l| format!("{} words", l.words()))
        .collect();
    let length_refs: Vec<&str> = length_labels.iter().map(String::as_str).collect();
    let length_line = option_line(
        &length_refs,
        SummaryLength::ALL
            .iter()
            .position(|l| *l == dash.summary_length)
            .unwrap_or(1),
    );
    frame.render_widget(
        Paragraph::new(length_line).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(focus_style(app.create_focus == CreateFocus::Length))
                .title(" Length "),
        ),
        length_area,
    );

    // Result panel
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Your Summary ");
    let lines: Vec<Line> = if dash.submitting {
        vec![Line::from(Span::styled(
            "Generating summary...",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ))]
    } else if let Some(ref created) = dash.current {
        let mut lines = vec![
            Line::from(vec![
                Span::styled(
                    created.summary_type.label(),
                    Style::default().fg(Color::Magenta),
                ),
                Span::styled(
                    format!("  ·  {}", word_count_label(created.word_count)),
                    Style::default().fg(Color::DarkGray),
                ),
            ]),
            Line::from(""),
        ];
        lines.extend(created.summary.lines().map(|l| Line::from(l.to_string())));
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Ctrl+D", Style::default().fg(Color::Cyan)),
            Span::styled(" TXT  ", Style::default().fg(Color::DarkGray)),
            Span::styled("Ctrl+P", Style::default().fg(Color::Cyan)),
            Span::styled(" PDF", Style::default().fg(Color::DarkGray)),
        ]));
        lines
    } else {
        vec![Line::from(Span::styled(
            "Your summary will appear here. Press Ctrl+S to generate.",
            Style::default().fg(Color::DarkGray),
        ))]
    };
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(block),
        result_area,
    );
}

fn option_line<'a>(labels: &[&'a str], selected: usize) -> Line<'a> {
    let mut spans = Vec::new();
    for (i, label) in labels.iter().enumerate() {
        let style = if i == selected {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Magenta)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {label} "), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

fn render_history(frame: &mut Frame, app: &App, area: Rect) {
    let dash = &app.dashboard;

    if dash.history_loading {
        let loading = Line::from(vec![Span::styled(
            "  Loading...",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )]);
        frame.render_widget(loading, area);
        return;
    }

    if dash.history.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "  No summaries yet. Create your first one on the Create Summary tab.",
                Style::default().fg(Color::DarkGray),
            )),
            area,
        );
        return;
    }

    let [table_area, detail_area] =
        Layout::vertical([Constraint::Percentage(55), Constraint::Percentage(45)]).areas(area);

    let header = Row::new(vec![
        Cell::from("Created"),
        Cell::from("Type"),
        Cell::from("Words"),
        Cell::from("Preview"),
    ])
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
    .bottom_margin(1);

    let rows: Vec<Row> = dash
        .history
        .iter()
        .map(|s| {
            Row::new(vec![
                Cell::from(Span::styled(
                    format_timestamp(&s.created_at),
                    Style::default().fg(Color::DarkGray),
                )),
                Cell::from(Span::styled(
                    s.summary_type.label(),
                    Style::default().fg(Color::Magenta),
                )),
                Cell::from(s.word_count.to_string()),
                Cell::from(preview(&s.summary_text, HISTORY_PREVIEW_CHARS).replace('\n', " ")),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(22),
        Constraint::Length(14),
        Constraint::Length(6),
        Constraint::Min(20),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(format!(" My Summaries ({}) ", dash.history.len())),
        )
        .row_highlight_style(
            Style::default()
                .bg(Color::Indexed(236))
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸ ");

    let mut state = TableState::default();
    state.select(Some(app.history_selected));
    frame.render_stateful_widget(table, table_area, &mut state);

    if let Some(summary) = dash.history.get(app.history_selected) {
        let detail = Paragraph::new(summary.summary_text.as_str())
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray))
                    .title(format!(" {} ", word_count_label(summary.word_count))),
            );
        frame.render_widget(detail, detail_area);
    }
}
