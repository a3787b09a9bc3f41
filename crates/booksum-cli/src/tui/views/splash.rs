use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const LOGO: &[&str] = &[
    r" _                 _                      ",
    r"| |__   ___   ___ | | _____ _   _ _ __ ___  ",
    r"| '_ \ / _ \ / _ \| |/ / __| | | | '_ ` _ \ ",
    r"| |_) | (_) | (_) |   <\__ \ |_| | | | | | |",
    r"|_.__/ \___/ \___/|_|\_\___/\__,_|_| |_| |_|",
];

pub fn render(frame: &mut Frame, area: Rect, api_url: &str, checking: bool) {
    let block_height = LOGO.len() as u16 + 8;
    let block_width = 50;

    let [center_y] = Layout::vertical([Constraint::Length(block_height)])
        .flex(Flex::Center)
        .areas(area);
    let [center] = Layout::horizontal([Constraint::Length(block_width)])
        .flex(Flex::Center)
        .areas(center_y);

    let mut lines: Vec<Line> = Vec::new();

    for row in LOGO {
        lines.push(Line::from(Span::styled(
            *row,
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "       Stop drowning in pages.",
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::from(""));

    lines.push(Line::from(vec![
        Span::styled("    backend ", Style::default().fg(Color::DarkGray)),
        Span::styled(api_url, Style::default().fg(Color::Magenta)),
    ]));

    lines.push(Line::from(""));

    if checking {
        lines.push(Line::from(Span::styled(
            "          Checking session...",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "                Ready",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )));
    }

    frame.render_widget(Paragraph::new(lines), center);
}
