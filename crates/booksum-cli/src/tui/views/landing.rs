use booksum_core::views::landing::{BADGE, FEATURES, HEADLINE, PITCH, PRODUCT_NAME, STEPS};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::{
    app::{App, LANDING_ACTIONS},
    widgets::help_bar::{HelpBar, HelpContext},
};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let layout = Layout::vertical([
        Constraint::Length(1), // Nav
        Constraint::Length(7), // Hero
        Constraint::Min(8),    // Features + steps
        Constraint::Length(3), // Calls to action
        Constraint::Length(1), // Help bar
    ])
    .split(area);

    // Nav
    let nav = Line::from(vec![
        Span::styled(
            format!(" 📖 {PRODUCT_NAME}"),
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("   l sign in · r get started", Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(nav), layout[0]);

    // Hero
    let hero = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("✨ {BADGE}"),
            Style::default().fg(Color::Yellow),
        ))
        .centered(),
        Line::from(Span::styled(
            HEADLINE[0],
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .centered(),
        Line::from(Span::styled(
            HEADLINE[1],
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ))
        .centered(),
        Line::from(""),
        Line::from(Span::styled(PITCH, Style::default().fg(Color::DarkGray))).centered(),
    ];
    frame.render_widget(Paragraph::new(hero).wrap(Wrap { trim: true }), layout[1]);

    // Features and steps side by side
    let [features_area, steps_area] =
        Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)])
            .areas(layout[2]);

    let mut feature_lines = Vec::new();
    for feature in FEATURES {
        feature_lines.push(Line::from(Span::styled(
            format!("• {}", feature.title),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));
        feature_lines.push(Line::from(Span::styled(
            format!("  {}", feature.description),
            Style::default().fg(Color::Gray),
        )));
    }
    let features = Paragraph::new(feature_lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Why Choose Us "),
        );
    frame.render_widget(features, features_area);

    let mut step_lines = Vec::new();
    for step in STEPS {
        step_lines.push(Line::from(vec![
            Span::styled(
                format!(" {} ", step.number),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" {}", step.title),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]));
        step_lines.push(Line::from(Span::styled(
            format!("    {}", step.description),
            Style::default().fg(Color::Gray),
        )));
        step_lines.push(Line::from(""));
    }
    let steps = Paragraph::new(step_lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" How It Works "),
        );
    frame.render_widget(steps, steps_area);

    // Calls to action
    let mut buttons = Vec::new();
    for (i, action) in LANDING_ACTIONS.iter().enumerate() {
        let style = if i == app.landing_action {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Magenta)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Magenta)
        };
        buttons.push(Span::styled(format!("  {}  ", action.label()), style));
        buttons.push(Span::raw("   "));
    }
    let cta = Paragraph::new(vec![Line::from(""), Line::from(buttons).centered()]);
    frame.render_widget(cta, layout[3]);

    frame.render_widget(
        HelpBar {
            context: HelpContext::Landing,
        },
        layout[4],
    );
}
