use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// Which key set the bottom bar should describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpContext {
    Landing,
    Login,
    Register,
    Create,
    History,
    AdminUsers,
    AdminSummaries,
}

/// Bottom help bar showing context-sensitive key bindings.
pub struct HelpBar {
    pub context: HelpContext,
}

impl Widget for HelpBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = Style::default().fg(Color::DarkGray);
        let key_style = Style::default().fg(Color::Cyan);

        let keys: &[(&str, &str)] = match self.context {
            HelpContext::Landing => &[
                ("←/→", "choose"),
                ("Enter", "go"),
                ("l", "sign in"),
                ("r", "get started"),
                ("q", "quit"),
            ],
            HelpContext::Login => &[
                ("Tab", "next field"),
                ("Enter", "sign in"),
                ("Ctrl+R", "register"),
                ("Esc", "back"),
            ],
            HelpContext::Register => &[
                ("Tab", "next field"),
                ("Space", "toggle admin"),
                ("Ctrl+S", "create account"),
                ("Ctrl+L", "sign in"),
                ("Esc", "back"),
            ],
            HelpContext::Create => &[
                ("Tab", "next field"),
                ("←/→", "change option"),
                ("Ctrl+S", "summarize"),
                ("Ctrl+D/P", "save txt/pdf"),
                ("Ctrl+T", "history"),
                ("Ctrl+X", "logout"),
            ],
            HelpContext::History => &[
                ("j/k", "navigate"),
                ("t/p", "save txt/pdf"),
                ("r", "refresh"),
                ("Ctrl+T", "create"),
                ("Ctrl+X", "logout"),
                ("q", "quit"),
            ],
            HelpContext::AdminUsers => &[
                ("j/k", "navigate"),
                ("Enter", "view summaries"),
                ("Tab", "summaries"),
                ("r", "refresh"),
                ("Ctrl+X", "logout"),
                ("q", "quit"),
            ],
            HelpContext::AdminSummaries => &[
                ("j/k", "navigate"),
                ("t/p", "save txt/pdf"),
                ("a", "show all"),
                ("Tab", "users"),
                ("r", "refresh"),
                ("Ctrl+X", "logout"),
                ("q", "quit"),
            ],
        };

        let mut spans: Vec<Span> = Vec::new();
        for (i, (key, label)) in keys.iter().enumerate() {
            spans.push(Span::styled(*key, key_style));
            let sep = if i + 1 < keys.len() { "  " } else { "" };
            spans.push(Span::styled(format!(" {label}{sep}"), style));
        }

        let line = Line::from(spans);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
