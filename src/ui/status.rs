//! Status bar and commands bar rendering.

use ratatui::{
    layout::Rect,
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::notify::NoticeLevel;

use super::colors;

/// Draws the commands bar showing available actions for the current screen.
pub fn draw_commands_bar(frame: &mut Frame, area: Rect, app: &App) {
    let commands = commands_for(app.show_help, app.form.state().submitted);

    let mut spans: Vec<Span> = vec![Span::styled(" ", Style::default())];

    for (i, (key, desc)) in commands.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" │ ", Style::default().fg(colors::BORDER)));
        }
        spans.push(Span::styled(*key, Style::default().fg(colors::KEY).bold()));
        spans.push(Span::styled(" ", Style::default()));
        spans.push(Span::styled(*desc, Style::default().fg(colors::MUTED)));
    }

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(colors::BORDER));

    let commands_widget = Paragraph::new(Line::from(spans)).block(block);

    frame.render_widget(commands_widget, area);
}

/// Returns the list of commands available on a screen.
fn commands_for(show_help: bool, submitted: bool) -> Vec<(&'static str, &'static str)> {
    if show_help {
        return vec![("any key", "close help")];
    }
    if submitted {
        return vec![
            ("Enter", "new message"),
            ("F2", "quality"),
            ("F1", "help"),
            ("Ctrl+C", "quit"),
        ];
    }
    vec![
        ("Tab", "next"),
        ("S-Tab", "prev"),
        ("←/→", "choose"),
        ("Ctrl+S", "send"),
        ("Ctrl+V", "paste"),
        ("F2", "quality"),
        ("F1", "help"),
        ("Ctrl+C", "quit"),
    ]
}

/// Draws the status bar at the bottom (for notices).
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let (text, style) = if let Some(notice) = app.toasts.current() {
        let color = match notice.level {
            NoticeLevel::Info => colors::PRIMARY,
            NoticeLevel::Success => colors::SUCCESS,
            NoticeLevel::Warning => colors::WARNING,
            NoticeLevel::Error => colors::ERROR,
        };
        (format!(" {} ", notice.text), Style::default().fg(color))
    } else {
        (" Ready".to_string(), Style::default().fg(colors::MUTED))
    };

    let status = Paragraph::new(text).style(style);
    frame.render_widget(status, area);
}
