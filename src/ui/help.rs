//! Help overlay rendering.

use ratatui::{
    style::{Color, Style, Stylize},
    symbols,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::constants::dialog;

use super::colors;
use super::utils::centered_rect;

/// Key bindings per help section.
const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "EDITING",
        &[
            ("Tab / Down", "Next field"),
            ("S-Tab / Up", "Previous field"),
            ("Enter", "Next field, sends from the message"),
            ("Left / Right", "Choose a project type"),
            ("Backspace", "Delete last character"),
            ("Ctrl+V", "Paste from clipboard"),
        ],
    ),
    (
        "SENDING",
        &[
            ("Ctrl+S", "Validate and send the message"),
            ("Esc", "Dismiss the error banner"),
            ("Ctrl+N", "Start a new message after sending"),
        ],
    ),
    (
        "GENERAL",
        &[
            ("F2", "Cycle rendering quality"),
            ("F1", "Show this help"),
            ("Ctrl+C", "Quit application"),
        ],
    ),
];

/// Draws a help overlay popup.
pub fn draw_help_overlay(frame: &mut Frame) {
    let area = centered_rect(dialog::HELP_WIDTH, dialog::HELP_HEIGHT, frame.area());

    // Clear the background
    frame.render_widget(Clear, area);

    let help = Paragraph::new(help_text())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors::PRIMARY))
                .border_set(symbols::border::DOUBLE)
                .title(Line::from(vec![
                    Span::styled(" Help ", Style::default().fg(Color::White).bold()),
                    Span::styled(
                        "- Press any key to close ",
                        Style::default().fg(colors::MUTED),
                    ),
                ])),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(help, area);
}

/// Returns the help text content.
fn help_text() -> Text<'static> {
    let key_style = Style::default().fg(colors::KEY).bold();
    let desc_style = Style::default().fg(Color::White);
    let section_style = Style::default().fg(colors::PRIMARY).bold();

    let mut lines = vec![Line::from("")];
    for (title, bindings) in SECTIONS {
        lines.push(Line::from(vec![
            Span::styled("  ◆ ", section_style),
            Span::styled(*title, section_style),
        ]));
        lines.push(Line::from(""));
        for (key, desc) in *bindings {
            lines.push(Line::from(vec![
                Span::styled("    ", Style::default()),
                Span::styled(format!("{key:<14}"), key_style),
                Span::styled(*desc, desc_style),
            ]));
        }
        lines.push(Line::from(""));
    }
    Text::from(lines)
}
