//! Dialog rendering (submission confirmation).

use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    symbols,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
    Frame,
};

use crate::constants::dialog;

use super::colors;
use super::utils::centered_rect;

/// Draws the confirmation shown after a successful submit.
pub fn draw_submitted_dialog(frame: &mut Frame, area: Rect) {
    let area = centered_rect(dialog::CONFIRM_WIDTH, dialog::CONFIRM_HEIGHT, area);

    // Clear the background
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::SUCCESS))
        .border_set(symbols::border::DOUBLE)
        .title(Line::from(vec![
            Span::styled(" ", Style::default()),
            Span::styled("✔", Style::default().fg(colors::SUCCESS)),
            Span::styled(" Message Sent ", Style::default().fg(Color::White).bold()),
        ]))
        .padding(Padding::uniform(1));

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Thanks for reaching out!",
            Style::default().fg(colors::SECONDARY).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Your message is on its way. Expect a reply within a couple of days.",
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("  ", Style::default()),
            Span::styled("Enter", Style::default().fg(colors::KEY).bold()),
            Span::styled(" new message  ", Style::default().fg(colors::MUTED)),
            Span::styled("Ctrl+C", Style::default().fg(colors::KEY).bold()),
            Span::styled(" quit", Style::default().fg(colors::MUTED)),
        ]),
    ];

    let widget = Paragraph::new(content)
        .wrap(Wrap { trim: false })
        .block(block);

    frame.render_widget(widget, area);
}
