//! Contact form rendering.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::constants::layout;
use crate::form::{FieldKind, FieldSpec, CONTACT_FIELDS};

use super::colors;
use super::utils::tail_to_width;

/// Block cursor character for input fields.
pub(crate) const BLOCK_CURSOR: &str = "█";

/// Input field prompt indicator.
pub(crate) const INPUT_INDICATOR: &str = "› ";

/// Draws the contact form, with the error banner on top when present.
pub fn draw_contact_form(frame: &mut Frame, area: Rect, app: &App) {
    let state = app.form.state();
    let banner = state.submit_error.is_some() || state.submitting;

    let mut constraints = Vec::with_capacity(CONTACT_FIELDS.len() + 1);
    if banner {
        constraints.push(Constraint::Length(3));
    }
    for spec in CONTACT_FIELDS {
        constraints.push(match spec.kind {
            FieldKind::Multiline => Constraint::Min(layout::MESSAGE_MIN_HEIGHT),
            _ => Constraint::Length(layout::FIELD_HEIGHT),
        });
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .horizontal_margin(1)
        .split(area);

    let mut areas = chunks.iter();
    if banner {
        if let Some(banner_area) = areas.next() {
            draw_banner(frame, *banner_area, app);
        }
    }

    for (index, (spec, field_area)) in CONTACT_FIELDS.iter().zip(areas).enumerate() {
        draw_field(frame, *field_area, app, spec, index == app.focused);
    }
}

/// Submission banner: sending indicator or the dismissible error.
fn draw_banner(frame: &mut Frame, area: Rect, app: &App) {
    let state = app.form.state();

    let (line, color) = if state.submitting {
        (
            Line::from(vec![
                Span::styled(" ◈ ", Style::default().fg(colors::WARNING)),
                Span::styled("Sending your message...", Style::default().fg(Color::White)),
            ]),
            colors::WARNING,
        )
    } else {
        let error = state.submit_error.as_deref().unwrap_or_default();
        (
            Line::from(vec![
                Span::styled(" ✖ ", Style::default().fg(colors::ERROR).bold()),
                Span::styled(error.to_string(), Style::default().fg(Color::White)),
                Span::styled("  Esc", Style::default().fg(colors::KEY).bold()),
                Span::styled(" dismiss  ", Style::default().fg(colors::MUTED)),
                Span::styled("Ctrl+S", Style::default().fg(colors::KEY).bold()),
                Span::styled(" retry", Style::default().fg(colors::MUTED)),
            ]),
            colors::ERROR,
        )
    };

    let widget = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color)),
    );
    frame.render_widget(widget, area);
}

/// Draws one field: label and counter on the top border, error on the bottom.
fn draw_field(frame: &mut Frame, area: Rect, app: &App, spec: &FieldSpec, focused: bool) {
    let error = app.form.error(spec.name);
    let required = app
        .form
        .rules()
        .get(spec.name)
        .is_some_and(|rule| rule.required);

    let border_color = if error.is_some() {
        colors::ERROR
    } else if focused {
        colors::PRIMARY
    } else {
        colors::BORDER
    };

    let mut title = vec![
        Span::styled(" ", Style::default()),
        Span::styled(
            spec.label,
            Style::default()
                .fg(if focused { colors::PRIMARY } else { Color::White })
                .bold(),
        ),
    ];
    if required {
        title.push(Span::styled(" *", Style::default().fg(colors::KEY)));
    }
    title.push(Span::styled(" ", Style::default()));

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(Line::from(title))
        .padding(Padding::horizontal(1));

    if spec.kind == FieldKind::Multiline {
        let max = app
            .form
            .rules()
            .get(spec.name)
            .and_then(|rule| rule.max_length)
            .unwrap_or_default();
        block = block.title_top(
            Line::from(Span::styled(
                format!(" {}/{} ", app.form.state().char_count, max),
                Style::default().fg(colors::MUTED),
            ))
            .right_aligned(),
        );
    }

    if let Some(message) = error {
        block = block.title_bottom(Line::from(vec![
            Span::styled(" ✖ ", Style::default().fg(colors::ERROR)),
            Span::styled(message.to_string(), Style::default().fg(colors::ERROR)),
            Span::styled(" ", Style::default()),
        ]));
    }

    let value = if focused {
        app.draft.as_str()
    } else {
        app.form.value(spec.name)
    };

    let content = field_content(spec, value, focused, usize::from(area.width.saturating_sub(6)));
    let mut paragraph = Paragraph::new(content).block(block);
    if spec.kind == FieldKind::Multiline {
        paragraph = paragraph.wrap(Wrap { trim: false });
    }

    frame.render_widget(paragraph, area);
}

/// Builds the visible text of a field.
fn field_content(spec: &FieldSpec, value: &str, focused: bool, width: usize) -> Line<'static> {
    let mut spans = Vec::new();

    if focused {
        spans.push(Span::styled(INPUT_INDICATOR, Style::default().fg(colors::MUTED)));
    }

    match spec.kind {
        FieldKind::Choice(_) => {
            if value.is_empty() {
                spans.push(Span::styled(spec.placeholder, Style::default().fg(colors::MUTED)));
            } else {
                spans.push(Span::styled("◂ ", Style::default().fg(colors::KEY)));
                spans.push(Span::styled(
                    value.to_string(),
                    Style::default().fg(colors::SECONDARY).bold(),
                ));
                spans.push(Span::styled(" ▸", Style::default().fg(colors::KEY)));
            }
            return Line::from(spans);
        }
        FieldKind::Text => {
            if value.is_empty() && !focused {
                spans.push(Span::styled(spec.placeholder, Style::default().fg(colors::MUTED)));
            } else {
                spans.push(Span::styled(
                    tail_to_width(value, width).to_string(),
                    Style::default().fg(Color::White),
                ));
            }
        }
        FieldKind::Multiline => {
            if value.is_empty() && !focused {
                spans.push(Span::styled(spec.placeholder, Style::default().fg(colors::MUTED)));
            } else {
                spans.push(Span::styled(value.to_string(), Style::default().fg(Color::White)));
            }
        }
    }

    if focused {
        spans.push(Span::styled(
            BLOCK_CURSOR,
            Style::default()
                .fg(colors::PRIMARY)
                .add_modifier(Modifier::SLOW_BLINK),
        ));
    }

    Line::from(spans)
}
