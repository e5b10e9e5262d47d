//! UI rendering module.
//!
//! This module handles all the terminal UI rendering using Ratatui.
//! Each part of the screen is rendered by a separate submodule.

mod colors;
mod dialogs;
mod form;
mod header;
mod help;
mod status;
mod utils;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::app::App;
use crate::constants::layout;

use dialogs::draw_submitted_dialog;
use form::draw_contact_form;
use header::draw_header;
use help::draw_help_overlay;
use status::{draw_commands_bar, draw_status_bar};

/// Main draw function - lays out the screen and dispatches to renderers.
pub fn draw(frame: &mut Frame, app: &App) {
    // Header, content, commands bar, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(layout::HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(layout::COMMANDS_BAR_HEIGHT),
            Constraint::Length(layout::STATUS_BAR_HEIGHT),
        ])
        .split(frame.area());

    draw_header(frame, chunks[0], app);

    if app.form.state().submitted {
        draw_submitted_dialog(frame, chunks[1]);
    } else {
        draw_contact_form(frame, chunks[1], app);
    }

    draw_commands_bar(frame, chunks[2], app);
    draw_status_bar(frame, chunks[3], app);

    // Help overlay goes on top of everything
    if app.show_help {
        draw_help_overlay(frame);
    }
}
