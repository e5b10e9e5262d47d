//! Event handling module.
//!
//! This module handles keyboard and terminal events using crossterm.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::constants::POLL_TIMEOUT;

/// Represents the different actions a user can take in the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Quit the application
    Quit,
    /// Focus the next form field
    NextField,
    /// Focus the previous form field
    PrevField,
    /// Next field, or submit from the last one
    Enter,
    /// Submit the form from any field
    Submit,
    /// Dismiss the error banner / close overlays
    Back,
    /// Previous option of a choice field
    Left,
    /// Next option of a choice field
    Right,
    /// Paste clipboard text into the focused field
    Paste,
    /// Start a new message after a successful submit
    NewMessage,
    /// Cycle the rendering quality manually
    CycleQuality,
    /// Show help
    Help,
    /// Character input
    Char(char),
    /// Backspace key
    Backspace,
}

/// Handles terminal events and converts them to application actions.
pub struct EventHandler {
    /// Timeout for polling events
    poll_timeout: Duration,
}

impl EventHandler {
    /// Creates a new event handler with default settings.
    pub fn new() -> Self {
        Self {
            poll_timeout: POLL_TIMEOUT,
        }
    }

    /// Polls for the next event and converts it to an Action.
    ///
    /// Returns Ok(None) if no event is available within the timeout.
    /// Returns Ok(Some(action)) if a key event was converted to an action.
    pub fn next(&self) -> io::Result<Option<Action>> {
        if event::poll(self.poll_timeout)? {
            if let Event::Key(key_event) = event::read()? {
                // Only process key press events (not releases)
                if key_event.kind == KeyEventKind::Press {
                    return Ok(self.key_to_action(key_event));
                }
            }
        }
        Ok(None)
    }

    /// Converts a key event to an application action.
    ///
    /// Every printable key is text input, so commands live on control and
    /// function keys.
    pub(crate) fn key_to_action(&self, key: KeyEvent) -> Option<Action> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') => Some(Action::Quit),
                KeyCode::Char('s') => Some(Action::Submit),
                KeyCode::Char('v') => Some(Action::Paste),
                KeyCode::Char('n') => Some(Action::NewMessage),
                _ => None,
            };
        }

        match key.code {
            KeyCode::Tab | KeyCode::Down => Some(Action::NextField),
            KeyCode::BackTab | KeyCode::Up => Some(Action::PrevField),
            KeyCode::Enter => Some(Action::Enter),
            KeyCode::Esc => Some(Action::Back),
            KeyCode::Left => Some(Action::Left),
            KeyCode::Right => Some(Action::Right),
            KeyCode::Backspace => Some(Action::Backspace),
            KeyCode::F(1) => Some(Action::Help),
            KeyCode::F(2) => Some(Action::CycleQuality),
            KeyCode::Char(c) => Some(Action::Char(c)),
            _ => None,
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn make_key_event(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn make_ctrl_key_event(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_field_navigation_keys() {
        let handler = EventHandler::new();

        assert_eq!(
            handler.key_to_action(make_key_event(KeyCode::Tab)),
            Some(Action::NextField)
        );
        assert_eq!(
            handler.key_to_action(make_key_event(KeyCode::Down)),
            Some(Action::NextField)
        );
        assert_eq!(
            handler.key_to_action(make_key_event(KeyCode::BackTab)),
            Some(Action::PrevField)
        );
        assert_eq!(
            handler.key_to_action(make_key_event(KeyCode::Up)),
            Some(Action::PrevField)
        );
    }

    #[test]
    fn test_control_keys() {
        let handler = EventHandler::new();

        assert_eq!(
            handler.key_to_action(make_ctrl_key_event(KeyCode::Char('c'))),
            Some(Action::Quit)
        );
        assert_eq!(
            handler.key_to_action(make_ctrl_key_event(KeyCode::Char('s'))),
            Some(Action::Submit)
        );
        assert_eq!(
            handler.key_to_action(make_ctrl_key_event(KeyCode::Char('v'))),
            Some(Action::Paste)
        );
        assert_eq!(
            handler.key_to_action(make_ctrl_key_event(KeyCode::Char('n'))),
            Some(Action::NewMessage)
        );
        assert_eq!(
            handler.key_to_action(make_ctrl_key_event(KeyCode::Char('z'))),
            None
        );
    }

    #[test]
    fn test_printable_keys_are_text() {
        let handler = EventHandler::new();

        // Letters that would be shortcuts elsewhere must reach the field
        for c in ['q', 'j', 'k', '?', ' '] {
            assert_eq!(
                handler.key_to_action(make_key_event(KeyCode::Char(c))),
                Some(Action::Char(c))
            );
        }
    }

    #[test]
    fn test_function_keys() {
        let handler = EventHandler::new();

        assert_eq!(
            handler.key_to_action(make_key_event(KeyCode::F(1))),
            Some(Action::Help)
        );
        assert_eq!(
            handler.key_to_action(make_key_event(KeyCode::F(2))),
            Some(Action::CycleQuality)
        );
        assert_eq!(handler.key_to_action(make_key_event(KeyCode::F(12))), None);
    }

    #[test]
    fn test_editing_keys() {
        let handler = EventHandler::new();

        assert_eq!(
            handler.key_to_action(make_key_event(KeyCode::Enter)),
            Some(Action::Enter)
        );
        assert_eq!(
            handler.key_to_action(make_key_event(KeyCode::Esc)),
            Some(Action::Back)
        );
        assert_eq!(
            handler.key_to_action(make_key_event(KeyCode::Backspace)),
            Some(Action::Backspace)
        );
        assert_eq!(
            handler.key_to_action(make_key_event(KeyCode::Left)),
            Some(Action::Left)
        );
        assert_eq!(
            handler.key_to_action(make_key_event(KeyCode::Right)),
            Some(Action::Right)
        );
    }
}
