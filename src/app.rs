//! Application state and logic.
//!
//! This module contains the core application state, field focus handling,
//! and event handling logic. Submissions run as background tasks so the
//! UI keeps drawing (and sampling frames) while one is in flight.

use std::sync::Arc;
use std::time::Instant;

use tokio::task::JoinHandle;

use crate::constants::TOAST_DURATION;
use crate::contact_client::{ContactSubmitter, SubmitError};
use crate::event::Action;
use crate::form::{FieldKind, FieldSpec, FormController, CONTACT_FIELDS};
use crate::notify::{Notice, NoticeLevel, Notifier, ToastBoard};
use crate::performance::PerformanceTuner;

/// Main application state.
pub struct App {
    /// Contact form state machine
    pub form: FormController,
    /// Rendering quality for this session
    pub tuner: PerformanceTuner,
    /// Toast bus; anything may publish through it
    pub notifier: Notifier,
    /// Notices currently shown in the status bar
    pub toasts: ToastBoard,
    /// Where submissions are delivered
    submitter: Arc<dyn ContactSubmitter>,
    /// Human-readable destination, shown in the header
    pub destination: String,
    /// Submission running in the background
    pending: Option<JoinHandle<Result<(), SubmitError>>>,

    // --- Editing state ---
    /// Index into `CONTACT_FIELDS` of the focused field
    pub focused: usize,
    /// Raw text of the focused field (the form stores it sanitized)
    pub draft: String,

    /// Frames drawn so far, drives header animation
    pub frame_count: u64,
    /// Help visibility
    pub show_help: bool,
}

impl App {
    /// Creates a new application instance.
    pub fn new(
        submitter: Arc<dyn ContactSubmitter>,
        tuner: PerformanceTuner,
        destination: String,
    ) -> Self {
        let mut notifier = Notifier::new();
        let toasts = ToastBoard::new(notifier.subscribe(), TOAST_DURATION);
        Self {
            form: FormController::contact(),
            tuner,
            notifier,
            toasts,
            submitter,
            destination,
            pending: None,
            focused: 0,
            draft: String::new(),
            frame_count: 0,
            show_help: false,
        }
    }

    /// Starts frame-rate monitoring.
    pub fn start(&mut self, now: Instant) {
        self.tuner.start(now);
    }

    /// Stops frame-rate monitoring.
    pub fn stop(&mut self) {
        self.tuner.stop();
    }

    /// Bookkeeping for one drawn frame.
    pub fn on_frame(&mut self, now: Instant) {
        self.frame_count = self.frame_count.wrapping_add(1);

        if let Some(step) = self.tuner.on_frame(now) {
            self.notifier.publish(Notice::new(
                NoticeLevel::Warning,
                format!(
                    "Running at {} FPS, lowered quality to {}",
                    step.fps, step.to
                ),
            ));
        }

        self.toasts.tick(now);
    }

    /// Whether a submission is in flight.
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// The focused field's metadata.
    pub fn focused_field(&self) -> &'static FieldSpec {
        &CONTACT_FIELDS[self.focused]
    }

    /// Collects a finished background submission, if any.
    pub async fn poll_submission(&mut self) {
        if self.pending.as_ref().is_some_and(JoinHandle::is_finished) {
            self.settle_submission().await;
        }
    }

    /// Waits for the in-flight submission (if any) and applies its result.
    pub async fn settle_submission(&mut self) {
        let Some(handle) = self.pending.take() else {
            return;
        };

        let result = match handle.await {
            Ok(result) => result,
            Err(e) => Err(SubmitError::Failed(format!("Submission task failed: {e}"))),
        };
        self.form.complete_submit(result);

        if self.form.state().submitted {
            self.focus(0);
            self.notifier.publish(Notice::new(
                NoticeLevel::Success,
                "Message sent! I'll get back to you soon.",
            ));
        }
    }

    /// Handles an action and returns true if the app should quit.
    pub fn handle_event(&mut self, action: Action) -> bool {
        // Handle help toggle from anywhere
        if action == Action::Help {
            self.show_help = !self.show_help;
            return false;
        }

        // If help is showing, any key closes it
        if self.show_help {
            self.show_help = false;
            return action == Action::Quit;
        }

        if action == Action::Quit {
            return true;
        }

        if self.form.state().submitted {
            self.handle_submitted_action(action);
        } else {
            self.handle_form_action(action);
        }
        false
    }

    /// Actions while the confirmation is showing.
    fn handle_submitted_action(&mut self, action: Action) {
        match action {
            Action::Enter | Action::NewMessage => self.new_message(),
            Action::CycleQuality => self.cycle_quality(),
            Action::Back => self.toasts.dismiss(),
            _ => {}
        }
    }

    /// Actions while editing the form.
    fn handle_form_action(&mut self, action: Action) {
        match action {
            Action::NextField => self.focus_next(),
            Action::PrevField => self.focus_previous(),
            Action::Enter => {
                if self.focused + 1 == CONTACT_FIELDS.len() {
                    self.start_submission();
                } else {
                    self.focus_next();
                }
            }
            Action::Submit => self.start_submission(),
            Action::Back => {
                if self.form.state().submit_error.is_some() {
                    self.form.dismiss_submit_error();
                } else {
                    self.toasts.dismiss();
                }
            }
            Action::Left => self.cycle_choice(false),
            Action::Right => self.cycle_choice(true),
            Action::Char(c) => self.input_char(c),
            Action::Backspace => self.input_backspace(),
            Action::Paste => self.paste_clipboard(),
            Action::CycleQuality => self.cycle_quality(),
            Action::NewMessage | Action::Help | Action::Quit => {}
        }
    }

    // --- Focus helpers ---

    fn focus(&mut self, index: usize) {
        self.focused = index % CONTACT_FIELDS.len();
        self.draft = self.form.value(self.focused_field().name).to_string();
    }

    fn focus_next(&mut self) {
        self.focus(self.focused + 1);
    }

    fn focus_previous(&mut self) {
        let len = CONTACT_FIELDS.len();
        self.focus((self.focused + len - 1) % len);
    }

    // --- Input handling ---

    fn can_edit(&self) -> bool {
        !self.form.state().submitting && !self.is_busy()
    }

    /// Stores the draft in the form (sanitized there).
    fn commit_draft(&mut self) {
        let field = self.focused_field().name;
        self.form.set_value(field, &self.draft);
    }

    /// Appends a character to the focused text field.
    pub fn input_char(&mut self, c: char) {
        if !self.can_edit() || matches!(self.focused_field().kind, FieldKind::Choice(_)) {
            return;
        }
        self.draft.push(c);
        self.commit_draft();
    }

    /// Removes the last character from the focused text field.
    pub fn input_backspace(&mut self) {
        if !self.can_edit() || matches!(self.focused_field().kind, FieldKind::Choice(_)) {
            return;
        }
        self.draft.pop();
        self.commit_draft();
    }

    /// Moves a choice field to its next (or previous) option.
    fn cycle_choice(&mut self, forward: bool) {
        let FieldKind::Choice(options) = self.focused_field().kind else {
            return;
        };
        if !self.can_edit() || options.is_empty() {
            return;
        }

        let current = options.iter().position(|o| *o == self.draft);
        let next = match (current, forward) {
            (Some(i), true) => (i + 1) % options.len(),
            (Some(i), false) => (i + options.len() - 1) % options.len(),
            (None, true) => 0,
            (None, false) => options.len() - 1,
        };
        self.draft = options[next].to_string();
        self.commit_draft();
    }

    fn paste_clipboard(&mut self) {
        if !self.can_edit() || matches!(self.focused_field().kind, FieldKind::Choice(_)) {
            return;
        }

        let text = arboard::Clipboard::new().and_then(|mut clipboard| clipboard.get_text());
        match text {
            Ok(text) => {
                let single_line = self.focused_field().kind == FieldKind::Text;
                self.draft.extend(
                    text.chars()
                        .map(|c| if single_line && c == '\n' { ' ' } else { c })
                        .filter(|c| *c != '\r'),
                );
                self.commit_draft();
            }
            Err(e) => {
                tracing::debug!(error = %e, "Clipboard read failed");
                self.notifier
                    .publish(Notice::new(NoticeLevel::Error, "Clipboard not available"));
            }
        }
    }

    // --- Submission ---

    /// Validates and, when valid, sends the form in the background.
    fn start_submission(&mut self) {
        if self.is_busy() {
            return;
        }

        match self.form.begin_submit() {
            Some(values) => {
                let submitter = Arc::clone(&self.submitter);
                self.pending = Some(tokio::spawn(
                    async move { submitter.submit(&values).await },
                ));
            }
            None => {
                let errors = self.form.state().errors.len();
                if errors > 0 {
                    if let Some(first) = CONTACT_FIELDS
                        .iter()
                        .position(|f| self.form.error(f.name).is_some())
                    {
                        self.focus(first);
                    }
                    let noun = if errors == 1 { "field" } else { "fields" };
                    self.notifier.publish(Notice::new(
                        NoticeLevel::Warning,
                        format!("Please fix {errors} highlighted {noun}"),
                    ));
                }
            }
        }
    }

    fn new_message(&mut self) {
        self.form.reset();
        self.focus(0);
    }

    fn cycle_quality(&mut self) {
        let next = self.tuner.config().quality.cycle();
        self.tuner.set_quality(next);
        self.notifier.publish(Notice::new(
            NoticeLevel::Info,
            format!("Quality set to {next}"),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::DeviceSignals;
    use crate::form::FormValues;
    use crate::performance::Quality;
    use async_trait::async_trait;

    struct FixedSubmitter(Option<&'static str>);

    #[async_trait]
    impl ContactSubmitter for FixedSubmitter {
        async fn submit(&self, _values: &FormValues) -> Result<(), SubmitError> {
            match self.0 {
                Some(message) => Err(SubmitError::Failed(message.to_string())),
                None => Ok(()),
            }
        }
    }

    fn signals() -> DeviceSignals {
        DeviceSignals {
            hardware_concurrency: Some(8),
            device_memory_gb: Some(16.0),
            user_agent: "xterm-256color".to_string(),
            graphics_available: true,
            reduced_motion: false,
        }
    }

    fn app_with(failure: Option<&'static str>) -> App {
        App::new(
            Arc::new(FixedSubmitter(failure)),
            PerformanceTuner::with_defaults(&signals()),
            "test".to_string(),
        )
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_event(Action::Char(c));
        }
    }

    /// Fills every required field, leaving focus on the message field.
    fn fill_form(app: &mut App) {
        type_text(app, "Jo"); // name
        app.handle_event(Action::NextField);
        type_text(app, "a@b.com"); // email
        app.handle_event(Action::NextField); // company
        app.handle_event(Action::NextField);
        app.handle_event(Action::Right); // projectType
        app.handle_event(Action::NextField);
        type_text(app, "Hello there"); // subject
        app.handle_event(Action::NextField);
        type_text(app, "I would like a new portfolio site."); // message
    }

    fn current_toast(app: &mut App) -> Option<String> {
        app.toasts.tick(Instant::now());
        app.toasts.current().map(|n| n.text.clone())
    }

    #[test]
    fn test_typing_keeps_spaces_in_draft() {
        let mut app = app_with(None);
        app.focus(4); // subject
        type_text(&mut app, "Hello ");
        assert_eq!(app.draft, "Hello ");
        assert_eq!(app.form.value("subject"), "Hello");

        type_text(&mut app, "there");
        assert_eq!(app.form.value("subject"), "Hello there");
    }

    #[test]
    fn test_focus_wraps_and_reloads_draft() {
        let mut app = app_with(None);
        type_text(&mut app, "Jo");
        app.handle_event(Action::PrevField);
        assert_eq!(app.focused, CONTACT_FIELDS.len() - 1);
        assert_eq!(app.draft, "");

        app.handle_event(Action::NextField);
        assert_eq!(app.focused, 0);
        assert_eq!(app.draft, "Jo");
    }

    #[test]
    fn test_choice_field_cycles_options() {
        let mut app = app_with(None);
        app.focus(3);
        assert_eq!(app.focused_field().name, "projectType");

        app.handle_event(Action::Char('x'));
        assert_eq!(app.form.value("projectType"), "");

        app.handle_event(Action::Right);
        assert_eq!(app.form.value("projectType"), "web-application");
        app.handle_event(Action::Left);
        assert_eq!(app.form.value("projectType"), "other");
    }

    #[test]
    fn test_invalid_submit_focuses_first_error() {
        let mut app = app_with(None);
        app.focus(4);
        app.handle_event(Action::Submit);

        assert!(!app.is_busy());
        assert_eq!(app.focused, 0);
        assert_eq!(app.form.error("name"), Some("Name is required"));
        assert_eq!(
            current_toast(&mut app).as_deref(),
            Some("Please fix 5 highlighted fields")
        );
    }

    #[test]
    fn test_enter_moves_to_next_field() {
        let mut app = app_with(None);
        app.handle_event(Action::Enter);
        assert_eq!(app.focused, 1);
        assert!(app.form.state().errors.is_empty());
    }

    #[tokio::test]
    async fn test_enter_on_last_field_submits() {
        let mut app = app_with(None);
        fill_form(&mut app);
        assert_eq!(app.focused, CONTACT_FIELDS.len() - 1);

        app.handle_event(Action::Enter);
        assert!(app.is_busy());
        assert!(app.form.state().submitting);

        // Edits are ignored while sending
        app.handle_event(Action::Char('!'));
        assert!(!app.form.value("message").ends_with('!'));

        app.settle_submission().await;
        assert!(!app.is_busy());
        assert!(app.form.state().submitted);
        assert_eq!(app.focused, 0);
        assert_eq!(
            current_toast(&mut app).as_deref(),
            Some("Message sent! I'll get back to you soon.")
        );
    }

    #[tokio::test]
    async fn test_failed_submit_shows_banner_and_keeps_values() {
        let mut app = app_with(Some("network down"));
        fill_form(&mut app);
        let before = app.form.state().values.clone();

        app.handle_event(Action::Submit);
        app.settle_submission().await;

        let state = app.form.state();
        assert!(!state.submitting);
        assert_eq!(state.submit_error.as_deref(), Some("network down"));
        assert_eq!(state.values, before);

        app.handle_event(Action::Back);
        assert_eq!(app.form.state().submit_error, None);
    }

    #[tokio::test]
    async fn test_new_message_after_submit() {
        let mut app = app_with(None);
        fill_form(&mut app);
        app.handle_event(Action::Submit);
        app.settle_submission().await;

        // Typing does nothing on the confirmation screen
        app.handle_event(Action::Char('a'));
        assert!(app.form.state().submitted);

        app.handle_event(Action::NewMessage);
        assert!(!app.form.state().submitted);
        assert!(app.form.state().values.values().all(String::is_empty));
    }

    #[test]
    fn test_cycle_quality_publishes_notice() {
        let mut app = app_with(None);
        assert_eq!(app.tuner.config().quality, Quality::High);

        app.handle_event(Action::CycleQuality);

        assert_eq!(app.tuner.config().quality, Quality::Medium);
        assert_eq!(
            current_toast(&mut app).as_deref(),
            Some("Quality set to medium")
        );
    }

    #[test]
    fn test_slow_frames_publish_downgrade() {
        let mut app = app_with(None);
        let start = Instant::now();
        app.start(start);

        for i in 1..=10u64 {
            app.on_frame(start + std::time::Duration::from_millis(i * 100));
        }

        assert_eq!(app.tuner.config().quality, Quality::Medium);
        assert_eq!(app.frame_count, 10);
        assert_eq!(
            app.toasts.current().map(|n| n.text.as_str()),
            Some("Running at 10 FPS, lowered quality to medium")
        );
    }

    #[test]
    fn test_help_toggle() {
        let mut app = app_with(None);
        assert!(!app.handle_event(Action::Help));
        assert!(app.show_help);

        // Any key closes help without acting
        assert!(!app.handle_event(Action::Char('a')));
        assert!(!app.show_help);
        assert_eq!(app.draft, "");

        assert!(app.handle_event(Action::Quit));
    }
}
