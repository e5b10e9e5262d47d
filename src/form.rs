//! Contact form state and submission lifecycle.
//!
//! The controller owns the field values, runs the validator on submit and
//! hands a copy of the values to a [`ContactSubmitter`]. Submission failures
//! are caught here and surfaced as `submit_error`; they never propagate.

use std::collections::BTreeMap;

use crate::contact_client::{ContactSubmitter, SubmitError};
use crate::validation::{self, FieldErrors, RuleSet};

/// Field name -> current (sanitized) value.
pub type FormValues = BTreeMap<String, String>;

/// Shown when a failed submission carries no message of its own.
pub const GENERIC_SUBMIT_ERROR: &str = "Failed to send message. Please try again.";

/// Options offered for the contact form's project type field.
pub const PROJECT_TYPES: &[&str] = &[
    "web-application",
    "mobile-app",
    "api-backend",
    "consulting",
    "other",
];

/// How a field is edited in the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text, single line
    Text,
    /// Free text, rendered wrapped
    Multiline,
    /// One value out of a fixed list
    Choice(&'static [&'static str]),
}

/// Presentation metadata for a contact form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub kind: FieldKind,
}

/// Contact form fields in display order. Names match `contact_form_rules`.
pub static CONTACT_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "name",
        label: "Name",
        placeholder: "Ada Lovelace",
        kind: FieldKind::Text,
    },
    FieldSpec {
        name: "email",
        label: "Email",
        placeholder: "ada@example.com",
        kind: FieldKind::Text,
    },
    FieldSpec {
        name: "company",
        label: "Company (optional)",
        placeholder: "Analytical Engines Ltd.",
        kind: FieldKind::Text,
    },
    FieldSpec {
        name: "projectType",
        label: "Project type",
        placeholder: "←/→ to choose",
        kind: FieldKind::Choice(PROJECT_TYPES),
    },
    FieldSpec {
        name: "subject",
        label: "Subject",
        placeholder: "What is this about?",
        kind: FieldKind::Text,
    },
    FieldSpec {
        name: "message",
        label: "Message",
        placeholder: "Tell me about your project...",
        kind: FieldKind::Multiline,
    },
];

/// Observable form state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub values: FormValues,
    pub errors: FieldErrors,
    pub submitting: bool,
    pub submitted: bool,
    pub submit_error: Option<String>,
    pub char_count: usize,
}

impl FormState {
    /// Creates an empty state with one blank value per field.
    pub fn empty<'a>(fields: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            values: fields
                .into_iter()
                .map(|field| (field.to_string(), String::new()))
                .collect(),
            errors: FieldErrors::new(),
            submitting: false,
            submitted: false,
            submit_error: None,
            char_count: 0,
        }
    }
}

/// Result of a submit attempt, for callers that want to react to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; errors are populated
    Invalid,
    /// A submission is running or the form was already submitted
    Blocked,
    /// The collaborator accepted the values
    Sent,
    /// The collaborator failed; `submit_error` is set
    Failed,
}

/// Stateful orchestration over [`FormState`].
#[derive(Debug, Clone)]
pub struct FormController {
    rules: RuleSet,
    /// Field whose length is mirrored in `char_count`
    counted_field: String,
    state: FormState,
}

impl FormController {
    pub fn new(rules: RuleSet, counted_field: &str) -> Self {
        let state = FormState::empty(rules.field_names());
        Self {
            rules,
            counted_field: counted_field.to_string(),
            state,
        }
    }

    /// Controller for the default contact form (counts the message field).
    pub fn contact() -> Self {
        Self::new(validation::contact_form_rules(), "message")
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn value(&self, field: &str) -> &str {
        self.state.values.get(field).map(String::as_str).unwrap_or("")
    }

    pub fn error(&self, field: &str) -> Option<&str> {
        self.state.errors.get(field).map(String::as_str)
    }

    /// Records an edit. The value is sanitized before storage and the
    /// field's existing error is cleared. Edits to unknown fields, or while
    /// a submission is in flight or finished, are ignored until `reset`.
    pub fn set_value(&mut self, field: &str, raw: &str) {
        if self.state.submitting || self.state.submitted || !self.rules.contains(field) {
            return;
        }

        let clean = validation::sanitize_input(raw);
        if field == self.counted_field {
            self.state.char_count = clean.chars().count();
        }
        self.state.values.insert(field.to_string(), clean);
        self.state.errors.remove(field);
    }

    /// Validates and, when valid, enters the submitting state.
    ///
    /// Returns the values to hand to the collaborator, or None when the form
    /// is invalid or a submission is already running/finished.
    pub fn begin_submit(&mut self) -> Option<FormValues> {
        if self.state.submitting || self.state.submitted {
            tracing::debug!("Submit ignored: form is busy or already submitted");
            return None;
        }

        let errors = validation::validate_form(&self.state.values, &self.rules);
        if !errors.is_empty() {
            tracing::debug!(invalid_fields = errors.len(), "Contact form failed validation");
            self.state.errors = errors;
            self.state.submit_error = None;
            return None;
        }

        self.state.errors.clear();
        self.state.submit_error = None;
        self.state.submitting = true;
        Some(self.state.values.clone())
    }

    /// Applies the collaborator's result to the state.
    pub fn complete_submit(&mut self, result: Result<(), SubmitError>) {
        if !self.state.submitting {
            tracing::warn!("Submission result arrived with no submission in flight");
            return;
        }

        match result {
            Ok(()) => {
                let mut next = FormState::empty(self.rules.field_names());
                next.submitted = true;
                self.state = next;
                tracing::info!("Contact form submitted");
            }
            Err(e) => {
                let message = e.to_string();
                self.state.submitting = false;
                self.state.submit_error = Some(if message.trim().is_empty() {
                    GENERIC_SUBMIT_ERROR.to_string()
                } else {
                    message
                });
                tracing::warn!(error = %e, "Contact form submission failed");
            }
        }
    }

    /// Runs a full submit attempt against the collaborator.
    pub async fn submit<S>(&mut self, submitter: &S) -> SubmitOutcome
    where
        S: ContactSubmitter + ?Sized,
    {
        if self.state.submitting || self.state.submitted {
            return SubmitOutcome::Blocked;
        }
        let Some(values) = self.begin_submit() else {
            return SubmitOutcome::Invalid;
        };

        let result = submitter.submit(&values).await;
        let failed = result.is_err();
        self.complete_submit(result);

        if failed {
            SubmitOutcome::Failed
        } else {
            SubmitOutcome::Sent
        }
    }

    /// Hides the submission error banner.
    pub fn dismiss_submit_error(&mut self) {
        self.state.submit_error = None;
    }

    /// Starts over with a fresh, empty form.
    pub fn reset(&mut self) {
        self.state = FormState::empty(self.rules.field_names());
    }
}
