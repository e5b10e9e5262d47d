//! Input validation for contact form fields.
//!
//! Rules are declarative: each field gets a [`FieldRule`] and the checks run
//! in a fixed order, stopping at the first failure.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

use regex::Regex;

/// Custom check run after the built-in ones. Returns an error message or None.
pub type CustomCheck = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Field name -> error message. A field without an error has no entry.
pub type FieldErrors = BTreeMap<String, String>;

/// Email pattern used by the contact form (deliberately light).
pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern compiles"));

/// Declarative constraints for one form field.
#[derive(Clone, Default)]
pub struct FieldRule {
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub pattern: Option<Regex>,
    pub custom: Option<CustomCheck>,
}

impl FieldRule {
    /// A rule that only requires a non-blank value.
    pub fn required() -> Self {
        Self {
            required: true,
            ..Self::default()
        }
    }

    /// A rule with no constraints (blank values pass).
    pub fn optional() -> Self {
        Self::default()
    }

    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    pub fn pattern(mut self, pattern: Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    pub fn custom<F>(mut self, check: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.custom = Some(Arc::new(check));
        self
    }
}

impl fmt::Debug for FieldRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRule")
            .field("required", &self.required)
            .field("min_length", &self.min_length)
            .field("max_length", &self.max_length)
            .field("pattern", &self.pattern.as_ref().map(Regex::as_str))
            .field("custom", &self.custom.is_some())
            .finish()
    }
}

/// Ordered mapping from field name to its rule. Keys are fixed per form.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<(String, FieldRule)>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the rule for a field.
    pub fn with(mut self, field: &str, rule: FieldRule) -> Self {
        if let Some(slot) = self.rules.iter_mut().find(|(name, _)| name == field) {
            slot.1 = rule;
        } else {
            self.rules.push((field.to_string(), rule));
        }
        self
    }

    pub fn get(&self, field: &str) -> Option<&FieldRule> {
        self.rules
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, rule)| rule)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// Field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Default rule set for the contact form.
pub fn contact_form_rules() -> RuleSet {
    RuleSet::new()
        .with("name", FieldRule::required().min_length(2).max_length(100))
        .with("email", FieldRule::required().pattern(EMAIL_REGEX.clone()))
        .with("subject", FieldRule::required().min_length(5).max_length(200))
        .with("message", FieldRule::required().min_length(20).max_length(5000))
        .with("projectType", FieldRule::required())
        .with("company", FieldRule::optional().max_length(100))
}

/// Validates a single field value.
///
/// Returns the first failing check's message, or None when the value passes.
/// Fields without a rule always pass.
pub fn validate_field(field: &str, value: &str, rules: &RuleSet) -> Option<String> {
    let rule = rules.get(field)?;
    let label = display_name(field);
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return rule.required.then(|| format!("{label} is required"));
    }

    let length = value.chars().count();

    if let Some(min) = rule.min_length {
        if length < min {
            return Some(format!("{label} must be at least {min} characters"));
        }
    }

    if let Some(max) = rule.max_length {
        if length > max {
            return Some(format!("{label} must not exceed {max} characters"));
        }
    }

    if let Some(pattern) = &rule.pattern {
        if !pattern.is_match(value) {
            return Some(if field == "email" {
                "Please enter a valid email address".to_string()
            } else {
                format!("{label} format is invalid")
            });
        }
    }

    rule.custom.as_ref().and_then(|check| check(value))
}

/// Validates every field in the rule set. Missing values count as empty.
pub fn validate_form(values: &BTreeMap<String, String>, rules: &RuleSet) -> FieldErrors {
    rules
        .field_names()
        .filter_map(|field| {
            let value = values.get(field).map(String::as_str).unwrap_or("");
            validate_field(field, value, rules).map(|error| (field.to_string(), error))
        })
        .collect()
}

/// Strips angle brackets and surrounding whitespace.
pub fn sanitize_input(value: &str) -> String {
    value
        .chars()
        .filter(|c| *c != '<' && *c != '>')
        .collect::<String>()
        .trim()
        .to_string()
}

/// Field name with its first character upper-cased ("email" -> "Email").
pub fn display_name(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_invalid_email_message() {
        let rules = contact_form_rules();
        assert_eq!(
            validate_field("email", "not-an-email", &rules).as_deref(),
            Some("Please enter a valid email address")
        );
        assert_eq!(validate_field("email", "a@b.com", &rules), None);
    }

    #[test]
    fn test_short_message() {
        let rules = contact_form_rules();
        assert_eq!(
            validate_field("message", "short", &rules).as_deref(),
            Some("Message must be at least 20 characters")
        );
    }

    #[test]
    fn test_required_fields() {
        let rules = contact_form_rules();
        assert_eq!(
            validate_field("name", "   ", &rules).as_deref(),
            Some("Name is required")
        );
        assert_eq!(
            validate_field("projectType", "", &rules).as_deref(),
            Some("ProjectType is required")
        );
    }

    #[test]
    fn test_optional_blank_skips_remaining_checks() {
        let rules = RuleSet::new().with(
            "website",
            FieldRule::optional()
                .min_length(10)
                .custom(|_| Some("never".to_string())),
        );
        assert_eq!(validate_field("website", "  ", &rules), None);
    }

    #[test]
    fn test_max_length() {
        let rules = contact_form_rules();
        let company = "c".repeat(101);
        assert_eq!(
            validate_field("company", &company, &rules).as_deref(),
            Some("Company must not exceed 100 characters")
        );
        assert_eq!(validate_field("company", &"c".repeat(100), &rules), None);
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let rules = RuleSet::new().with("name", FieldRule::required().max_length(3));
        assert_eq!(validate_field("name", "äöü", &rules), None);
    }

    #[test]
    fn test_generic_pattern_message() {
        let rules = RuleSet::new().with(
            "phone",
            FieldRule::required().pattern(Regex::new(r"^\d+$").unwrap()),
        );
        assert_eq!(
            validate_field("phone", "12a", &rules).as_deref(),
            Some("Phone format is invalid")
        );
    }

    #[test]
    fn test_custom_check_runs_last() {
        let rules = RuleSet::new().with(
            "code",
            FieldRule::required()
                .min_length(4)
                .custom(|v| (v != "open").then(|| "Wrong code".to_string())),
        );
        assert_eq!(
            validate_field("code", "abc", &rules).as_deref(),
            Some("Code must be at least 4 characters")
        );
        assert_eq!(
            validate_field("code", "shut", &rules).as_deref(),
            Some("Wrong code")
        );
        assert_eq!(validate_field("code", "open", &rules), None);
    }

    #[test]
    fn test_unknown_field_passes() {
        assert_eq!(validate_field("nope", "", &contact_form_rules()), None);
    }

    #[test]
    fn test_valid_contact_form() {
        let message = "x".repeat(25);
        let form = values(&[
            ("name", "Jo"),
            ("email", "a@b.com"),
            ("subject", "Hello there"),
            ("message", &message),
            ("projectType", "web-application"),
        ]);
        assert!(validate_form(&form, &contact_form_rules()).is_empty());
    }

    #[test]
    fn test_form_errors_match_field_results() {
        let rules = contact_form_rules();
        let form = values(&[
            ("name", "J"),
            ("email", "bad"),
            ("subject", "Hello there"),
            ("message", "too short"),
        ]);
        let errors = validate_form(&form, &rules);

        for field in rules.field_names() {
            let value = form.get(field).map(String::as_str).unwrap_or("");
            assert_eq!(
                errors.get(field).cloned(),
                validate_field(field, value, &rules)
            );
        }
        assert_eq!(errors.len(), 4);
        assert!(!errors.contains_key("company"));
    }

    #[test]
    fn test_sanitize_input() {
        assert_eq!(sanitize_input("  <b>hi</b>  "), "bhi/b");
        assert_eq!(sanitize_input("plain"), "plain");
        assert_eq!(sanitize_input("< >"), "");
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        for input in ["  <script>x</script> ", "a > b < c", "  ", "<<>>ok"] {
            let once = sanitize_input(input);
            assert_eq!(sanitize_input(&once), once);
            assert!(!once.contains('<') && !once.contains('>'));
        }
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("email"), "Email");
        assert_eq!(display_name("projectType"), "ProjectType");
        assert_eq!(display_name(""), "");
    }
}
